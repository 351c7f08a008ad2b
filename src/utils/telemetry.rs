// file: src/utils/telemetry.rs
// description: Wall-clock timing of extraction stages and slow documents
// reference: https://docs.rs/tracing

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Documents taking longer than this to extract get a warning.
pub const SLOW_DOCUMENT_THRESHOLD: Duration = Duration::from_secs(30);

pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting {}", operation);
        Self::quiet(operation)
    }

    /// Starts timing without announcing it; used once per document.
    pub fn quiet(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn checkpoint(&self, message: &str) {
        debug!(
            "[{}] {} after {:.2}s",
            self.operation,
            message,
            self.elapsed().as_secs_f64()
        );
    }

    pub fn finish_with_count(self, documents: usize) -> Duration {
        let elapsed = self.elapsed();
        let secs = elapsed.as_secs_f64();
        info!(
            "Finished {}: {} documents in {:.2}s ({:.2} documents/sec)",
            self.operation,
            documents,
            secs,
            if secs > 0.0 { documents as f64 / secs } else { 0.0 }
        );
        elapsed
    }

    /// Returns whether the threshold was exceeded.
    pub fn warn_if_slow(&self, threshold: Duration) -> bool {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "{} took {:.2}s (threshold {:.0}s)",
                self.operation,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
            return true;
        }
        false
    }
}
