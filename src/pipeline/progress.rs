// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for corpus extraction
// reference: uses indicatif for progress bars and tracks processing metrics

use crate::models::DocumentRecord;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_regions: usize,
    pub total_words: u64,
    pub total_chars: u64,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates over a finished corpus; failed records only count as failures.
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        let mut stats = Self::new();
        for record in records {
            match record.document() {
                Some(document) => {
                    stats.files_processed += 1;
                    stats.total_regions += document.region_count;
                    stats.total_words += document.word_count as u64;
                    stats.total_chars += document.char_count as u64;
                }
                None => stats.files_failed += 1,
            }
        }
        stats
    }

    pub fn total_files(&self) -> usize {
        self.files_processed + self.files_failed
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.total_files() as f64 / self.duration_secs as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_files();
        if total == 0 {
            return 0.0;
        }
        (self.files_processed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_failed: Arc<AtomicUsize>,
    words: Arc<AtomicU64>,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_files as u64);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    /// A tracker that counts but never draws.
    pub fn hidden(total_files: usize) -> Self {
        let main_bar = ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::hidden(),
        );
        let detail_bar = ProgressBar::hidden();
        Self::from_bars(main_bar, detail_bar)
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            files_failed: Arc::new(AtomicUsize::new(0)),
            words: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record(&self, record: &DocumentRecord) {
        match record.document() {
            Some(document) => {
                self.words
                    .fetch_add(document.word_count as u64, Ordering::SeqCst);
            }
            None => {
                self.files_failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.main_bar.set_message(record.filename().to_string());
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Processing complete");
        self.detail_bar.finish_and_clear();
    }

    fn update_detail_bar(&self) {
        let words = self.words.load(Ordering::SeqCst);
        let failed = self.files_failed.load(Ordering::SeqCst);

        let message = format!("Words: {} | Failed: {}", words, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    bar.set_style(style);
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
