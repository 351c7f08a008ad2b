// file: src/extractor/pdf.rs
// description: pdf text layer extraction with soft failure reporting
// reference: https://docs.rs/pdf-extract

use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, warn};

/// Why a document produced no usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    Unreadable(String),
    Library(String),
    Panicked,
    Empty,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::Unreadable(reason) => write!(f, "unreadable file: {}", reason),
            ExtractionFailure::Library(reason) => write!(f, "pdf library error: {}", reason),
            ExtractionFailure::Panicked => write!(f, "pdf library panicked on malformed input"),
            ExtractionFailure::Empty => write!(f, "no text layer"),
        }
    }
}

pub type ExtractionOutcome = std::result::Result<String, ExtractionFailure>;

/// Source of plain text for a document on disk.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> ExtractionOutcome;
}

/// Text layer extraction backed by `pdf-extract`.
#[derive(Debug, Default, Clone)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn join_pages(pages: &[String]) -> String {
        let mut text = String::new();
        for page in pages.iter().filter(|page| !page.is_empty()) {
            text.push_str(page);
            text.push('\n');
        }
        text
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> ExtractionOutcome {
        let bytes = fs::read(path).map_err(|e| {
            warn!("Error reading {}: {}", path.display(), e);
            ExtractionFailure::Unreadable(e.to_string())
        })?;

        // pdf_extract can panic on malformed PDFs
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }));

        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                warn!("Error extracting text from {}: {}", path.display(), e);
                return Err(ExtractionFailure::Library(e.to_string()));
            }
            Err(_) => {
                warn!("Error extracting text from {}: library panicked", path.display());
                return Err(ExtractionFailure::Panicked);
            }
        };

        let text = Self::join_pages(&pages);
        debug!(
            "Extracted {} pages ({} bytes) from {}",
            pages.len(),
            text.len(),
            path.display()
        );

        if text.is_empty() {
            return Err(ExtractionFailure::Empty);
        }

        Ok(text)
    }
}
