// file: src/extractor/mod.rs
// description: text extraction and section segmentation module exports
// reference: internal module structure

pub mod date;
pub mod patterns;
pub mod pdf;
pub mod sections;

pub use date::FilenameDateParser;
pub use pdf::{ExtractionFailure, ExtractionOutcome, PdfTextExtractor, TextExtractor};
pub use sections::{RegionSection, SectionSegmenter};
