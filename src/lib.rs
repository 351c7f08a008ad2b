// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use config::{
    Config, DuplicateLabelPolicy, ExtractionConfig, InputConfig, OutputConfig, OutputFormat,
    PipelineConfig,
};
pub use error::{PipelineError, Result};
pub use exporter::{ExportManifest, JsonExporter, ParquetExporter};
pub use extractor::{
    ExtractionFailure, ExtractionOutcome, FilenameDateParser, PdfTextExtractor, RegionSection,
    SectionSegmenter, TextExtractor,
};
pub use models::{Corpus, Document, DocumentRecord};
pub use parser::TextNormalizer;
pub use pipeline::{CorpusBuilder, DocumentProcessor, PipelineStats, ProgressTracker, RunSummary};
pub use repository::{FileScanner, ScannedFile};
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _builder = CorpusBuilder::new(config).show_progress(false);
        let _normalizer = TextNormalizer::new();
    }
}
