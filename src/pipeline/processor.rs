// file: src/pipeline/processor.rs
// description: turns one Beige Book file into a structured document record
// reference: extracts text, segments sections, and normalizes every span

use crate::config::Config;
use crate::extractor::{FilenameDateParser, RegionSection, SectionSegmenter, TextExtractor};
use crate::models::{Document, DocumentRecord};
use crate::parser::TextNormalizer;
use crate::utils::telemetry::{OperationTimer, SLOW_DOCUMENT_THRESHOLD};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DocumentProcessor {
    extractor: Arc<dyn TextExtractor>,
    date_parser: FilenameDateParser,
    segmenter: SectionSegmenter,
    normalizer: TextNormalizer,
}

impl DocumentProcessor {
    pub fn new(config: &Config, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            extractor,
            date_parser: FilenameDateParser::new(),
            segmenter: SectionSegmenter::new(config.extraction.duplicate_labels),
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn process(&self, path: &Path) -> DocumentRecord {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        info!("Processing {}...", filename);
        let timer = OperationTimer::quiet(&filename);

        let extracted = self.extractor.extract(path);
        timer.warn_if_slow(SLOW_DOCUMENT_THRESHOLD);

        let raw_text = match extracted {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                warn!("No text extracted from {}", filename);
                return DocumentRecord::failed(filename);
            }
            Err(reason) => {
                warn!("Could not extract text from {}: {}", filename, reason);
                return DocumentRecord::failed(filename);
            }
        };

        DocumentRecord::Extracted(self.build_document(filename, &raw_text))
    }

    /// Segments and cleans already extracted text.
    pub fn build_document(&self, filename: String, raw_text: &str) -> Document {
        let date = self.date_parser.parse(&filename);

        let summary = self.segmenter.summary(raw_text);
        let regions = self.segmenter.regions(raw_text);

        let full_text = self.normalizer.normalize(raw_text);
        let summary = summary.map(|text| self.normalizer.normalize(&text));
        let regions: Vec<RegionSection> = regions
            .into_iter()
            .map(|section| RegionSection::new(section.label, self.normalizer.normalize(&section.text)))
            .collect();

        let document = Document::new(filename, date, full_text, summary, regions);
        debug!(
            "{}: {} regions, {} words, summary {}",
            document.filename,
            document.region_count,
            document.word_count,
            if document.summary.is_some() { "found" } else { "absent" }
        );
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ExtractionFailure, ExtractionOutcome};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    struct FixedText(ExtractionOutcome);

    impl TextExtractor for FixedText {
        fn extract(&self, _path: &Path) -> ExtractionOutcome {
            self.0.clone()
        }
    }

    fn processor(outcome: ExtractionOutcome) -> DocumentProcessor {
        DocumentProcessor::new(&Config::default_config(), Arc::new(FixedText(outcome)))
    }

    const SAMPLE: &str = "SUMMARY Overall growth was modest. First District--Boston Activity increased. Second District--New York Activity was flat.";

    #[test]
    fn test_process_sample_document() {
        let processor = processor(Ok(SAMPLE.to_string()));
        let record = processor.process(Path::new("/data/BeigeBook_20240117.pdf"));
        let document = record.document().unwrap();

        assert_eq!(document.filename, "BeigeBook_20240117.pdf");
        assert_eq!(document.date, NaiveDate::from_ymd_opt(2024, 1, 17));
        assert_eq!(document.summary.as_deref(), Some("Overall growth was modest."));
        assert_eq!(
            document.regions,
            vec![
                RegionSection::new(
                    "First District--Boston",
                    "First District--Boston Activity increased."
                ),
                RegionSection::new(
                    "Second District--New York",
                    "Second District--New York Activity was flat."
                ),
            ]
        );
        assert_eq!(document.region_count, 2);
        assert_eq!(document.full_text, SAMPLE);
        assert_eq!(document.word_count, SAMPLE.split_whitespace().count());
        assert_eq!(document.char_count, SAMPLE.chars().count());
    }

    #[test]
    fn test_empty_text_is_error_record() {
        let processor = processor(Ok(String::new()));
        let record = processor.process(Path::new("BeigeBook_20240117.pdf"));

        assert_eq!(
            record.error(),
            Some("Could not extract text from BeigeBook_20240117.pdf")
        );
        assert!(record.document().is_none());
    }

    #[test]
    fn test_whitespace_only_text_is_document() {
        let processor = processor(Ok(" \n\t\n".to_string()));
        let record = processor.process(Path::new("BeigeBook_20240117.pdf"));
        let document = record.document().unwrap();

        assert_eq!(document.full_text, "");
        assert_eq!(document.word_count, 0);
        assert_eq!(document.char_count, 0);
        assert_eq!(document.summary, None);
        assert!(document.regions.is_empty());
    }

    #[test]
    fn test_extraction_failure_is_error_record() {
        let processor = processor(Err(ExtractionFailure::Panicked));
        let record = processor.process(Path::new("BeigeBook_20240117.pdf"));
        assert!(record.is_failed());
    }

    #[test]
    fn test_document_without_structure() {
        let processor = processor(Ok("Page 1\nNothing\tto see\u{2014}here.\n".to_string()));
        let record = processor.process(Path::new("report.pdf"));
        let document = record.document().unwrap();

        assert_eq!(document.date, None);
        assert_eq!(document.summary, None);
        assert!(document.regions.is_empty());
        assert_eq!(document.region_count, 0);
        assert_eq!(document.full_text, "Nothing to see here.");
        assert_eq!(document.word_count, 4);
    }

    #[test]
    fn test_region_spans_are_cleaned() {
        let processor = processor(Ok(
            "Fifth District\u{2014}Richmond\nManufacturing   rose.\nPage 4\n".to_string(),
        ));
        let document = processor
            .process(Path::new("BeigeBook_20190605.pdf"))
            .document()
            .cloned()
            .unwrap();

        assert_eq!(document.regions.len(), 1);
        assert_eq!(document.regions[0].label, "Fifth District\u{2014}Richmond");
        assert_eq!(
            document.regions[0].text,
            "Fifth District Richmond Manufacturing rose."
        );
    }
}
