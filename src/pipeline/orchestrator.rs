// file: src/pipeline/orchestrator.rs
// description: builds the corpus from a directory of reports and persists it
// reference: orchestrates scanning, per-document processing, and export

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::exporter::{JsonExporter, ParquetExporter};
use crate::extractor::{PdfTextExtractor, TextExtractor};
use crate::models::{Corpus, DocumentRecord};
use crate::pipeline::processor::DocumentProcessor;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::repository::{FileScanner, ScannedFile};
use crate::utils::OperationTimer;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a full extraction run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: PipelineStats,
    pub output_path: PathBuf,
}

pub struct CorpusBuilder {
    config: Config,
    processor: Arc<DocumentProcessor>,
    max_concurrent_tasks: usize,
    show_progress: bool,
}

impl CorpusBuilder {
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(PdfTextExtractor::new()))
    }

    pub fn with_extractor(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        let processor = Arc::new(DocumentProcessor::new(&config, extractor));
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Self {
            config,
            processor,
            max_concurrent_tasks,
            show_progress: true,
        }
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn processor(&self) -> &DocumentProcessor {
        &self.processor
    }

    /// Processes every matching file under `<raw_data_dir>/<source_subdir>`
    /// in filename order. A missing source directory aborts the run; a bad
    /// document only yields a failed record.
    pub async fn build(&self, raw_data_dir: &Path) -> Result<Corpus> {
        let source_dir = self.config.input.source_dir(raw_data_dir);
        let scanner = FileScanner::new(self.config.input.clone());
        let files = scanner.scan_directory(&source_dir)?;

        info!("Found {} Beige Book PDFs", files.len());
        if files.is_empty() {
            warn!("No files found to process in {}", source_dir.display());
            return Ok(Corpus::default());
        }

        let progress = Arc::new(if self.show_progress {
            ProgressTracker::new(files.len())
        } else {
            ProgressTracker::hidden(files.len())
        });

        info!(
            "Processing files with {} concurrent tasks",
            self.max_concurrent_tasks
        );
        let records = self.process_files(files, progress.clone()).await;
        progress.finish();

        Ok(Corpus::new(records))
    }

    /// Builds the corpus, writes it to `output_path`, and reports totals.
    pub async fn run(&self, raw_data_dir: &Path, output_path: &Path) -> Result<RunSummary> {
        let timer = OperationTimer::new("beige book extraction");

        let corpus = self.build(raw_data_dir).await?;
        timer.checkpoint("documents processed");

        let output_path = match self.config.output.format {
            OutputFormat::Parquet => ParquetExporter::new(output_path).export(&corpus)?,
            OutputFormat::Json => JsonExporter::new(output_path, true).export(&corpus)?,
        };

        let mut stats = PipelineStats::from_records(corpus.records());
        stats.duration_secs = timer.finish_with_count(corpus.len()).as_secs();
        self.log_final_stats(&stats, &output_path);

        Ok(RunSummary { stats, output_path })
    }

    async fn process_files(
        &self,
        files: Vec<ScannedFile>,
        progress: Arc<ProgressTracker>,
    ) -> Vec<DocumentRecord> {
        let processor = self.processor.clone();
        let max_bytes = (self.config.pipeline.max_file_size_mb as u64) * 1024 * 1024;

        let tasks = files.into_iter().map(|file| {
            let processor = processor.clone();
            let progress = progress.clone();

            async move {
                if max_bytes > 0 && file.size > max_bytes {
                    warn!(
                        "Not extracting {} ({} MB exceeds the {} MB limit)",
                        file.filename,
                        file.size / 1024 / 1024,
                        max_bytes / 1024 / 1024
                    );
                    let record = DocumentRecord::failed(file.filename.clone());
                    progress.record(&record);
                    return record;
                }

                let path = file.path.clone();
                let processed = tokio::task::spawn_blocking(move || processor.process(&path)).await;

                let record = match processed {
                    Ok(record) => record,
                    Err(e) => {
                        error!("Processing task for {} failed: {}", file.filename, e);
                        DocumentRecord::failed(file.filename.clone())
                    }
                };

                progress.record(&record);
                record
            }
        });

        // buffered keeps input order, so the corpus stays chronological
        stream::iter(tasks)
            .buffered(self.max_concurrent_tasks)
            .collect()
            .await
    }

    fn log_final_stats(&self, stats: &PipelineStats, output_path: &Path) {
        info!("=== Extraction Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Documents processed: {}", stats.total_files());
        info!("Documents failed: {}", stats.files_failed);
        info!("Success rate: {:.2}%", stats.success_rate());
        info!("Throughput: {:.2} files/s", stats.files_per_second());
        info!("Regions extracted: {}", stats.total_regions);
        info!("Total words: {}", stats.total_words);
        info!("Saved to: {}", output_path.display());
        info!("==========================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::extractor::{ExtractionFailure, ExtractionOutcome};
    use std::fs;
    use tempfile::TempDir;

    /// Serves the file's own bytes as text; files named `*_broken.pdf` fail.
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract(&self, path: &Path) -> ExtractionOutcome {
            if path.to_string_lossy().ends_with("_broken.pdf") {
                return Err(ExtractionFailure::Library("bad xref".to_string()));
            }
            fs::read_to_string(path).map_err(|e| ExtractionFailure::Unreadable(e.to_string()))
        }
    }

    fn builder(workers: usize) -> CorpusBuilder {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = workers;
        CorpusBuilder::with_extractor(config, Arc::new(PlainTextExtractor)).show_progress(false)
    }

    fn raw_data_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("Fed Beige Book");
        fs::create_dir(&source).unwrap();
        fs::write(
            source.join("BeigeBook_20240306.pdf"),
            "SUMMARY Growth was slight. First District--Boston Sales were flat.",
        )
        .unwrap();
        fs::write(
            source.join("BeigeBook_20240117.pdf"),
            "Overview Activity edged up. ATLANTA Tourism was strong.",
        )
        .unwrap();
        fs::write(source.join("BeigeBook_20240417_broken.pdf"), "ignored").unwrap();
        fs::write(source.join("BeigeBook_20240529.pdf"), "").unwrap();
        temp
    }

    #[tokio::test]
    async fn test_oversized_file_yields_failed_record() {
        let raw = raw_data_dir();
        let source = raw.path().join("Fed Beige Book");
        let mut large = "ATLANTA Tourism was strong. ".repeat(80_000);
        large.insert_str(0, "SUMMARY ");
        fs::write(source.join("BeigeBook_20240228.pdf"), &large).unwrap();

        let mut config = Config::default_config();
        config.pipeline.max_file_size_mb = 1;
        let builder = CorpusBuilder::with_extractor(config, Arc::new(PlainTextExtractor))
            .show_progress(false);

        let corpus = builder.build(raw.path()).await.unwrap();
        let names: Vec<&str> = corpus.records().iter().map(|r| r.filename()).collect();
        assert_eq!(
            names,
            vec![
                "BeigeBook_20240117.pdf",
                "BeigeBook_20240228.pdf",
                "BeigeBook_20240306.pdf",
                "BeigeBook_20240417_broken.pdf",
                "BeigeBook_20240529.pdf",
            ]
        );
        assert_eq!(
            corpus.records()[1].error(),
            Some("Could not extract text from BeigeBook_20240228.pdf")
        );
        assert!(!corpus.records()[2].is_failed());
    }

    #[test]
    fn test_builder_worker_floor() {
        let builder = builder(1);
        assert_eq!(builder.max_concurrent_tasks, 1);
    }

    #[tokio::test]
    async fn test_missing_source_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = builder(1).build(temp.path()).await.unwrap_err();
        assert!(matches!(err, PipelineError::DirectoryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_build_keeps_chronological_order() {
        let raw = raw_data_dir();
        let corpus = builder(4).build(raw.path()).await.unwrap();

        let names: Vec<&str> = corpus.records().iter().map(|r| r.filename()).collect();
        assert_eq!(
            names,
            vec![
                "BeigeBook_20240117.pdf",
                "BeigeBook_20240306.pdf",
                "BeigeBook_20240417_broken.pdf",
                "BeigeBook_20240529.pdf",
            ]
        );

        assert!(!corpus.records()[0].is_failed());
        assert!(corpus.records()[2].is_failed());
        assert!(corpus.records()[3].is_failed());

        let first = corpus.records()[0].document().unwrap();
        assert_eq!(first.summary.as_deref(), Some("Activity edged up."));
        assert_eq!(first.region("ATLANTA"), Some("ATLANTA Tourism was strong."));
    }

    #[tokio::test]
    async fn test_run_writes_output_and_counts_words() {
        let raw = raw_data_dir();
        let output = raw.path().join("data").join("extracted_beige_books.parquet");

        let summary = builder(1).run(raw.path(), &output).await.unwrap();

        assert!(output.is_file());
        assert_eq!(summary.output_path, output);
        assert_eq!(summary.stats.total_files(), 4);
        assert_eq!(summary.stats.files_failed, 2);
        // 8 + 9 words from the two readable reports
        assert_eq!(summary.stats.total_words, 17);
    }
}
