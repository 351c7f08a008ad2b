// file: tests/pipeline.rs
// description: end-to-end extraction run against a stub text source
// reference: reads the written parquet file back with the arrow reader

use arrow::array::{Array, AsArray};
use arrow::datatypes::Int64Type;
use beige_book::{
    Config, CorpusBuilder, ExtractionFailure, ExtractionOutcome, OutputFormat, PipelineError,
    TextExtractor,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const JANUARY: &str = "SUMMARY Overall growth was modest. First District--Boston Activity increased. Second District--New York Activity was flat.";

/// Looks the report text up by filename instead of parsing a PDF.
struct CannedText(HashMap<&'static str, &'static str>);

impl TextExtractor for CannedText {
    fn extract(&self, path: &Path) -> ExtractionOutcome {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        match self.0.get(name) {
            Some(text) => Ok(text.to_string()),
            None => Err(ExtractionFailure::Library("unsupported encoding".to_string())),
        }
    }
}

fn fixture() -> (TempDir, CorpusBuilder) {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("raw_data").join("Fed Beige Book");
    fs::create_dir_all(&source).unwrap();

    for name in [
        "BeigeBook_20240117.pdf",
        "BeigeBook_20240306.pdf",
        "BeigeBook_20240417.pdf",
        "README.txt",
    ] {
        fs::write(source.join(name), b"%PDF-1.7").unwrap();
    }

    let texts = HashMap::from([
        ("BeigeBook_20240117.pdf", JANUARY),
        (
            "BeigeBook_20240306.pdf",
            "National Summary\nPrices rose 3%.\nPage 2\nATLANTA\nTourism held up.\nBOSTON\nLoan demand was steady.",
        ),
    ]);

    let mut config = Config::default_config();
    config.pipeline.parallel_workers = 2;
    let builder =
        CorpusBuilder::with_extractor(config, Arc::new(CannedText(texts))).show_progress(false);

    (temp, builder)
}

#[tokio::test]
async fn extracts_corpus_in_chronological_order() {
    let (temp, builder) = fixture();
    let corpus = builder.build(&temp.path().join("raw_data")).await.unwrap();

    assert_eq!(corpus.len(), 3);

    let january = corpus.records()[0].document().unwrap();
    assert_eq!(january.summary.as_deref(), Some("Overall growth was modest."));
    assert_eq!(january.region_count, 2);
    assert_eq!(
        january.region("Second District--New York"),
        Some("Second District--New York Activity was flat.")
    );

    let march = corpus.records()[1].document().unwrap();
    assert_eq!(march.summary.as_deref(), Some("Prices rose 3 ."));
    let labels: Vec<&str> = march.regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["ATLANTA", "BOSTON"]);
    assert_eq!(march.regions[0].text, "ATLANTA Tourism held up.");
    assert!(!march.full_text.contains("Page 2"));

    assert_eq!(
        corpus.records()[2].error(),
        Some("Could not extract text from BeigeBook_20240417.pdf")
    );
    assert_eq!(
        corpus.total_words(),
        (january.word_count + march.word_count) as u64
    );
}

#[tokio::test]
async fn writes_parquet_dataset() {
    let (temp, builder) = fixture();
    let output = temp.path().join("data").join("extracted_beige_books.parquet");

    let summary = builder
        .run(&temp.path().join("raw_data"), &output)
        .await
        .unwrap();
    assert_eq!(summary.stats.files_processed, 2);
    assert_eq!(summary.stats.files_failed, 1);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&output).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|batch| batch.unwrap()).collect();
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 3);

    let batch = &batches[0];
    let filenames = batch.column_by_name("filename").unwrap().as_string::<i32>();
    assert_eq!(filenames.value(0), "BeigeBook_20240117.pdf");
    assert!(filenames.is_null(2));

    let region_counts = batch
        .column_by_name("region_count")
        .unwrap()
        .as_primitive::<Int64Type>();
    assert_eq!(region_counts.value(0), 2);

    let errors = batch.column_by_name("error").unwrap().as_string::<i32>();
    assert!(errors.is_null(0));
    assert!(!errors.is_null(2));
}

#[tokio::test]
async fn writes_json_when_configured() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("Fed Beige Book");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("BeigeBook_20240117.pdf"), b"%PDF").unwrap();

    let mut config = Config::default_config();
    config.output.format = OutputFormat::Json;
    let builder = CorpusBuilder::with_extractor(
        config,
        Arc::new(CannedText(HashMap::from([("BeigeBook_20240117.pdf", JANUARY)]))),
    )
    .show_progress(false);

    let output = temp.path().join("out.json");
    builder.run(temp.path(), &output).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["records"][0]["region_count"], 2);
    assert_eq!(json["records"][0]["date"], "2024-01-17");
}

#[tokio::test]
async fn missing_source_directory_aborts() {
    let (temp, builder) = fixture();
    let output = temp.path().join("data").join("out.parquet");

    let err = builder.run(temp.path(), &output).await.unwrap_err();
    assert!(matches!(err, PipelineError::DirectoryNotFound { .. }));
    assert!(!output.exists());
}
