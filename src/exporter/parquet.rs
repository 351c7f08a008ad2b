// file: src/exporter/parquet.rs
// description: columnar export of the extracted corpus as a parquet file
// reference: https://docs.rs/parquet

use crate::error::{PipelineError, Result};
use crate::models::{Corpus, DocumentRecord};
use arrow::record_batch::RecordBatch;
use arrow_array::ArrayRef;
use arrow_array::builder::{Date32Builder, Int64Builder, MapBuilder, StringBuilder};
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

// 1970-01-01 counted from 0001-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Debug, Clone)]
pub struct ParquetExporter {
    output_path: PathBuf,
}

impl ParquetExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn export(&self, corpus: &Corpus) -> Result<PathBuf> {
        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let batch = Self::to_record_batch(corpus.records())?;

        let file = File::create(&self.output_path).map_err(|source| {
            PipelineError::FileOperation {
                path: self.output_path.clone(),
                source,
            }
        })?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!(
            "Wrote {} rows to {}",
            batch.num_rows(),
            self.output_path.display()
        );
        Ok(self.output_path.clone())
    }

    /// One row per record; failed records fill only the `error` column.
    pub fn to_record_batch(records: &[DocumentRecord]) -> Result<RecordBatch> {
        let mut filename = StringBuilder::new();
        let mut date = Date32Builder::new();
        let mut full_text = StringBuilder::new();
        let mut summary = StringBuilder::new();
        let mut regions = MapBuilder::new(None, StringBuilder::new(), StringBuilder::new());
        let mut region_count = Int64Builder::new();
        let mut char_count = Int64Builder::new();
        let mut word_count = Int64Builder::new();
        let mut error = StringBuilder::new();

        for record in records {
            match record {
                DocumentRecord::Extracted(document) => {
                    filename.append_value(&document.filename);
                    date.append_option(document.date.map(days_since_epoch));
                    full_text.append_value(&document.full_text);
                    summary.append_option(document.summary.as_deref());
                    for section in &document.regions {
                        regions.keys().append_value(&section.label);
                        regions.values().append_value(&section.text);
                    }
                    regions.append(true)?;
                    region_count.append_value(document.region_count as i64);
                    char_count.append_value(document.char_count as i64);
                    word_count.append_value(document.word_count as i64);
                    error.append_null();
                }
                DocumentRecord::Failed { error: reason, .. } => {
                    filename.append_null();
                    date.append_null();
                    full_text.append_null();
                    summary.append_null();
                    regions.append(false)?;
                    region_count.append_null();
                    char_count.append_null();
                    word_count.append_null();
                    error.append_value(reason);
                }
            }
        }

        let batch = RecordBatch::try_from_iter_with_nullable(vec![
            ("filename", Arc::new(filename.finish()) as ArrayRef, true),
            ("date", Arc::new(date.finish()) as ArrayRef, true),
            ("full_text", Arc::new(full_text.finish()) as ArrayRef, true),
            ("summary", Arc::new(summary.finish()) as ArrayRef, true),
            ("regions", Arc::new(regions.finish()) as ArrayRef, true),
            ("region_count", Arc::new(region_count.finish()) as ArrayRef, true),
            ("char_count", Arc::new(char_count.finish()) as ArrayRef, true),
            ("word_count", Arc::new(word_count.finish()) as ArrayRef, true),
            ("error", Arc::new(error.finish()) as ArrayRef, true),
        ])?;

        Ok(batch)
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
