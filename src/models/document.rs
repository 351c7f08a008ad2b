// file: src/models/document.rs
// description: extracted Beige Book document model and per-file record
// reference: internal data structures

use crate::extractor::RegionSection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub date: Option<NaiveDate>,
    pub full_text: String,
    pub summary: Option<String>,
    pub regions: Vec<RegionSection>,
    pub region_count: usize,
    pub char_count: usize,
    pub word_count: usize,
}

impl Document {
    pub fn new(
        filename: String,
        date: Option<NaiveDate>,
        full_text: String,
        summary: Option<String>,
        regions: Vec<RegionSection>,
    ) -> Self {
        let region_count = regions.len();
        let char_count = full_text.chars().count();
        let word_count = full_text.split_whitespace().count();

        Self {
            filename,
            date,
            full_text,
            summary,
            regions,
            region_count,
            char_count,
            word_count,
        }
    }

    pub fn region(&self, label: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|section| section.label == label)
            .map(|section| section.text.as_str())
    }
}

/// One row of the corpus: an extracted document or the reason it has none.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRecord {
    Extracted(Document),
    Failed { filename: String, error: String },
}

impl DocumentRecord {
    pub fn failed(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let error = format!("Could not extract text from {}", filename);
        DocumentRecord::Failed { filename, error }
    }

    pub fn filename(&self) -> &str {
        match self {
            DocumentRecord::Extracted(document) => &document.filename,
            DocumentRecord::Failed { filename, .. } => filename,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            DocumentRecord::Extracted(document) => Some(document),
            DocumentRecord::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DocumentRecord::Extracted(_) => None,
            DocumentRecord::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentRecord::Failed { .. })
    }

    /// Row shape shared with the columnar export: regions as an object,
    /// failed rows carrying only `error`.
    pub fn to_json(&self) -> Value {
        let mut row = Map::new();

        match self {
            DocumentRecord::Extracted(document) => {
                let regions: Map<String, Value> = document
                    .regions
                    .iter()
                    .map(|section| (section.label.clone(), Value::from(section.text.clone())))
                    .collect();

                row.insert("filename".into(), Value::from(document.filename.clone()));
                row.insert(
                    "date".into(),
                    document
                        .date
                        .map_or(Value::Null, |date| Value::from(date.to_string())),
                );
                row.insert("full_text".into(), Value::from(document.full_text.clone()));
                row.insert(
                    "summary".into(),
                    document.summary.clone().map_or(Value::Null, Value::from),
                );
                row.insert("regions".into(), Value::Object(regions));
                row.insert("region_count".into(), Value::from(document.region_count));
                row.insert("char_count".into(), Value::from(document.char_count));
                row.insert("word_count".into(), Value::from(document.word_count));
            }
            DocumentRecord::Failed { error, .. } => {
                row.insert("error".into(), Value::from(error.clone()));
            }
        }

        Value::Object(row)
    }
}
