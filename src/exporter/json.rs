// file: src/exporter/json.rs
// description: json export of the extracted corpus

use crate::error::{PipelineError, Result};
use crate::models::Corpus;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_documents: usize,
    pub failed_documents: usize,
    pub total_words: u64,
    pub records: Vec<Value>,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            output_path: output_path.into(),
            pretty,
        }
    }

    pub fn manifest(corpus: &Corpus) -> ExportManifest {
        let failed_documents = corpus.records().iter().filter(|r| r.is_failed()).count();

        ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_documents: corpus.len(),
            failed_documents,
            total_words: corpus.total_words(),
            records: corpus.records().iter().map(|r| r.to_json()).collect(),
        }
    }

    pub fn export(&self, corpus: &Corpus) -> Result<PathBuf> {
        info!("Starting JSON export to {:?}", self.output_path);

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let manifest = Self::manifest(corpus);
        let body = if self.pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };

        fs::write(&self.output_path, body).map_err(|source| PipelineError::FileOperation {
            path: self.output_path.clone(),
            source,
        })?;

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(self.output_path.clone())
    }
}
