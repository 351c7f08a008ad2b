// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub raw_data_dir: PathBuf,
    pub source_subdir: String,
    pub file_prefix: String,
    pub extension: String,
}

impl InputConfig {
    pub fn source_dir(&self, raw_data_dir: &Path) -> PathBuf {
        raw_data_dir.join(&self.source_subdir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Parquet,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" => Ok(OutputFormat::Parquet),
            "json" => Ok(OutputFormat::Json),
            other => Err(PipelineError::Config(format!(
                "unknown output format '{}', expected parquet or json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub max_file_size_mb: usize,
}

/// How repeated header literals are keyed in a document's region mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLabelPolicy {
    /// Later occurrences get an occurrence suffix, e.g. `Boston (2)`.
    #[default]
    Suffix,
    /// Later occurrences overwrite earlier ones.
    LastWins,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub duplicate_labels: DuplicateLabelPolicy,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BEIGE_BOOK")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            input: InputConfig {
                raw_data_dir: PathBuf::from("etl/raw_data"),
                source_subdir: "Fed Beige Book".to_string(),
                file_prefix: "BeigeBook_".to_string(),
                extension: "pdf".to_string(),
            },
            output: OutputConfig {
                path: PathBuf::from("data/extracted_beige_books.parquet"),
                format: OutputFormat::Parquet,
            },
            pipeline: PipelineConfig {
                parallel_workers: 1,
                max_file_size_mb: 200,
            },
            extraction: ExtractionConfig {
                duplicate_labels: DuplicateLabelPolicy::Suffix,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.input.file_prefix.is_empty() {
            return Err(PipelineError::Config(
                "file_prefix must not be empty".to_string(),
            ));
        }

        if self.input.extension.is_empty() {
            return Err(PipelineError::Config(
                "extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
