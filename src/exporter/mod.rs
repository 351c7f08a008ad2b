// file: src/exporter/mod.rs
// description: corpus export module exports
// reference: internal module structure

pub mod json;
pub mod parquet;

pub use self::json::{ExportManifest, JsonExporter};
pub use self::parquet::ParquetExporter;
