// file: src/repository/mod.rs
// description: Source directory operations module exports
// reference: Internal module structure

pub mod scanner;

pub use scanner::{FileScanner, ScannedFile};
