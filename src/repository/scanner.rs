// file: src/repository/scanner.rs
// description: Source directory listing of Beige Book files in chronological order
// reference: https://docs.rs/walkdir

use crate::config::InputConfig;
use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct FileScanner {
    input: InputConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl FileScanner {
    pub fn new(input: InputConfig) -> Self {
        Self { input }
    }

    /// Lists `<prefix>*.<extension>` files directly under `source_dir`,
    /// sorted by filename. The zero-padded date token makes that order
    /// chronological.
    pub fn scan_directory(&self, source_dir: &Path) -> Result<Vec<ScannedFile>> {
        Validator::validate_directory(source_dir)?;

        info!("Scanning directory: {}", source_dir.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", source_dir.display(), e);
                    None
                }
            })
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            if !self.matches(&filename) {
                debug!("Skipping file: {}", entry.path().display());
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(ScannedFile {
                path: entry.path().to_path_buf(),
                filename,
                size,
            });
        }

        info!("Found {} Beige Book files", files.len());
        Ok(files)
    }

    fn matches(&self, filename: &str) -> bool {
        let Some(stem) = filename.strip_prefix(&self.input.file_prefix) else {
            return false;
        };

        let suffix = format!(".{}", self.input.extension.to_ascii_lowercase());
        stem.to_ascii_lowercase().ends_with(&suffix)
    }
}
