// file: src/extractor/date.rs
// description: publication date recovery from Beige Book filenames
// reference: https://docs.rs/chrono

use crate::extractor::patterns::DATE_TOKEN;
use chrono::NaiveDate;
use tracing::debug;

pub struct FilenameDateParser;

impl FilenameDateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses the first 8-digit run of `filename` as `YYYYMMDD`.
    ///
    /// Dateless filenames are valid input, so a missing or impossible date
    /// yields `None` instead of an error.
    pub fn parse(&self, filename: &str) -> Option<NaiveDate> {
        let token = DATE_TOKEN.find(filename)?.as_str();

        match NaiveDate::parse_from_str(token, "%Y%m%d") {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("Ignoring date token {} in {}: {}", token, filename, e);
                None
            }
        }
    }
}

impl Default for FilenameDateParser {
    fn default() -> Self {
        Self::new()
    }
}
