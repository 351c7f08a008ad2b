// file: src/parser/normalizer.rs
// description: Text normalization of extracted report text for downstream analysis
// reference: https://docs.rs/regex

use crate::extractor::patterns::{DISALLOWED_CHAR, PAGE_MARKER, WHITESPACE_RUN};

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Cleans `content`, repeating the cleaning pass until it is stable so
    /// that normalizing twice gives the same result as normalizing once.
    pub fn normalize(&self, content: &str) -> String {
        let mut normalized = self.pass(content);

        loop {
            let next = self.pass(&normalized);
            if next == normalized {
                return normalized;
            }
            normalized = next;
        }
    }

    fn pass(&self, content: &str) -> String {
        let mut normalized = self.collapse_whitespace(content);

        normalized = self.strip_page_markers(&normalized);
        normalized = self.restrict_characters(&normalized);
        normalized = self.collapse_whitespace(&normalized);

        normalized.trim().to_string()
    }

    fn collapse_whitespace(&self, content: &str) -> String {
        WHITESPACE_RUN.replace_all(content, " ").into_owned()
    }

    fn strip_page_markers(&self, content: &str) -> String {
        PAGE_MARKER.replace_all(content, "").into_owned()
    }

    fn restrict_characters(&self, content: &str) -> String {
        DISALLOWED_CHAR.replace_all(content, " ").into_owned()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
