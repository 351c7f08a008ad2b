// file: src/extractor/sections.rs
// description: summary and regional section segmentation of raw report text
// reference: https://docs.rs/regex

use crate::config::DuplicateLabelPolicy;
use crate::extractor::patterns::{
    HEADER_CATALOG, HeaderKind, HeaderPattern, SUMMARY_END_ANCHOR, SUMMARY_HEADERS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A header occurrence found while scanning; never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionMatch {
    start: usize,
    end: usize,
    literal: String,
    kind: HeaderKind,
}

/// Text attributed to one detected header, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSection {
    pub label: String,
    pub text: String,
}

impl RegionSection {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

pub struct SectionSegmenter {
    catalog: &'static [HeaderPattern],
    duplicate_labels: DuplicateLabelPolicy,
}

impl SectionSegmenter {
    pub fn new(duplicate_labels: DuplicateLabelPolicy) -> Self {
        Self {
            catalog: HEADER_CATALOG.as_slice(),
            duplicate_labels,
        }
    }

    /// Splits `text` at every detected header. Spans run from one header to
    /// the next (or to the end of the text) and are trimmed.
    pub fn regions(&self, text: &str) -> Vec<RegionSection> {
        let matches = self.find_headers(text);

        let mut sections = Vec::with_capacity(matches.len());
        for (i, header) in matches.iter().enumerate() {
            let end = matches.get(i + 1).map_or(text.len(), |next| next.start);
            sections.push(RegionSection::new(
                header.literal.clone(),
                text[header.start..end].trim(),
            ));
        }

        let sections = self.resolve_labels(sections);
        debug!(
            "Segmented {} regional sections from {} header matches",
            sections.len(),
            matches.len()
        );
        sections
    }

    /// Text between the first summary header and the first regional anchor.
    pub fn summary(&self, text: &str) -> Option<String> {
        let (literal, header) = SUMMARY_HEADERS
            .iter()
            .find_map(|(literal, regex)| regex.find(text).map(|m| (*literal, m)))?;

        let rest = &text[header.end()..];
        let end = SUMMARY_END_ANCHOR
            .find(rest)
            .map_or(rest.len(), |anchor| anchor.start());

        debug!("Summary header '{}' found at offset {}", literal, header.start());
        Some(rest[..end].trim().to_string())
    }

    fn find_headers(&self, text: &str) -> Vec<RegionMatch> {
        let mut matches: Vec<RegionMatch> = Vec::new();

        for pattern in self.catalog {
            for m in pattern.regex.find_iter(text) {
                matches.push(RegionMatch {
                    start: m.start(),
                    end: m.end(),
                    literal: m.as_str().to_string(),
                    kind: pattern.kind,
                });
            }
        }

        // the city token inside "First District--Boston" is the same header
        let ordinal_ranges: Vec<(usize, usize)> = matches
            .iter()
            .filter(|m| m.kind == HeaderKind::Ordinal)
            .map(|m| (m.start, m.end))
            .collect();
        matches.retain(|m| {
            m.kind == HeaderKind::Ordinal
                || !ordinal_ranges
                    .iter()
                    .any(|&(start, end)| m.start >= start && m.start < end)
        });

        matches.sort_by_key(|m| m.start);
        matches
    }

    fn resolve_labels(&self, sections: Vec<RegionSection>) -> Vec<RegionSection> {
        match self.duplicate_labels {
            DuplicateLabelPolicy::Suffix => {
                let mut seen: HashMap<String, usize> = HashMap::new();
                sections
                    .into_iter()
                    .map(|section| {
                        let count = seen.entry(section.label.clone()).or_insert(0);
                        *count += 1;
                        if *count == 1 {
                            section
                        } else {
                            RegionSection::new(
                                format!("{} ({})", section.label, count),
                                section.text,
                            )
                        }
                    })
                    .collect()
            }
            DuplicateLabelPolicy::LastWins => {
                let mut resolved: Vec<RegionSection> = Vec::with_capacity(sections.len());
                let mut index: HashMap<String, usize> = HashMap::new();
                for section in sections {
                    match index.get(&section.label) {
                        Some(&i) => resolved[i].text = section.text,
                        None => {
                            index.insert(section.label.clone(), resolved.len());
                            resolved.push(section);
                        }
                    }
                }
                resolved
            }
        }
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new(DuplicateLabelPolicy::default())
    }
}
