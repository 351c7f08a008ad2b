// file: src/extractor/patterns.rs
// description: compiled regex patterns and header catalogs for section extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// Which catalog a header pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// "First District--Boston" style header.
    Ordinal,
    /// Bare city name such as "ATLANTA".
    City,
}

#[derive(Debug)]
pub struct HeaderPattern {
    pub label: &'static str,
    pub kind: HeaderKind,
    pub regex: Regex,
}

/// Ordinal, canonical city, and the regex fragment matching that city.
const DISTRICTS: [(&str, &str, &str); 12] = [
    ("First", "Boston", r"Boston"),
    ("Second", "New York", r"New\s+York"),
    ("Third", "Philadelphia", r"Philadelphia"),
    ("Fourth", "Cleveland", r"Cleveland"),
    ("Fifth", "Richmond", r"Richmond"),
    ("Sixth", "Atlanta", r"Atlanta"),
    ("Seventh", "Chicago", r"Chicago"),
    ("Eighth", "St. Louis", r"St\.?\s*Louis"),
    ("Ninth", "Minneapolis", r"Minneapolis"),
    ("Tenth", "Kansas City", r"Kansas\s+City"),
    ("Eleventh", "Dallas", r"Dallas"),
    ("Twelfth", "San Francisco", r"San\s+Francisco"),
];

// hyphen, double hyphen, en dash or em dash
const SEPARATOR: &str = r"\s*(?:--|-|\x{2013}|\x{2014})\s*";

const SUMMARY_LITERALS: [&str; 3] = ["SUMMARY", "National Summary", "Overview"];

fn compile(pattern: &str, name: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {} header pattern: {}", name, e))
}

fn build_header_catalog() -> Vec<HeaderPattern> {
    let mut catalog: Vec<HeaderPattern> = DISTRICTS
        .iter()
        .map(|(ordinal, city, city_pattern)| HeaderPattern {
            label: *city,
            kind: HeaderKind::Ordinal,
            regex: compile(
                &format!(r"(?i){}\s+District{}{}", ordinal, SEPARATOR, city_pattern),
                city,
            ),
        })
        .collect();

    let cities = DISTRICTS
        .iter()
        .map(|(_, _, city_pattern)| *city_pattern)
        .collect::<Vec<_>>()
        .join("|");

    catalog.push(HeaderPattern {
        label: "city",
        kind: HeaderKind::City,
        regex: compile(&format!(r"(?i)(?:{})", cities), "city"),
    });

    catalog
}

lazy_static! {
    /// Ordinal headers in district order, followed by the bare-city alternation.
    pub static ref HEADER_CATALOG: Vec<HeaderPattern> = build_header_catalog();

    /// Summary header literals, tried in order.
    pub static ref SUMMARY_HEADERS: Vec<(&'static str, Regex)> = SUMMARY_LITERALS
        .iter()
        .map(|literal| (*literal, compile(&format!("(?i){}", regex::escape(literal)), literal)))
        .collect();

    /// First token of regional content; ends the summary span.
    pub static ref SUMMARY_END_ANCHOR: Regex = Regex::new(
        r"(?i)First District|Second District|BOSTON|ATLANTA"
    ).expect("SUMMARY_END_ANCHOR regex is valid");

    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"[0-9]{8}"
    ).expect("DATE_TOKEN regex is valid");

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE_RUN regex is valid");

    pub static ref PAGE_MARKER: Regex = Regex::new(
        r"Page \d+"
    ).expect("PAGE_MARKER regex is valid");

    pub static ref DISALLOWED_CHAR: Regex = Regex::new(
        r"[^\w\s.,;:!?\-()]"
    ).expect("DISALLOWED_CHAR regex is valid");
}

pub fn ordinal_headers() -> impl Iterator<Item = &'static HeaderPattern> {
    HEADER_CATALOG
        .iter()
        .filter(|pattern| pattern.kind == HeaderKind::Ordinal)
}
