// file: src/models/corpus.rs
// description: ordered collection of per-file records produced by one run
// reference: internal data structures

use crate::models::{Document, DocumentRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<DocumentRecord>,
}

impl Corpus {
    pub fn new(records: Vec<DocumentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.records.iter().filter_map(DocumentRecord::document)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Word total over successfully extracted documents.
    pub fn total_words(&self) -> u64 {
        self.documents().map(|doc| doc.word_count as u64).sum()
    }
}

impl From<Vec<DocumentRecord>> for Corpus {
    fn from(records: Vec<DocumentRecord>) -> Self {
        Self::new(records)
    }
}
