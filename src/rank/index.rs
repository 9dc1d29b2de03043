//! ContextIndex - in-memory postings of per-occurrence payloads
//!
//! Terms are lowercased token texts. Each posting keeps the payload of every
//! occurrence so that context weights can be applied at query time.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::context::{AnnotatedToken, ContextCortex, Payload};

#[derive(Debug, Clone, Default)]
pub struct IndexedDocument {
    pub id: String,
    /// Number of tokens in the document
    pub length: usize,
    pub(crate) postings: HashMap<String, Vec<Payload>>,
}

impl IndexedDocument {
    /// Payloads of every occurrence of `term` (lowercased)
    pub fn occurrences(&self, term: &str) -> &[Payload] {
        self.postings.get(term).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub term_count: usize,
    pub average_length: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ContextIndex {
    documents: Vec<IndexedDocument>,
    by_id: HashMap<String, usize>,
    doc_frequency: HashMap<String, usize>,
    total_length: usize,
}

impl ContextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index annotated tokens under `id`. Re-adding an id replaces it.
    pub fn add_document(&mut self, id: &str, tokens: &[AnnotatedToken]) {
        self.remove_document(id);

        let mut postings: HashMap<String, Vec<Payload>> = HashMap::new();
        for token in tokens {
            postings.entry(token.text.to_lowercase()).or_default().push(token.payload);
        }
        for term in postings.keys() {
            *self.doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }

        self.total_length += tokens.len();
        self.by_id.insert(id.to_string(), self.documents.len());
        self.documents.push(IndexedDocument {
            id: id.to_string(),
            length: tokens.len(),
            postings,
        });

        debug!(id, tokens = tokens.len(), "indexed document");
    }

    /// Annotate `text` with `cortex` and index the result
    pub fn add_text(&mut self, cortex: &ContextCortex, id: &str, text: &str) {
        let tokens = cortex.annotate_text(text);
        self.add_document(id, &tokens);
    }

    pub fn remove_document(&mut self, id: &str) -> bool {
        let Some(at) = self.by_id.remove(id) else {
            return false;
        };
        let removed = self.documents.swap_remove(at);
        if let Some(moved) = self.documents.get(at) {
            self.by_id.insert(moved.id.clone(), at);
        }
        for term in removed.postings.keys() {
            if let Some(df) = self.doc_frequency.get_mut(term) {
                *df -= 1;
                if *df == 0 {
                    self.doc_frequency.remove(term);
                }
            }
        }
        self.total_length -= removed.length;
        true
    }

    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&IndexedDocument> {
        self.by_id.get(id).map(|at| &self.documents[*at])
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn doc_frequency(&self, term: &str) -> usize {
        self.doc_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn average_length(&self) -> f64 {
        if self.documents.is_empty() {
            0.0
        } else {
            self.total_length as f64 / self.documents.len() as f64
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.documents.len(),
            term_count: self.doc_frequency.len(),
            average_length: self.average_length(),
        }
    }
}
