//! ContextRankScorer - BM25 weighted by per-occurrence context agreement
//!
//! # Scoring one term in one document
//! 1. Each occurrence gets a multiplier from [`score_multiplier`]
//! 2. Occurrences with multiplier 0 are dropped from the term frequency
//! 3. The remaining multipliers are averaged
//! 4. If nothing remains and the query term is negated, the document counts
//!    as one agreeing occurrence with multiplier 1
//! 5. Score = BM25(remaining count) * average multiplier

use serde::Serialize;
use std::cmp::Ordering;

use super::config::RankConfig;
use super::index::{ContextIndex, IndexedDocument};
use super::math::{bm25_term_score, calculate_idf};
use super::weight::{explain_multiplier, score_multiplier, WeightExplanation};
use crate::context::{ContextCortex, Payload};

// ==================== TYPE DEFINITIONS ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTerm {
    pub term: String,
    pub payload: Payload,
}

impl QueryTerm {
    pub fn new(term: &str, payload: Payload) -> Self {
        Self {
            term: term.to_lowercase(),
            payload,
        }
    }
}

/// Annotated query. Tokens that are negation, assertion or historical cues
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextQuery {
    pub terms: Vec<QueryTerm>,
}

impl ContextQuery {
    pub fn analyze(cortex: &ContextCortex, text: &str) -> Self {
        let terms = cortex
            .annotate_text(text)
            .into_iter()
            .filter(|t| t.payload.is_query_term())
            .map(|t| QueryTerm::new(&t.text, t.payload))
            .collect();
        Self { terms }
    }

    pub fn from_terms(terms: Vec<QueryTerm>) -> Self {
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermExplanation {
    pub term: String,
    pub occurrences: usize,
    /// Occurrence count fed to BM25 after exclusions
    pub effective_count: usize,
    pub multiplier: f64,
    pub base: f64,
    pub score: f64,
    pub details: Vec<WeightExplanation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub id: String,
    pub score: f64,
    pub terms: Vec<TermExplanation>,
}

// ==================== MAIN IMPLEMENTATION ====================

#[derive(Debug, Clone, Default)]
pub struct ContextRankScorer {
    config: RankConfig,
}

impl ContextRankScorer {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Averaged multiplier and effective count for one term's occurrences
    fn weigh(&self, query: &Payload, occurrences: &[Payload]) -> (f64, usize) {
        if !self.config.context_enabled {
            return (1.0, occurrences.len());
        }

        let mut sum = 0.0;
        let mut count = 0usize;
        for occurrence in occurrences {
            let m = score_multiplier(query, occurrence, &self.config.weights);
            if m > 0.0 {
                sum += m;
                count += 1;
            }
        }

        if count == 0 {
            if !query.positive {
                return (1.0, 1);
            }
            return (0.0, 0);
        }
        (sum / count as f64, count)
    }

    /// Score one query term in one document. `None` if the document does not
    /// contain the term.
    pub fn score_term(&self, index: &ContextIndex, document: &IndexedDocument, term: &QueryTerm) -> Option<TermExplanation> {
        let occurrences = document.occurrences(&term.term);
        if occurrences.is_empty() {
            return None;
        }

        let (multiplier, effective_count) = self.weigh(&term.payload, occurrences);
        let idf = calculate_idf(index.len() as f64, index.doc_frequency(&term.term));
        let base = bm25_term_score(
            idf,
            effective_count as f64,
            document.length,
            index.average_length(),
            self.config.k1,
            self.config.b,
        );

        let details = if self.config.context_enabled {
            occurrences
                .iter()
                .map(|o| explain_multiplier(&term.payload, o, &self.config.weights))
                .collect()
        } else {
            Vec::new()
        };

        Some(TermExplanation {
            term: term.term.clone(),
            occurrences: occurrences.len(),
            effective_count,
            multiplier,
            base,
            score: base * multiplier,
            details,
        })
    }

    /// Score every query term in one document
    pub fn score_document(&self, index: &ContextIndex, document: &IndexedDocument, query: &ContextQuery) -> RankedDocument {
        let terms: Vec<TermExplanation> = query
            .terms
            .iter()
            .filter_map(|term| self.score_term(index, document, term))
            .collect();
        RankedDocument {
            id: document.id.clone(),
            score: terms.iter().map(|t| t.score).sum(),
            terms,
        }
    }

    /// Documents with a positive score, best first, ties broken by id
    pub fn rank(&self, index: &ContextIndex, query: &ContextQuery) -> Vec<RankedDocument> {
        let mut ranked: Vec<RankedDocument> = index
            .documents()
            .iter()
            .map(|doc| self.score_document(index, doc, query))
            .filter(|r| r.score > 0.0)
            .collect();

        ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });

        debug_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        ranked
    }
}
