//! ContextCortex - sentence and document level ConText annotation
//!
//! Owns a [`TriggerDictionary`] and annotation settings, and drives the
//! pipeline for each line of each sentence:
//!
//! matcher (per tier) → priority resolver → propagation → payload assignment
//!
//! # Features
//! - Sentences are split at line breaks; each line is annotated on its own
//! - Status arrays are sized per line, never per document
//! - Pluggable segmentation through [`Segmenter`]
//! - Tokens outside every sentence get an unmarked payload

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::assign::{assign_payloads, TokenSampling};
use super::dictionary::TriggerDictionary;
use super::payload::Payload;
use super::propagation::PropagationEngine;
use super::resolver::resolve_priority;
use super::segment::{Segmenter, SimpleSegmenter};
use super::span::Span;
use super::status::ContextStatus;
use super::trigger::TriggerTier;
use crate::error::{ConfigError, DictionaryError};

// ==================== TYPE DEFINITIONS ====================

/// Annotation settings
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CortexConfig {
    /// Word window for propagation. `None` runs to the sentence boundary.
    #[serde(default)]
    pub max_window: Option<usize>,
    #[serde(default)]
    pub sampling: TokenSampling,
}

impl CortexConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A token with its context payload. Offsets are document byte offsets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotatedToken {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub payload: Payload,
}

impl AnnotatedToken {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

// ==================== MAIN IMPLEMENTATION ====================

#[derive(Debug, Clone)]
pub struct ContextCortex {
    dictionary: TriggerDictionary,
    engine: PropagationEngine,
    config: CortexConfig,
}

impl ContextCortex {
    pub fn new(dictionary: TriggerDictionary, config: CortexConfig) -> Self {
        Self {
            dictionary,
            engine: PropagationEngine::new(config.max_window),
            config,
        }
    }

    /// Cortex over the built-in clinical lexicon
    pub fn clinical(config: CortexConfig) -> Result<Self, DictionaryError> {
        let cortex = Self::new(TriggerDictionary::clinical()?, config);
        debug!(tiers = cortex.dictionary.tiers().len(), "built clinical context cortex");
        Ok(cortex)
    }

    pub fn dictionary(&self) -> &TriggerDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &CortexConfig {
        &self.config
    }

    /// Resolved triggers of one line, offsets relative to the line
    pub fn find_triggers(&self, line: &str) -> TriggerTier {
        let tiers: Vec<TriggerTier> = self
            .dictionary
            .tiers()
            .iter()
            .map(|tier| tier.find_triggers(line))
            .collect();
        let found: usize = tiers.iter().map(|t| t.len()).sum();
        let resolved = resolve_priority(tiers);
        trace!(found, kept = resolved.len(), "resolved line triggers");
        resolved
    }

    /// Per-byte status of one line (no embedded line breaks)
    pub fn annotate_sentence(&self, line: &str) -> Vec<ContextStatus> {
        let triggers = self.find_triggers(line);
        self.engine.propagate(line, &triggers)
    }

    /// Annotate `tokens` of `text` using externally supplied spans.
    ///
    /// Both span lists must be ordered and non-overlapping. One
    /// [`AnnotatedToken`] is returned per input token, in order.
    pub fn annotate(&self, text: &str, sentences: &[Span], tokens: &[Span]) -> Vec<AnnotatedToken> {
        let mut payloads = vec![Payload::default(); tokens.len()];

        for sentence in sentences {
            let mut line_start = sentence.start;
            for line in sentence.slice(text).split('\n') {
                let line_end = line_start + line.len();
                let first = tokens.partition_point(|t| t.start < line_start);
                let last = tokens.partition_point(|t| t.start < line_end);

                if first < last {
                    let statuses = self.annotate_sentence(line);
                    let assigned = assign_payloads(&statuses, line_start, &tokens[first..last], self.config.sampling);
                    payloads[first..last].copy_from_slice(&assigned);
                }

                line_start = line_end + 1;
            }
        }

        debug!(sentences = sentences.len(), tokens = tokens.len(), "annotated document");

        tokens
            .iter()
            .zip(payloads)
            .map(|(span, payload)| AnnotatedToken {
                start: span.start,
                end: span.end,
                text: span.slice(text).to_string(),
                payload,
            })
            .collect()
    }

    /// Segment with `segmenter`, then annotate
    pub fn annotate_with<S: Segmenter + ?Sized>(&self, segmenter: &S, text: &str) -> Vec<AnnotatedToken> {
        let sentences = segmenter.sentences(text);
        let tokens = segmenter.tokens(text);
        self.annotate(text, &sentences, &tokens)
    }

    /// Segment with [`SimpleSegmenter`], then annotate
    pub fn annotate_text(&self, text: &str) -> Vec<AnnotatedToken> {
        self.annotate_with(&SimpleSegmenter, text)
    }
}
