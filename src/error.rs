//! Error types for dictionary loading, weight configuration and payload decoding
//!
//! Every error here is a load-time error. Annotation and scoring over
//! well-formed input never fail.

use thiserror::Error;

/// Failures while building a [`TriggerDictionary`](crate::context::TriggerDictionary)
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("tier {tier}: keyword rule has an empty phrase")]
    EmptyPhrase { tier: u32 },

    #[error("tier {tier}: phrase '{phrase}' maps category {category} to no context type")]
    EmptyContexts {
        tier: u32,
        phrase: String,
        category: &'static str,
    },

    #[error("tier {tier}: invalid regex in pattern slot '{slot}': {source}")]
    Regex {
        tier: u32,
        slot: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("tier {tier}: failed to build keyword automaton: {message}")]
    Automaton { tier: u32, message: String },

    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading scoring or annotation configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Failures while decoding a stored payload
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload must be exactly 2 bytes, got {0}")]
    Length(usize),

    #[error("payload byte {index} has reserved bits set: {byte:#04x}")]
    ReservedBits { index: usize, byte: u8 },
}
