//! MedContext: ConText annotation + context-aware ranking
//!
//! A Rust/WASM implementation of the ConText algorithm for clinical text.
//! Every token is tagged with negation, assertion, temporality and
//! experiencer status, packed into a 2-byte payload, and compared at query
//! time to weight each occurrence of a query term.
//!
//! # Architecture
//!
//! ## Context Components
//! - `dictionary.rs` - TriggerDictionary: prioritised keyword + regex tiers
//! - `matcher.rs` - Per-tier trigger detection (Aho-Corasick + regex battery)
//! - `resolver.rs` - Priority resolution over an interval index
//! - `propagation.rs` - PropagationEngine: directional per-byte status
//! - `payload.rs` - Payload: 2-byte per-token codec
//! - `cortex.rs` - ContextCortex: sentence/line/token pipeline
//!
//! ## Ranking Components
//! - `config.rs` - ContextWeights (twelve weights) and RankConfig
//! - `weight.rs` - Query vs index payload multiplier
//! - `scorer.rs` - ContextRankScorer: BM25 with per-occurrence context weights
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ContextAnnotator, ContextRanker } from 'medcontext';
//!
//! await init();
//!
//! const annotator = new ContextAnnotator();
//! const { tokens } = annotator.annotate("Patient denies chest pain.");
//! console.log(tokens[3].payload.positive); // false
//!
//! const ranker = new ContextRanker();
//! ranker.addDocument("d1", "Possible GERD, but no evident symptoms");
//! ranker.addDocument("d2", "His family history includes heartburn.");
//! console.log(ranker.search("fmhx heartburn", 10).results);
//! ```

pub mod context;
pub mod error;
pub mod rank;
pub mod wasm;

pub use context::*;
pub use error::*;
pub use rank::*;
pub use wasm::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("medcontext v{}", env!("CARGO_PKG_VERSION"))
}
