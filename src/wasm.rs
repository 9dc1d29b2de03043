//! JavaScript bindings for annotation and context-aware ranking

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::context::{AnnotatedToken, ContextCortex, CortexConfig, Payload, Span, TriggerDictionary};
use crate::rank::{ContextIndex, ContextQuery, ContextRankScorer, RankConfig, RankedDocument};

#[derive(Serialize)]
struct AnnotateStats {
    token_count: usize,
    annotate_time_ms: f64,
}

#[derive(Serialize)]
struct AnnotateResult {
    tokens: Vec<AnnotatedToken>,
    stats: AnnotateStats,
}

#[derive(Serialize)]
struct SearchResult {
    results: Vec<RankedDocument>,
    search_time_ms: f64,
}

fn to_js<T: Serialize>(owner: &str, value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(v) => v,
        Err(e) => {
            web_sys::console::error_1(&format!("[{}] Serialization failed: {:?}", owner, e).into());
            JsValue::NULL
        }
    }
}

fn build_cortex(dictionary_json: Option<String>, config_json: Option<String>) -> Result<ContextCortex, JsValue> {
    let config = match config_json {
        Some(json) => CortexConfig::from_json(&json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse cortex config: {}", e)))?,
        None => CortexConfig::default(),
    };
    let dictionary = match dictionary_json {
        Some(json) => TriggerDictionary::from_json(&json),
        None => TriggerDictionary::clinical(),
    }
    .map_err(|e| JsValue::from_str(&format!("Failed to build dictionary: {}", e)))?;
    Ok(ContextCortex::new(dictionary, config))
}

// ==================== ANNOTATOR ====================

#[wasm_bindgen]
pub struct ContextAnnotator {
    cortex: ContextCortex,
}

#[wasm_bindgen]
impl ContextAnnotator {
    /// Create an annotator. Without a dictionary the built-in clinical
    /// lexicon is used.
    #[wasm_bindgen(constructor)]
    pub fn new(dictionary_json: Option<String>, config_json: Option<String>) -> Result<ContextAnnotator, JsValue> {
        Ok(Self {
            cortex: build_cortex(dictionary_json, config_json)?,
        })
    }

    /// Segment and annotate text
    #[wasm_bindgen]
    pub fn annotate(&self, text: &str) -> JsValue {
        let start = js_sys::Date::now();
        let tokens = self.cortex.annotate_text(text);
        let result = AnnotateResult {
            stats: AnnotateStats {
                token_count: tokens.len(),
                annotate_time_ms: js_sys::Date::now() - start,
            },
            tokens,
        };
        to_js("ContextAnnotator", &result)
    }

    /// Annotate with caller-supplied spans: arrays of `{ start, end }`
    #[wasm_bindgen(js_name = annotateSpans)]
    pub fn annotate_spans(&self, text: &str, sentences: JsValue, tokens: JsValue) -> Result<JsValue, JsValue> {
        let sentences: Vec<Span> = serde_wasm_bindgen::from_value(sentences)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse sentence spans: {}", e)))?;
        let tokens: Vec<Span> = serde_wasm_bindgen::from_value(tokens)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse token spans: {}", e)))?;
        let annotated = self.cortex.annotate(text, &sentences, &tokens);
        serde_wasm_bindgen::to_value(&annotated).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = encodePayload)]
    pub fn encode_payload(&self, payload: JsValue) -> Result<Vec<u8>, JsValue> {
        let payload: Payload = serde_wasm_bindgen::from_value(payload)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse payload: {}", e)))?;
        Ok(payload.encode().to_vec())
    }

    #[wasm_bindgen(js_name = decodePayload)]
    pub fn decode_payload(&self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let payload = Payload::try_from_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&payload).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

// ==================== RANKER ====================

#[wasm_bindgen]
pub struct ContextRanker {
    cortex: ContextCortex,
    index: ContextIndex,
    scorer: ContextRankScorer,
}

#[wasm_bindgen]
impl ContextRanker {
    /// Create a ranker. Dictionary and cortex config are read as in
    /// `ContextAnnotator::new`; the rank config carries BM25 and weights.
    #[wasm_bindgen(constructor)]
    pub fn new(
        dictionary_json: Option<String>,
        config_json: Option<String>,
        rank_config_json: Option<String>,
    ) -> Result<ContextRanker, JsValue> {
        let config = match rank_config_json {
            Some(json) => RankConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse rank config: {}", e)))?,
            None => RankConfig::default(),
        };
        Ok(Self {
            cortex: build_cortex(dictionary_json, config_json)?,
            index: ContextIndex::new(),
            scorer: ContextRankScorer::new(config),
        })
    }

    #[wasm_bindgen(js_name = addDocument)]
    pub fn add_document(&mut self, id: &str, text: &str) {
        self.index.add_text(&self.cortex, id, text);
    }

    #[wasm_bindgen(js_name = removeDocument)]
    pub fn remove_document(&mut self, id: &str) -> bool {
        self.index.remove_document(id)
    }

    /// Rank indexed documents against `query`, best first
    #[wasm_bindgen]
    pub fn search(&self, query: &str, limit: usize) -> JsValue {
        let start = js_sys::Date::now();
        let query = ContextQuery::analyze(&self.cortex, query);
        let mut results = self.scorer.rank(&self.index, &query);
        results.truncate(limit);
        let result = SearchResult {
            results,
            search_time_ms: js_sys::Date::now() - start,
        };
        to_js("ContextRanker", &result)
    }

    #[wasm_bindgen]
    pub fn stats(&self) -> JsValue {
        to_js("ContextRanker", &self.index.stats())
    }

    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.index.len()
    }
}
