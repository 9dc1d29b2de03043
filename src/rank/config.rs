//! Scoring configuration: context weights and ranking parameters
//!
//! `ContextWeights` has no serde defaults. Every one of its twelve weights
//! must be present in the JSON, so a missing field fails at load time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Context Weights
// =============================================================================

/// Weight pair chosen by the query side: `light` when the query is
/// unmodified on the axis, `heavy` when it is modified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradedWeight {
    pub light: f64,
    pub heavy: f64,
}

impl GradedWeight {
    pub const fn new(light: f64, heavy: f64) -> Self {
        Self { light, heavy }
    }

    /// `light` if the query side is unmodified, else `heavy`
    #[inline]
    pub fn pick(&self, query_unmodified: bool) -> f64 {
        if query_unmodified {
            self.light
        } else {
            self.heavy
        }
    }
}

/// One weight per context axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisWeights {
    pub negation: f64,
    pub subject: f64,
    pub temporal: GradedWeight,
    pub assertion: GradedWeight,
}

/// The twelve match / mismatch weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextWeights {
    #[serde(rename = "match")]
    pub matched: AxisWeights,
    #[serde(rename = "mismatch")]
    pub mismatched: AxisWeights,
}

impl Default for ContextWeights {
    fn default() -> Self {
        Self {
            matched: AxisWeights {
                negation: 1.0,
                subject: 1.0,
                temporal: GradedWeight::new(1.0, 1.25),
                assertion: GradedWeight::new(1.0, 1.25),
            },
            mismatched: AxisWeights {
                negation: 0.0,
                subject: 0.0,
                temporal: GradedWeight::new(0.75, 0.25),
                assertion: GradedWeight::new(0.75, 0.25),
            },
        }
    }
}

impl ContextWeights {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let weights: Self = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Every weight must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// All twelve weights with their configuration names
    pub fn named(&self) -> [(&'static str, f64); 12] {
        let (m, x) = (&self.matched, &self.mismatched);
        [
            ("match.negation", m.negation),
            ("match.subject", m.subject),
            ("match.temporal.light", m.temporal.light),
            ("match.temporal.heavy", m.temporal.heavy),
            ("match.assertion.light", m.assertion.light),
            ("match.assertion.heavy", m.assertion.heavy),
            ("mismatch.negation", x.negation),
            ("mismatch.subject", x.subject),
            ("mismatch.temporal.light", x.temporal.light),
            ("mismatch.temporal.heavy", x.temporal.heavy),
            ("mismatch.assertion.light", x.assertion.light),
            ("mismatch.assertion.heavy", x.assertion.heavy),
        ]
    }

    /// Weights that ignore the temporal axis
    pub fn without_temporal(mut self) -> Self {
        self.matched.temporal = GradedWeight::new(1.0, 1.0);
        self.mismatched.temporal = GradedWeight::new(1.0, 1.0);
        self
    }
}

// =============================================================================
// Ranking Configuration
// =============================================================================

fn default_k1() -> f64 {
    1.2
}

fn default_b() -> f64 {
    0.75
}

fn default_true() -> bool {
    true
}

/// BM25 parameters plus context weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Term saturation. Default: 1.2
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Length normalisation. Default: 0.75
    #[serde(default = "default_b")]
    pub b: f64,
    /// When false every context multiplier is 1
    #[serde(default = "default_true")]
    pub context_enabled: bool,
    #[serde(default)]
    pub weights: ContextWeights,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            context_enabled: true,
            weights: ContextWeights::default(),
        }
    }
}

impl RankConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.weights.validate()?;
        if !config.k1.is_finite() || config.k1 < 0.0 {
            return Err(ConfigError::InvalidWeight { name: "k1", value: config.k1 });
        }
        if !(0.0..=1.0).contains(&config.b) {
            return Err(ConfigError::InvalidWeight { name: "b", value: config.b });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "match": {"negation": 1, "subject": 1,
                  "temporal": {"light": 1, "heavy": 1.25},
                  "assertion": {"light": 1, "heavy": 1.25}},
        "mismatch": {"negation": 0, "subject": 0,
                     "temporal": {"light": 0.75, "heavy": 0.25},
                     "assertion": {"light": 0.75, "heavy": 0.25}}
    }"#;

    #[test]
    fn test_full_weights_load() {
        assert_eq!(ContextWeights::from_json(FULL).unwrap(), ContextWeights::default());
    }

    #[test]
    fn test_missing_weight_is_load_error() {
        let missing = FULL.replace(r#""subject": 0,"#, "");
        assert!(matches!(ContextWeights::from_json(&missing), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let negative = FULL.replace(r#""negation": 0,"#, r#""negation": -1,"#);
        match ContextWeights::from_json(&negative) {
            Err(ConfigError::InvalidWeight { name, value }) => {
                assert_eq!(name, "mismatch.negation");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn test_rank_config_defaults() {
        let config = RankConfig::from_json(r#"{"context_enabled": false}"#).unwrap();
        assert!(!config.context_enabled);
        assert_eq!(config.k1, 1.2);
        assert_eq!(config.weights, ContextWeights::default());
        assert!(RankConfig::from_json(r#"{"b": 2.0}"#).is_err());
    }
}
