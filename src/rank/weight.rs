//! Context multiplier between a query payload and an indexed payload
//!
//! Axes are combined multiplicatively. A result of 0 excludes the
//! occurrence entirely.

use serde::Serialize;

use super::config::ContextWeights;
use crate::context::Payload;

/// Multiplier for one indexed occurrence of a query term
pub fn score_multiplier(query: &Payload, index: &Payload, weights: &ContextWeights) -> f64 {
    let (m, x) = (&weights.matched, &weights.mismatched);

    let negation = if query.positive == index.positive { m.negation } else { x.negation };
    let subject = if query.patient_is_subject == index.patient_is_subject {
        m.subject
    } else {
        x.subject
    };
    let temporal = if query.present == index.present {
        m.temporal.pick(query.present)
    } else {
        x.temporal.pick(query.present)
    };
    let assertion = if query.asserted == index.asserted {
        m.assertion.pick(query.asserted)
    } else {
        x.assertion.pick(query.asserted)
    };

    negation * subject * temporal * assertion
}

/// A multiplier with a readable breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightExplanation {
    pub value: f64,
    /// False when the occurrence is excluded
    pub matched: bool,
    pub description: String,
}

pub fn explain_multiplier(query: &Payload, index: &Payload, weights: &ContextWeights) -> WeightExplanation {
    let value = score_multiplier(query, index, weights);
    let axis = |name: &str, same: bool| if same { format!("{name}=match") } else { format!("{name}=mismatch") };
    let parts = [
        axis("negation", query.positive == index.positive),
        axis("subject", query.patient_is_subject == index.patient_is_subject),
        axis("temporal", query.present == index.present),
        axis("assertion", query.asserted == index.asserted),
    ];

    if value > 0.0 {
        WeightExplanation {
            value,
            matched: true,
            description: format!("context weight {value}, query {query} vs index {index} ({})", parts.join(", ")),
        }
    } else {
        WeightExplanation {
            value,
            matched: false,
            description: format!("context excluded, query {query} vs index {index} ({})", parts.join(", ")),
        }
    }
}
