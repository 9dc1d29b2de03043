//! Payload assignment - samples sentence status at token spans

use serde::{Deserialize, Serialize};

use super::payload::Payload;
use super::span::Span;
use super::status::ContextStatus;

/// How a token's payload is derived from the bytes it covers
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenSampling {
    /// Status of the token's first byte only
    #[default]
    FirstByte,
    /// Fold every byte: context booleans ANDed, markers ORed
    Merged,
}

/// One payload per token.
///
/// `tokens` are document offsets; `sentence_start` is the document offset of
/// `statuses[0]`.
///
/// # Panics
/// If a token starts outside the sentence. Callers must pass only the
/// tokens of this sentence.
pub fn assign_payloads(
    statuses: &[ContextStatus],
    sentence_start: usize,
    tokens: &[Span],
    sampling: TokenSampling,
) -> Vec<Payload> {
    tokens
        .iter()
        .map(|token| {
            let first = token
                .start
                .checked_sub(sentence_start)
                .filter(|offset| *offset < statuses.len());
            let Some(first) = first else {
                panic!(
                    "token [{}, {}) starts outside sentence [{}, {})",
                    token.start,
                    token.end,
                    sentence_start,
                    sentence_start + statuses.len()
                );
            };

            match sampling {
                TokenSampling::FirstByte => Payload::from_status(&statuses[first]),
                TokenSampling::Merged => {
                    let last = (token.end - sentence_start).clamp(first + 1, statuses.len());
                    statuses[first..last]
                        .iter()
                        .map(Payload::from_status)
                        .fold(Payload::default(), merge)
                }
            }
        })
        .collect()
}

fn merge(acc: Payload, next: Payload) -> Payload {
    Payload {
        positive: acc.positive && next.positive,
        asserted: acc.asserted && next.asserted,
        present: acc.present && next.present,
        patient_is_subject: acc.patient_is_subject && next.patient_is_subject,
        negation_trigger: acc.negation_trigger || next.negation_trigger,
        assertion_trigger: acc.assertion_trigger || next.assertion_trigger,
        historical_trigger: acc.historical_trigger || next.historical_trigger,
        experiencer_trigger: acc.experiencer_trigger || next.experiencer_trigger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::trigger::ContextType;

    fn statuses(len: usize) -> Vec<ContextStatus> {
        vec![ContextStatus::default(); len]
    }

    #[test]
    fn test_first_byte_ignores_tail() {
        let mut s = statuses(10);
        s[7].apply(ContextType::Negated);
        let tokens = [Span::new(100, 104), Span::new(105, 110)];

        let payloads = assign_payloads(&s, 100, &tokens, TokenSampling::FirstByte);
        assert!(payloads[0].positive);
        assert!(payloads[1].positive);

        let merged = assign_payloads(&s, 100, &tokens, TokenSampling::Merged);
        assert!(merged[0].positive);
        assert!(!merged[1].positive);
    }

    #[test]
    fn test_markers_follow_trigger_bytes() {
        let mut s = statuses(4);
        s[0].set_trigger(ContextType::Hypothetical);
        s[2].set_terminal(ContextType::Experiencer);
        let payloads = assign_payloads(&s, 0, &[Span::new(0, 2), Span::new(2, 4)], TokenSampling::FirstByte);
        assert!(payloads[0].assertion_trigger);
        assert!(!payloads[0].experiencer_trigger);
        assert!(payloads[1].experiencer_trigger);
        assert!(payloads[1].is_query_term());
    }

    #[test]
    #[should_panic(expected = "starts outside sentence")]
    fn test_token_outside_sentence_panics() {
        let s = statuses(5);
        assign_payloads(&s, 10, &[Span::new(3, 6)], TokenSampling::FirstByte);
    }
}
