//! Trigger matching - runs one dictionary tier over one sentence

use tracing::warn;

use super::dictionary::DictionaryTier;
use super::span::Span;
use super::trigger::{Trigger, TriggerCategory, TriggerTier};

impl DictionaryTier {
    /// Find every keyword and regex trigger of this tier in `sentence`.
    ///
    /// Offsets are relative to the sentence. Overlapping hits are all kept;
    /// pruning happens later in priority resolution.
    pub fn find_triggers(&self, sentence: &str) -> TriggerTier {
        let mut tier = TriggerTier::new();

        if let Some(automaton) = &self.automaton {
            for hit in automaton.find_overlapping_iter(sentence) {
                if !on_word_boundary(sentence, hit.start(), hit.end()) {
                    continue;
                }
                let span = Span::new(hit.start(), hit.end());
                let rule = &self.keywords[hit.pattern().as_usize()];
                for (category, contexts) in &rule.triggers {
                    if *category == TriggerCategory::Pseudo {
                        tier.push(Trigger::pseudo(span));
                        continue;
                    }
                    for context in contexts {
                        tier.push(Trigger::new(*context, *category, span));
                    }
                }
            }
        }

        for (slot, regex) in self.patterns.iter() {
            for m in regex.find_iter(sentence) {
                if m.start() == m.end() {
                    warn!(slot = slot.name, offset = m.start(), "skipping empty pattern match");
                    continue;
                }
                let span = Span::new(m.start(), m.end());
                for (category, context) in slot.emits {
                    match context {
                        Some(context) => tier.push(Trigger::new(*context, *category, span)),
                        None => tier.push(Trigger::pseudo(span)),
                    }
                }
            }
        }

        tier
    }
}

/// True if the characters around `[start, end)` are not word characters
fn on_word_boundary(sentence: &str, start: usize, end: usize) -> bool {
    let before = sentence[..start].chars().next_back();
    let after = sentence[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::dictionary::{PatternDefs, RuleDef};
    use crate::context::trigger::ContextType;

    fn tier(rules: &[RuleDef], patterns: PatternDefs) -> DictionaryTier {
        DictionaryTier::build(1, rules, &patterns).unwrap()
    }

    #[test]
    fn test_keyword_expands_per_context() {
        let t = tier(
            &[RuleDef::new(
                "fmhx",
                TriggerCategory::StartRight,
                &[ContextType::Experiencer, ContextType::Historical],
            )],
            PatternDefs::default(),
        );
        let found = t.find_triggers("possible FMHX gerd");
        let right = found.get(TriggerCategory::StartRight);
        assert_eq!(right.len(), 2);
        assert!(right.iter().all(|tr| tr.span == Span::new(9, 13)));
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        let t = tier(
            &[RuleDef::new("no", TriggerCategory::StartRight, &[ContextType::Negated])],
            PatternDefs::default(),
        );
        assert!(t.find_triggers("normal nodes noted").is_empty());
        assert_eq!(t.find_triggers("No, none").len(), 1);
    }

    #[test]
    fn test_keyword_next_to_wide_punctuation() {
        let t = tier(
            &[
                RuleDef::new("no", TriggerCategory::StartRight, &[ContextType::Negated]),
                RuleDef::new("denies", TriggerCategory::StartRight, &[ContextType::Negated]),
            ],
            PatternDefs::default(),
        );
        let found = t.find_triggers("Patient denies\u{00A0}fever");
        assert_eq!(found.get(TriggerCategory::StartRight)[0].span, Span::new(8, 14));
        assert_eq!(t.find_triggers("Cough \u{2014}no fever").len(), 1);
        assert_eq!(t.find_triggers("\u{201C}no\u{201D} pain").len(), 1);
        assert!(t.find_triggers("caf\u{00E9}no").is_empty());
    }

    #[test]
    fn test_pseudo_keyword_has_no_context() {
        let t = tier(&[RuleDef::pseudo("no change")], PatternDefs::default());
        let found = t.find_triggers("there is no change in size");
        let pseudo = found.get(TriggerCategory::Pseudo);
        assert_eq!(pseudo.len(), 1);
        assert_eq!(pseudo[0].context, None);
    }

    #[test]
    fn test_overlapping_keywords_all_reported() {
        let t = tier(
            &[
                RuleDef::new("history of", TriggerCategory::StartRight, &[ContextType::Historical]),
                RuleDef::new("family history of", TriggerCategory::StartRight, &[ContextType::Experiencer]),
            ],
            PatternDefs::default(),
        );
        assert_eq!(t.find_triggers("family history of asthma").len(), 2);
    }

    #[test]
    fn test_combined_terminal_pattern_emits_two() {
        let t = tier(
            &[],
            PatternDefs {
                historical_experiencer_end: Some(r"\bpatient\s+now\b".to_string()),
                time_since: Some(r"\b\d+\s+years?\s+ago\b".to_string()),
                ..Default::default()
            },
        );
        let found = t.find_triggers("asthma 3 years ago and the patient now reports");
        let terminals = found.get(TriggerCategory::Terminal);
        assert_eq!(terminals.len(), 2);
        assert_eq!(terminals[0].context, Some(ContextType::Historical));
        assert_eq!(terminals[1].context, Some(ContextType::Experiencer));
        let left = found.get(TriggerCategory::StartLeft);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].span, Span::new(7, 18));
    }
}
