//! Trigger types: context axes, propagation categories, and per-tier trigger sets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::span::Span;

// ==================== TYPE DEFINITIONS ====================

/// The five ConText axes a trigger can modify
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextType {
    Negated,
    Possible,
    Hypothetical,
    Historical,
    Experiencer,
}

impl ContextType {
    pub const ALL: [ContextType; 5] = [
        ContextType::Negated,
        ContextType::Possible,
        ContextType::Hypothetical,
        ContextType::Historical,
        ContextType::Experiencer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::Negated => "NEGATED",
            ContextType::Possible => "POSSIBLE",
            ContextType::Hypothetical => "HYPOTHETICAL",
            ContextType::Historical => "HISTORICAL",
            ContextType::Experiencer => "EXPERIENCER",
        }
    }
}

/// How a trigger participates in propagation. The category fixes direction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerCategory {
    /// Looks like a trigger but must not activate propagation
    Pseudo,
    /// Halts propagation of its axis
    Terminal,
    /// Propagates towards the end of the sentence
    StartRight,
    /// Propagates towards the start of the sentence
    StartLeft,
}

impl TriggerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Pseudo => "PSEUDO",
            TriggerCategory::Terminal => "TERMINAL",
            TriggerCategory::StartRight => "START_RIGHT",
            TriggerCategory::StartLeft => "START_LEFT",
        }
    }
}

/// A located cue. `context` is `None` exactly when `category` is `Pseudo`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Trigger {
    pub category: TriggerCategory,
    pub context: Option<ContextType>,
    pub span: Span,
}

impl Trigger {
    pub fn pseudo(span: Span) -> Self {
        Self {
            category: TriggerCategory::Pseudo,
            context: None,
            span,
        }
    }

    /// A non-pseudo trigger. Passing `TriggerCategory::Pseudo` yields a pseudo
    /// trigger and drops `context`.
    pub fn new(context: ContextType, category: TriggerCategory, span: Span) -> Self {
        if category == TriggerCategory::Pseudo {
            return Self::pseudo(span);
        }
        Self {
            category,
            context: Some(context),
            span,
        }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }
}

// ==================== TRIGGER TIER ====================

/// Triggers found for one sentence at one priority level, grouped by category
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TriggerTier {
    by_category: BTreeMap<TriggerCategory, Vec<Trigger>>,
}

impl TriggerTier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trigger: Trigger) {
        self.by_category
            .entry(trigger.category)
            .or_default()
            .push(trigger);
    }

    pub fn extend<I: IntoIterator<Item = Trigger>>(&mut self, triggers: I) {
        for trigger in triggers {
            self.push(trigger);
        }
    }

    /// Triggers of one category, in insertion order
    pub fn get(&self, category: TriggerCategory) -> &[Trigger] {
        self.by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All triggers, category by category
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.by_category.values().flatten()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&TriggerCategory, &Vec<Trigger>)> {
        self.by_category.iter()
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Trigger> for TriggerTier {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        let mut tier = TriggerTier::new();
        tier.extend(iter);
        tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_drops_context() {
        let t = Trigger::new(ContextType::Negated, TriggerCategory::Pseudo, Span::new(0, 2));
        assert_eq!(t.context, None);
        assert_eq!(t.category, TriggerCategory::Pseudo);
    }

    #[test]
    fn test_tier_groups_by_category() {
        let tier: TriggerTier = vec![
            Trigger::new(ContextType::Negated, TriggerCategory::StartRight, Span::new(0, 2)),
            Trigger::pseudo(Span::new(0, 12)),
            Trigger::new(ContextType::Historical, TriggerCategory::StartRight, Span::new(5, 9)),
        ]
        .into_iter()
        .collect();

        assert_eq!(tier.len(), 3);
        assert_eq!(tier.get(TriggerCategory::StartRight).len(), 2);
        assert_eq!(tier.get(TriggerCategory::Pseudo).len(), 1);
        assert!(tier.get(TriggerCategory::Terminal).is_empty());
        // Category order is Pseudo, Terminal, StartRight, StartLeft
        assert_eq!(tier.iter().next().map(|t| t.category), Some(TriggerCategory::Pseudo));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TriggerCategory::StartRight).unwrap();
        assert_eq!(json, "\"START_RIGHT\"");
        let ctx: ContextType = serde_json::from_str("\"EXPERIENCER\"").unwrap();
        assert_eq!(ctx, ContextType::Experiencer);
    }
}
