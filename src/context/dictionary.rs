//! TriggerDictionary - prioritised tiers of ConText cues
//!
//! Each tier pairs an Aho-Corasick keyword automaton with a fixed battery of
//! category regexes. Tiers are kept lowest-priority-first.
//!
//! # Features
//! - ASCII case-insensitive keyword matching with overlapping hits
//! - Rows sharing a phrase are merged into one automaton pattern
//! - JSON loading with load-time validation of every row and regex
//! - Built-in two-tier clinical lexicon via [`TriggerDictionary::clinical`]

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::lexicon;
use super::trigger::{ContextType, TriggerCategory};
use crate::error::DictionaryError;

// ==================== TYPE DEFINITIONS ====================

/// One keyword phrase and every `(category, context)` it expands into
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordRule {
    pub phrase: String,
    pub triggers: BTreeMap<TriggerCategory, BTreeSet<ContextType>>,
}

/// What a regex slot emits for each match
type Emit = (TriggerCategory, Option<ContextType>);

/// A named regex slot in the battery
#[derive(Debug)]
pub struct PatternSlot {
    pub name: &'static str,
    pub emits: &'static [Emit],
}

use ContextType::*;
use TriggerCategory::*;

/// Every regex slot, in the order the matcher runs them
pub const PATTERN_SLOTS: &[PatternSlot] = &[
    PatternSlot { name: "pseudo", emits: &[(Pseudo, None)] },
    PatternSlot { name: "negation_pre", emits: &[(StartRight, Some(Negated))] },
    PatternSlot { name: "negation_post", emits: &[(StartLeft, Some(Negated))] },
    PatternSlot { name: "negation_end", emits: &[(Terminal, Some(Negated))] },
    PatternSlot { name: "possibility_pre", emits: &[(StartRight, Some(Possible))] },
    PatternSlot { name: "possibility_post", emits: &[(StartLeft, Some(Possible))] },
    PatternSlot { name: "experiencer_pre", emits: &[(StartRight, Some(Experiencer))] },
    PatternSlot { name: "experiencer_post", emits: &[(StartLeft, Some(Experiencer))] },
    PatternSlot { name: "experiencer_end", emits: &[(Terminal, Some(Experiencer))] },
    PatternSlot { name: "hypothetical_pre", emits: &[(StartRight, Some(Hypothetical))] },
    PatternSlot { name: "hypothetical_end", emits: &[(Terminal, Some(Hypothetical))] },
    PatternSlot { name: "historical_pre", emits: &[(StartRight, Some(Historical))] },
    PatternSlot { name: "historical_post", emits: &[(StartLeft, Some(Historical))] },
    PatternSlot { name: "historical_end", emits: &[(Terminal, Some(Historical))] },
    PatternSlot {
        name: "hypothetical_experiencer_end",
        emits: &[(Terminal, Some(Hypothetical)), (Terminal, Some(Experiencer))],
    },
    PatternSlot {
        name: "historical_experiencer_end",
        emits: &[(Terminal, Some(Historical)), (Terminal, Some(Experiencer))],
    },
    PatternSlot { name: "time_for", emits: &[(StartRight, Some(Historical))] },
    PatternSlot { name: "time", emits: &[(StartRight, Some(Historical))] },
    PatternSlot { name: "time_since", emits: &[(StartLeft, Some(Historical))] },
];

/// Compiled regex battery of one tier, in slot order
#[derive(Debug, Default, Clone)]
pub struct PatternBattery {
    compiled: Vec<(&'static PatternSlot, Regex)>,
}

impl PatternBattery {
    pub fn compile(tier: u32, defs: &PatternDefs) -> Result<Self, DictionaryError> {
        let mut compiled = Vec::new();
        for slot in PATTERN_SLOTS {
            let Some(source) = defs.get(slot.name) else {
                continue;
            };
            let regex = RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|source| DictionaryError::Regex {
                    tier,
                    slot: slot.name,
                    source,
                })?;
            compiled.push((slot, regex));
        }
        Ok(Self { compiled })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static PatternSlot, &Regex)> {
        self.compiled.iter().map(|(slot, regex)| (*slot, regex))
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// One priority level: keyword automaton plus regex battery
#[derive(Debug, Clone)]
pub struct DictionaryTier {
    pub priority: u32,
    pub(crate) automaton: Option<AhoCorasick>,
    pub(crate) keywords: Vec<KeywordRule>,
    pub(crate) patterns: PatternBattery,
}

impl DictionaryTier {
    /// Build a tier from rows and regex definitions, validating both
    pub fn build(priority: u32, rules: &[RuleDef], patterns: &PatternDefs) -> Result<Self, DictionaryError> {
        let mut keywords: Vec<KeywordRule> = Vec::new();
        let mut by_phrase: HashMap<String, usize> = HashMap::new();

        for rule in rules {
            let phrase = rule.phrase.trim().to_lowercase();
            if phrase.is_empty() {
                return Err(DictionaryError::EmptyPhrase { tier: priority });
            }
            for (category, contexts) in &rule.triggers {
                if *category != Pseudo && contexts.is_empty() {
                    return Err(DictionaryError::EmptyContexts {
                        tier: priority,
                        phrase,
                        category: category.as_str(),
                    });
                }
            }

            let at = *by_phrase.entry(phrase.clone()).or_insert_with(|| {
                keywords.push(KeywordRule {
                    phrase,
                    triggers: BTreeMap::new(),
                });
                keywords.len() - 1
            });
            let merged = &mut keywords[at].triggers;
            for (category, contexts) in &rule.triggers {
                let entry = merged.entry(*category).or_default();
                if *category != Pseudo {
                    entry.extend(contexts.iter().copied());
                }
            }
        }

        let automaton = if keywords.is_empty() {
            None
        } else {
            let phrases: Vec<&str> = keywords.iter().map(|k| k.phrase.as_str()).collect();
            let ac = AhoCorasickBuilder::new()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&phrases)
                .map_err(|e| DictionaryError::Automaton {
                    tier: priority,
                    message: e.to_string(),
                })?;
            Some(ac)
        };

        let patterns = PatternBattery::compile(priority, patterns)?;

        debug!(
            tier = priority,
            keywords = keywords.len(),
            patterns = patterns.len(),
            "built dictionary tier"
        );

        Ok(Self {
            priority,
            automaton,
            keywords,
            patterns,
        })
    }

    /// Build a tier from lexicon phrase groups
    pub fn from_groups(
        priority: u32,
        pseudo: &[&str],
        groups: &[lexicon::PhraseGroup],
        patterns: &PatternDefs,
    ) -> Result<Self, DictionaryError> {
        let mut rules: Vec<RuleDef> = pseudo.iter().map(|p| RuleDef::pseudo(p)).collect();
        for (phrases, category, contexts) in groups {
            for phrase in phrases.iter() {
                rules.push(RuleDef::new(phrase, *category, contexts));
            }
        }
        Self::build(priority, &rules, patterns)
    }

    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }

    pub fn patterns(&self) -> &PatternBattery {
        &self.patterns
    }
}

// ==================== DICTIONARY ====================

/// Ordered tiers, lowest priority first. Read-only once built.
#[derive(Debug, Clone)]
pub struct TriggerDictionary {
    tiers: Vec<DictionaryTier>,
}

impl TriggerDictionary {
    pub fn new(mut tiers: Vec<DictionaryTier>) -> Self {
        tiers.sort_by_key(|t| t.priority);
        Self { tiers }
    }

    /// Load from the JSON dictionary format
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let def: DictionaryDef = serde_json::from_str(json)?;
        Self::from_def(&def)
    }

    pub fn from_def(def: &DictionaryDef) -> Result<Self, DictionaryError> {
        let tiers = def
            .tiers
            .iter()
            .map(|t| DictionaryTier::build(t.priority, &t.rules, &t.patterns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tiers))
    }

    /// The built-in two-tier clinical lexicon
    pub fn clinical() -> Result<Self, DictionaryError> {
        let tier1 = DictionaryTier::from_groups(
            lexicon::TIER_1_PRIORITY,
            &[],
            lexicon::TIER_1_GROUPS,
            &PatternDefs::clinical(),
        )?;
        let tier2 = DictionaryTier::from_groups(
            lexicon::TIER_2_PRIORITY,
            lexicon::TIER_2_PSEUDO,
            lexicon::TIER_2_GROUPS,
            &PatternDefs::default(),
        )?;
        Ok(Self::new(vec![tier1, tier2]))
    }

    pub fn tiers(&self) -> &[DictionaryTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

// ==================== JSON DEFINITIONS ====================

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DictionaryDef {
    pub tiers: Vec<TierDef>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TierDef {
    pub priority: u32,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
    #[serde(default)]
    pub patterns: PatternDefs,
}

/// `{"phrase": "no", "triggers": {"START_RIGHT": ["NEGATED"]}}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RuleDef {
    pub phrase: String,
    pub triggers: BTreeMap<TriggerCategory, Vec<ContextType>>,
}

impl RuleDef {
    pub fn new(phrase: &str, category: TriggerCategory, contexts: &[ContextType]) -> Self {
        let mut triggers = BTreeMap::new();
        triggers.insert(category, contexts.to_vec());
        Self {
            phrase: phrase.to_string(),
            triggers,
        }
    }

    pub fn pseudo(phrase: &str) -> Self {
        Self::new(phrase, Pseudo, &[])
    }
}

/// Regex sources keyed by slot name. Absent slots are skipped.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PatternDefs {
    pub pseudo: Option<String>,
    pub negation_pre: Option<String>,
    pub negation_post: Option<String>,
    pub negation_end: Option<String>,
    pub possibility_pre: Option<String>,
    pub possibility_post: Option<String>,
    pub experiencer_pre: Option<String>,
    pub experiencer_post: Option<String>,
    pub experiencer_end: Option<String>,
    pub hypothetical_pre: Option<String>,
    pub hypothetical_end: Option<String>,
    pub historical_pre: Option<String>,
    pub historical_post: Option<String>,
    pub historical_end: Option<String>,
    pub hypothetical_experiencer_end: Option<String>,
    pub historical_experiencer_end: Option<String>,
    pub time_for: Option<String>,
    pub time: Option<String>,
    pub time_since: Option<String>,
}

impl PatternDefs {
    pub fn get(&self, slot: &str) -> Option<&str> {
        let source = match slot {
            "pseudo" => &self.pseudo,
            "negation_pre" => &self.negation_pre,
            "negation_post" => &self.negation_post,
            "negation_end" => &self.negation_end,
            "possibility_pre" => &self.possibility_pre,
            "possibility_post" => &self.possibility_post,
            "experiencer_pre" => &self.experiencer_pre,
            "experiencer_post" => &self.experiencer_post,
            "experiencer_end" => &self.experiencer_end,
            "hypothetical_pre" => &self.hypothetical_pre,
            "hypothetical_end" => &self.hypothetical_end,
            "historical_pre" => &self.historical_pre,
            "historical_post" => &self.historical_post,
            "historical_end" => &self.historical_end,
            "hypothetical_experiencer_end" => &self.hypothetical_experiencer_end,
            "historical_experiencer_end" => &self.historical_experiencer_end,
            "time_for" => &self.time_for,
            "time" => &self.time,
            "time_since" => &self.time_since,
            _ => return None,
        };
        source.as_deref()
    }

    /// The built-in clinical regex battery
    pub fn clinical() -> Self {
        Self {
            pseudo: Some(lexicon::PSEUDO.to_string()),
            negation_pre: Some(lexicon::NEGATION_PRE.to_string()),
            negation_post: Some(lexicon::NEGATION_POST.to_string()),
            negation_end: Some(lexicon::NEGATION_END.to_string()),
            possibility_pre: Some(lexicon::POSSIBILITY_PRE.to_string()),
            possibility_post: Some(lexicon::POSSIBILITY_POST.to_string()),
            experiencer_pre: Some(lexicon::EXPERIENCER_PRE.to_string()),
            experiencer_post: Some(lexicon::EXPERIENCER_POST.to_string()),
            experiencer_end: Some(lexicon::EXPERIENCER_END.to_string()),
            hypothetical_pre: Some(lexicon::HYPOTHETICAL_PRE.to_string()),
            hypothetical_end: Some(lexicon::HYPOTHETICAL_END.to_string()),
            historical_pre: Some(lexicon::HISTORICAL_PRE.to_string()),
            historical_post: Some(lexicon::HISTORICAL_POST.to_string()),
            historical_end: Some(lexicon::HISTORICAL_END.to_string()),
            hypothetical_experiencer_end: Some(lexicon::HYPOTHETICAL_EXPERIENCER_END.to_string()),
            historical_experiencer_end: Some(lexicon::HISTORICAL_EXPERIENCER_END.to_string()),
            time_for: Some(lexicon::time_for()),
            time: Some(lexicon::TIME.to_string()),
            time_since: Some(lexicon::time_since()),
        }
    }
}
