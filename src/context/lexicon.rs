//! Built-in clinical ConText lexicon
//!
//! Two priority tiers. Tier 1 holds single cue words and the regex battery;
//! tier 2 holds longer phrases that must win over the tier 1 words they
//! contain ("no evidence of" over "no", "family history" over "history of").
//!
//! Each group is `(phrases, category, contexts)`. A phrase listed under a
//! category with several contexts expands into one trigger per context.

use super::trigger::{ContextType, TriggerCategory};

use ContextType::*;
use TriggerCategory::*;

pub type PhraseGroup = (&'static [&'static str], TriggerCategory, &'static [ContextType]);

pub const TIER_1_PRIORITY: u32 = 1;
pub const TIER_2_PRIORITY: u32 = 2;

// ==================== TIER 1: CUE WORDS ====================

pub const TIER_1_GROUPS: &[PhraseGroup] = &[
    (
        &[
            "no", "not", "without", "denies", "denied", "deny", "denying", "never",
            "absence of", "rules out", "ruled out", "declined",
        ],
        StartRight,
        &[Negated],
    ),
    (
        &["unlikely", "free", "absent", "negative", "resolved"],
        StartLeft,
        &[Negated],
    ),
    (
        &[
            "possible", "possibly", "probable", "probably", "likely", "questionable",
            "suspicious for", "suspected", "suspect", "suspicion of", "concern for",
            "may be", "might be", "could be", "rule out", "r/o", "evaluate for",
            "suggestive of", "presumed",
        ],
        StartRight,
        &[Possible],
    ),
    (
        &[
            "if", "should", "in case", "as needed", "return if", "return for",
            "watch for", "call if", "unless",
        ],
        StartRight,
        &[Hypothetical],
    ),
    (
        &[
            "history of", "hx of", "h/o", "past", "previous", "prior", "status post",
            "s/p", "remote",
        ],
        StartRight,
        &[Historical],
    ),
    (&["fmhx", "fhx", "fh"], StartRight, &[Experiencer, Historical]),
    (
        &[
            "mother", "father", "brother", "sister", "sibling", "son", "daughter", "aunt",
            "uncle", "grandmother", "grandfather", "cousin", "parent", "parents",
            "maternal", "paternal", "wife", "husband",
        ],
        StartRight,
        &[Experiencer],
    ),
    (
        &[
            "but", "however", "although", "though", "yet", "except", "aside from",
            "apart from", "which",
        ],
        Terminal,
        &[Negated, Possible, Hypothetical, Historical, Experiencer],
    ),
    (
        &["cause of", "source of", "reason for", "etiology of", "secondary to"],
        Terminal,
        &[Negated, Possible],
    ),
    (
        &[
            "presents", "presented", "presenting", "now", "currently", "today",
            "complains", "admitted", "current",
        ],
        Terminal,
        &[Historical],
    ),
    (&["patient", "pt", "the patient", "patient's"], Terminal, &[Experiencer]),
    (&["because", "since"], Terminal, &[Hypothetical]),
];

// ==================== TIER 2: PHRASES ====================

pub const TIER_2_PSEUDO: &[&str] = &[
    "no increase",
    "no change",
    "no significant change",
    "no interval change",
    "no further",
    "not only",
    "not necessarily",
    "not certain if",
    "not certain whether",
    "without difficulty",
    "not cause",
    "gram negative",
    "not rule out",
    "not ruled out",
    "not been ruled out",
    "no definite change",
    "history and physical",
    "social history",
];

pub const TIER_2_GROUPS: &[PhraseGroup] = &[
    (
        &[
            "no evidence of", "no signs of", "no sign of", "no history of", "negative for",
            "free of", "not demonstrate", "fails to reveal", "no new",
        ],
        StartRight,
        &[Negated],
    ),
    (
        &[
            "was ruled out", "is ruled out", "are ruled out", "were ruled out",
            "been ruled out", "is negative", "was negative", "not seen", "is absent",
        ],
        StartLeft,
        &[Negated],
    ),
    (
        &["cannot rule out", "cannot exclude", "can not rule out", "differential diagnosis"],
        StartRight,
        &[Possible],
    ),
    (
        &[
            "is possible", "is suspected", "was suspected", "is questionable", "is likely",
            "is probable", "cannot be excluded", "cannot be ruled out", "is not excluded",
            "not excluded",
        ],
        StartLeft,
        &[Possible],
    ),
    (
        &["family history", "family history of", "family hx", "family medical history"],
        StartRight,
        &[Experiencer, Historical],
    ),
    (
        &["in the past", "in the remote past", "as a child"],
        StartLeft,
        &[Historical],
    ),
    (
        &["in the family", "runs in the family", "in his family", "in her family"],
        StartLeft,
        &[Experiencer],
    ),
];

// ==================== TIER 1: REGEX BATTERY ====================

const COUNT: &str = r"(?:\d+|a|an|one|two|three|four|five|six|seven|eight|nine|ten|several|many|few)";

pub const PSEUDO: &str =
    r"\b(?:no|not|without)\s+(?:any\s+)?(?:significant\s+|definite\s+|interval\s+)?(?:change|increase|decrease|improvement)s?\b";
pub const NEGATION_PRE: &str = r"\b(?:no|without)\s+(?:evidence|signs?|symptoms?|findings?)\s+of\b";
pub const NEGATION_POST: &str = r"\b(?:has|have|had)\s+(?:been\s+)?resolved\b";
pub const NEGATION_END: &str = r"\b(?:other\s+than|with\s+the\s+exception\s+of)\b";
pub const POSSIBILITY_PRE: &str = r"\bdifferential\s+(?:diagnosis\s+)?(?:includes?|of)\b";
pub const POSSIBILITY_POST: &str =
    r"\b(?:c(?:an|ould)\s*not|can't|couldn't)\s+be\s+(?:ruled\s+out|excluded)\b";
pub const EXPERIENCER_PRE: &str =
    r"\b(?:his|her|patient's|pt's)\s+(?:mother|father|brother|sister|son|daughter|aunt|uncle|grandmother|grandfather|cousin|parents?|siblings?)\b";
pub const EXPERIENCER_POST: &str = r"\bin\s+(?:his|her|the)\s+(?:mother|father|brother|sister|family)\b";
pub const EXPERIENCER_END: &str = r"\b(?:he|she)\s+(?:reports|states|denies|notes)\b";
pub const HYPOTHETICAL_PRE: &str =
    r"\b(?:if\s+(?:he|she|they)\s+(?:develops?|experiences?|has|have)|should\s+(?:he|she|they))\b";
pub const HYPOTHETICAL_END: &str = r"\b(?:in\s+the\s+meantime|otherwise)\b";
pub const HISTORICAL_PRE: &str = r"\b(?:history|hx)\s+(?:significant|notable)\s+for\b";
pub const HISTORICAL_POST: &str = r"\b(?:was|were)\s+(?:diagnosed|treated)\b";
pub const HISTORICAL_END: &str = r"\b(?:at\s+this\s+time|at\s+present|presently)\b";
pub const HYPOTHETICAL_EXPERIENCER_END: &str = r"\b(?:the\s+)?patient\s+(?:should|will|is\s+to)\b";
pub const HISTORICAL_EXPERIENCER_END: &str =
    r"\b(?:the\s+)?patient\s+(?:now|currently|presents|reports|complains)\b";
pub const TIME: &str = r"\b(?:in|during)\s+(?:19|20)\d{2}\b";

/// "3-year history of", "two week hx of"
pub fn time_for() -> String {
    format!(r"\b{COUNT}[\s-]+(?:day|week|month|year)s?[\s-]+(?:history|hx)\s+of\b")
}

/// "two years ago", "a few months ago"
pub fn time_since() -> String {
    format!(r"\b(?:a\s+)?{COUNT}\s+(?:day|week|month|year)s?\s+ago\b")
}
