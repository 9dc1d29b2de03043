//! ContextStatus - per-byte ConText state for one sentence

use serde::{Deserialize, Serialize};

use super::trigger::ContextType;

/// Context state of a single byte of a sentence.
///
/// The four context booleans start `true` and are cleared by propagation.
/// The marker flags record whether the byte sits inside a pseudo span, a
/// terminal of an axis, or a trigger of an axis.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextStatus {
    pub is_positive: bool,
    pub is_asserted: bool,
    pub is_present: bool,
    pub experiencer_is_patient: bool,

    pub is_pseudo: bool,

    pub negation_terminal: bool,
    pub possible_terminal: bool,
    pub hypothetical_terminal: bool,
    pub historical_terminal: bool,
    pub experiencer_terminal: bool,

    pub negation_trigger: bool,
    pub possible_trigger: bool,
    pub hypothetical_trigger: bool,
    pub historical_trigger: bool,
    pub experiencer_trigger: bool,
}

impl Default for ContextStatus {
    fn default() -> Self {
        Self {
            is_positive: true,
            is_asserted: true,
            is_present: true,
            experiencer_is_patient: true,
            is_pseudo: false,
            negation_terminal: false,
            possible_terminal: false,
            hypothetical_terminal: false,
            historical_terminal: false,
            experiencer_terminal: false,
            negation_trigger: false,
            possible_trigger: false,
            hypothetical_trigger: false,
            historical_trigger: false,
            experiencer_trigger: false,
        }
    }
}

impl ContextStatus {
    pub fn is_terminal(&self, context: ContextType) -> bool {
        match context {
            ContextType::Negated => self.negation_terminal,
            ContextType::Possible => self.possible_terminal,
            ContextType::Hypothetical => self.hypothetical_terminal,
            ContextType::Historical => self.historical_terminal,
            ContextType::Experiencer => self.experiencer_terminal,
        }
    }

    pub fn is_trigger(&self, context: ContextType) -> bool {
        match context {
            ContextType::Negated => self.negation_trigger,
            ContextType::Possible => self.possible_trigger,
            ContextType::Hypothetical => self.hypothetical_trigger,
            ContextType::Historical => self.historical_trigger,
            ContextType::Experiencer => self.experiencer_trigger,
        }
    }

    pub fn set_terminal(&mut self, context: ContextType) {
        match context {
            ContextType::Negated => self.negation_terminal = true,
            ContextType::Possible => self.possible_terminal = true,
            ContextType::Hypothetical => self.hypothetical_terminal = true,
            ContextType::Historical => self.historical_terminal = true,
            ContextType::Experiencer => self.experiencer_terminal = true,
        }
    }

    pub fn set_trigger(&mut self, context: ContextType) {
        match context {
            ContextType::Negated => self.negation_trigger = true,
            ContextType::Possible => self.possible_trigger = true,
            ContextType::Hypothetical => self.hypothetical_trigger = true,
            ContextType::Historical => self.historical_trigger = true,
            ContextType::Experiencer => self.experiencer_trigger = true,
        }
    }

    /// True if propagation of `context` must stop at this byte.
    ///
    /// Possible and hypothetical share the assertion axis, so each one also
    /// stops at the other's markers.
    pub fn blocks(&self, context: ContextType) -> bool {
        let own = self.is_terminal(context) || self.is_trigger(context);
        match context {
            ContextType::Possible | ContextType::Hypothetical => {
                own || self.is_terminal(ContextType::Possible)
                    || self.is_trigger(ContextType::Possible)
                    || self.is_terminal(ContextType::Hypothetical)
                    || self.is_trigger(ContextType::Hypothetical)
            }
            _ => own,
        }
    }

    /// Apply the axis mutation for `context` to this byte
    pub fn apply(&mut self, context: ContextType) {
        match context {
            ContextType::Negated => self.is_positive = false,
            ContextType::Possible => self.is_asserted = false,
            ContextType::Historical => self.is_present = false,
            ContextType::Hypothetical => {
                self.is_asserted = false;
                self.is_present = true;
            }
            ContextType::Experiencer => self.experiencer_is_patient = false,
        }
    }

    /// Negation terminal or trigger
    pub fn marks_negation(&self) -> bool {
        self.negation_terminal || self.negation_trigger
    }

    /// Possible or hypothetical terminal or trigger
    pub fn marks_assertion(&self) -> bool {
        self.possible_terminal
            || self.possible_trigger
            || self.hypothetical_terminal
            || self.hypothetical_trigger
    }

    pub fn marks_historical(&self) -> bool {
        self.historical_terminal || self.historical_trigger
    }

    pub fn marks_experiencer(&self) -> bool {
        self.experiencer_terminal || self.experiencer_trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unmodified() {
        let s = ContextStatus::default();
        assert!(s.is_positive && s.is_asserted && s.is_present && s.experiencer_is_patient);
        for ctx in ContextType::ALL {
            assert!(!s.blocks(ctx));
        }
    }

    #[test]
    fn test_assertion_axis_blocks_symmetrically() {
        let mut s = ContextStatus::default();
        s.set_terminal(ContextType::Possible);
        assert!(s.blocks(ContextType::Hypothetical));
        assert!(!s.blocks(ContextType::Negated));

        let mut s = ContextStatus::default();
        s.set_trigger(ContextType::Hypothetical);
        assert!(s.blocks(ContextType::Possible));
    }

    #[test]
    fn test_hypothetical_restores_present() {
        let mut s = ContextStatus::default();
        s.apply(ContextType::Historical);
        assert!(!s.is_present);
        s.apply(ContextType::Hypothetical);
        assert!(s.is_present);
        assert!(!s.is_asserted);
    }
}
