//! PropagationEngine - turns resolved triggers into per-byte context status
//!
//! # Passes
//! 1. Pseudo spans are marked
//! 2. Terminal spans are marked per axis
//! 3. `StartRight` triggers spread towards the sentence end
//! 4. `StartLeft` triggers spread towards the sentence start
//!
//! A scan stops before the first byte that is a terminal or trigger of the
//! same axis, or once the word window is exhausted.

use serde::{Deserialize, Serialize};

use super::status::ContextStatus;
use super::trigger::{ContextType, Trigger, TriggerCategory, TriggerTier};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationEngine {
    /// Maximum number of spaces a scan may cross. `None` scans to the boundary.
    pub max_window: Option<usize>,
}

#[derive(Clone, Copy)]
enum Direction {
    Right,
    Left,
}

impl PropagationEngine {
    pub fn new(max_window: Option<usize>) -> Self {
        Self { max_window }
    }

    /// One status per byte of `sentence`
    pub fn propagate(&self, sentence: &str, triggers: &TriggerTier) -> Vec<ContextStatus> {
        let bytes = sentence.as_bytes();
        let mut statuses = vec![ContextStatus::default(); bytes.len()];

        for trigger in triggers.get(TriggerCategory::Pseudo) {
            for status in covered(&mut statuses, trigger) {
                status.is_pseudo = true;
            }
        }

        for trigger in triggers.get(TriggerCategory::Terminal) {
            let Some(context) = trigger.context else { continue };
            for status in covered(&mut statuses, trigger) {
                status.set_terminal(context);
            }
        }

        for trigger in triggers.get(TriggerCategory::StartRight) {
            self.spread(bytes, &mut statuses, trigger, Direction::Right);
        }

        for trigger in triggers.get(TriggerCategory::StartLeft) {
            self.spread(bytes, &mut statuses, trigger, Direction::Left);
        }

        statuses
    }

    fn spread(&self, bytes: &[u8], statuses: &mut [ContextStatus], trigger: &Trigger, direction: Direction) {
        let Some(context) = trigger.context else { return };
        let end = trigger.end().min(statuses.len());
        let start = trigger.start();
        if start >= end {
            return;
        }
        if statuses[start].is_pseudo || statuses[end - 1].is_pseudo {
            return;
        }

        for status in &mut statuses[start..end] {
            status.set_trigger(context);
        }

        let positions: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Right => Box::new(end..statuses.len()),
            Direction::Left => Box::new((0..start).rev()),
        };

        let mut spaces = 0usize;
        for at in positions {
            if bytes[at] == b' ' {
                spaces += 1;
            }
            if let Some(window) = self.max_window {
                if spaces > window {
                    break;
                }
            }
            let status = &mut statuses[at];
            if status.blocks(context) {
                break;
            }
            status.apply(context);
        }
    }
}

fn covered<'a>(statuses: &'a mut [ContextStatus], trigger: &Trigger) -> &'a mut [ContextStatus] {
    let end = trigger.end().min(statuses.len());
    let start = trigger.start().min(end);
    &mut statuses[start..end]
}

/// Convenience for callers that only need one axis
pub fn axis_mask(statuses: &[ContextStatus], context: ContextType) -> Vec<bool> {
    statuses
        .iter()
        .map(|s| match context {
            ContextType::Negated => !s.is_positive,
            ContextType::Possible | ContextType::Hypothetical => !s.is_asserted,
            ContextType::Historical => !s.is_present,
            ContextType::Experiencer => !s.experiencer_is_patient,
        })
        .collect()
}
