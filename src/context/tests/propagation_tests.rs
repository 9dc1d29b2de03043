//! Tests for the propagation state machine
//!
//! Sentences are built by hand with explicit trigger spans so that each
//! pass can be checked in isolation from the matcher.

use crate::context::propagation::{axis_mask, PropagationEngine};
use crate::context::span::Span;
use crate::context::status::ContextStatus;
use crate::context::trigger::{ContextType, Trigger, TriggerCategory, TriggerTier};

fn trigger(ctx: ContextType, cat: TriggerCategory, start: usize, end: usize) -> Trigger {
    Trigger::new(ctx, cat, Span::new(start, end))
}

fn run(sentence: &str, triggers: Vec<Trigger>) -> Vec<ContextStatus> {
    let tier: TriggerTier = triggers.into_iter().collect();
    PropagationEngine::default().propagate(sentence, &tier)
}

fn negated(statuses: &[ContextStatus], span: Span) -> Vec<bool> {
    axis_mask(&statuses[span.start..span.end], ContextType::Negated)
}

// "no pain but cough absent"
//  0  3    8   12    18
const FACING: &str = "no pain but cough absent";

// ============================================================================
// Directional Scans
// ============================================================================

#[test]
fn test_status_array_matches_sentence_length() {
    let statuses = run(FACING, vec![]);
    assert_eq!(statuses.len(), FACING.len());
    assert!(statuses.iter().all(|s| *s == ContextStatus::default()));
}

#[test]
fn test_forward_scan_stops_before_terminal() {
    let statuses = run(
        FACING,
        vec![
            trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2),
            trigger(ContextType::Negated, TriggerCategory::Terminal, 8, 11),
        ],
    );
    assert!(negated(&statuses, Span::new(2, 8)).iter().all(|n| *n));
    assert!(negated(&statuses, Span::new(8, FACING.len())).iter().all(|n| !n));
    // The trigger itself is flagged, not mutated
    assert!(statuses[0].negation_trigger && statuses[0].is_positive);
}

#[test]
fn test_backward_scan_stops_after_terminal() {
    let statuses = run(
        FACING,
        vec![
            trigger(ContextType::Negated, TriggerCategory::StartLeft, 18, 24),
            trigger(ContextType::Negated, TriggerCategory::Terminal, 8, 11),
        ],
    );
    assert!(negated(&statuses, Span::new(11, 18)).iter().all(|n| *n));
    assert!(negated(&statuses, Span::new(0, 11)).iter().all(|n| !n));
}

#[test]
fn test_facing_triggers_never_cross_terminal() {
    let statuses = run(
        FACING,
        vec![
            trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2),
            trigger(ContextType::Negated, TriggerCategory::Terminal, 8, 11),
            trigger(ContextType::Negated, TriggerCategory::StartLeft, 18, 24),
        ],
    );
    for status in &statuses[8..11] {
        assert!(status.is_positive);
        assert!(status.negation_terminal);
    }
    assert!(negated(&statuses, Span::new(3, 7)).iter().all(|n| *n));
    assert!(negated(&statuses, Span::new(12, 17)).iter().all(|n| *n));
}

#[test]
fn test_terminal_of_other_axis_does_not_stop_scan() {
    let statuses = run(
        FACING,
        vec![
            trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2),
            trigger(ContextType::Historical, TriggerCategory::Terminal, 8, 11),
        ],
    );
    assert!(negated(&statuses, Span::new(2, FACING.len())).iter().all(|n| *n));
    assert!(statuses.iter().all(|s| s.is_present));
}

#[test]
fn test_scan_stops_at_same_axis_trigger() {
    // Triggers are processed in order, so [8,10) is flagged before [0,2) scans
    let sentence = "no pain no cough";
    let tier: TriggerTier = vec![
        trigger(ContextType::Negated, TriggerCategory::StartRight, 8, 10),
        trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2),
    ]
    .into_iter()
    .collect();
    let statuses = PropagationEngine::default().propagate(sentence, &tier);
    assert!(statuses[8].negation_trigger);
    assert!(statuses[8].is_positive);
    assert!(!statuses[12].is_positive);
}

// ============================================================================
// Pseudo, Assertion Axis, Window
// ============================================================================

#[test]
fn test_pseudo_covered_trigger_is_skipped() {
    let sentence = "no change in fever";
    let statuses = run(
        sentence,
        vec![
            Trigger::pseudo(Span::new(0, 9)),
            trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2),
        ],
    );
    assert!(statuses.iter().all(|s| s.is_positive && !s.negation_trigger));
    assert!(statuses[0].is_pseudo && !statuses[10].is_pseudo);
}

#[test]
fn test_possible_stops_at_hypothetical_marker() {
    // "possible flu if fever"
    let sentence = "possible flu if fever";
    let statuses = run(
        sentence,
        vec![
            trigger(ContextType::Possible, TriggerCategory::StartRight, 0, 8),
            trigger(ContextType::Hypothetical, TriggerCategory::Terminal, 13, 15),
        ],
    );
    assert!(!statuses[9].is_asserted);
    assert!(statuses[13].is_asserted);
    assert!(statuses[16].is_asserted);
}

#[test]
fn test_hypothetical_sets_asserted_false_present_true() {
    let sentence = "history of asthma if wheezing";
    let statuses = run(
        sentence,
        vec![
            trigger(ContextType::Historical, TriggerCategory::StartRight, 0, 10),
            trigger(ContextType::Hypothetical, TriggerCategory::StartRight, 18, 20),
        ],
    );
    assert!(!statuses[11].is_present && statuses[11].is_asserted);
    let wheezing = &statuses[21];
    assert!(!wheezing.is_asserted);
    assert!(wheezing.is_present);
}

#[test]
fn test_word_window_limits_scan() {
    let sentence = "no a b c d";
    let tier: TriggerTier = vec![trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 2)]
        .into_iter()
        .collect();
    let statuses = PropagationEngine::new(Some(2)).propagate(sentence, &tier);
    assert!(!statuses[3].is_positive); // a
    assert!(!statuses[5].is_positive); // b
    assert!(statuses[7].is_positive); // c
    assert!(statuses[9].is_positive); // d

    let unbounded = PropagationEngine::new(None).propagate(sentence, &tier);
    assert!(!unbounded[9].is_positive);
}

#[test]
fn test_trigger_past_sentence_end_is_clamped() {
    let statuses = run("no", vec![trigger(ContextType::Negated, TriggerCategory::StartRight, 0, 5)]);
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.negation_trigger));
}
