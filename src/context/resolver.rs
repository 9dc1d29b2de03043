//! Priority resolution - merges trigger tiers so higher tiers dominate
//!
//! Tiers arrive lowest-priority-first. Walking them from the top, a trigger
//! survives only if it collides with nothing from a strictly higher tier.
//! Every trigger of a tier, kept or not, is then indexed before the next
//! tier down is examined, so same-tier triggers never suppress each other.

use tracing::trace;

use super::interval::IntervalIndex;
use super::trigger::TriggerTier;

pub fn resolve_priority(mut tiers: Vec<TriggerTier>) -> TriggerTier {
    if tiers.len() <= 1 {
        return tiers.pop().unwrap_or_default();
    }

    let capacity = tiers.iter().map(|t| t.len()).sum();
    let mut index = IntervalIndex::with_capacity(capacity);
    let mut merged = TriggerTier::new();

    for (rank, tier) in tiers.iter().enumerate().rev() {
        for trigger in tier.iter() {
            if index.collides(&trigger.span) {
                trace!(
                    tier = rank,
                    start = trigger.start(),
                    end = trigger.end(),
                    category = trigger.category.as_str(),
                    "suppressed by higher tier"
                );
                continue;
            }
            merged.push(*trigger);
        }
        for trigger in tier.iter() {
            index.insert(trigger.span);
        }
    }

    merged
}
