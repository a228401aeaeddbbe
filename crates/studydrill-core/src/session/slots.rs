//! # Slot Allocator
//!
//! Converts normalized category weights plus a total item budget into an
//! exact integer allocation per category, respecting a maximum
//! single-category share and a minimum-weight floor, then hands any
//! shortfall to the categories tagged weak.

use tracing::debug;

use super::weights::{CategoryWeight, WeightReason};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Weights at or below this receive no slots at all.
pub const MIN_WEIGHT_THRESHOLD: f64 = 0.05;

/// No category may take more than this share of the total budget
/// (rounded up).
pub const MAX_CATEGORY_SHARE: f64 = 0.4;

// ============================================================================
// SLOT MAP
// ============================================================================

/// Integer slot counts per category, in allocation order.
///
/// Iteration order is the order the allocator produced, which downstream
/// selection relies on; a hash map would scramble it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    entries: Vec<(String, usize)>,
}

impl SlotMap {
    /// Slots allocated to a category, zero if absent.
    pub fn get(&self, category_id: &str) -> usize {
        self.entries
            .iter()
            .find(|(id, _)| id == category_id)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Entries in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// Sum of all allocated slots. May fall short of the requested total
    /// when the single-category cap cannot be redistributed (e.g. a lone
    /// category); callers tolerate partial fill.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add slots for a category, merging with any existing entry. Useful
    /// for hand-built allocations; [`allocate_slots`] is the normal path.
    pub fn insert(&mut self, category_id: &str, count: usize) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| id == category_id) {
            entry.1 += count;
        } else {
            self.entries.push((category_id.to_string(), count));
        }
    }
}

// ============================================================================
// ALLOCATION
// ============================================================================

/// Allocate `total_slots` across categories proportionally to weight.
///
/// Weights are processed in their given order (the weight engine emits
/// them descending). Each category gets `round(weight × total)`, floored
/// to 1 when its weight clears [`MIN_WEIGHT_THRESHOLD`], capped at
/// `ceil(total × 0.4)` and at whatever budget remains. Leftover budget
/// then goes one slot apiece to the weak-tagged categories in order.
pub fn allocate_slots(weights: &[CategoryWeight], total_slots: usize) -> SlotMap {
    let mut slots = SlotMap::default();
    if total_slots == 0 || weights.is_empty() {
        return slots;
    }

    let category_cap = (total_slots as f64 * MAX_CATEGORY_SHARE).ceil() as usize;
    let mut remaining = total_slots;

    for entry in weights {
        if remaining == 0 {
            break;
        }
        let proportional = (entry.weight * total_slots as f64).round() as usize;
        let floored = if entry.weight > MIN_WEIGHT_THRESHOLD {
            proportional.max(1)
        } else {
            0
        };
        let allocated = floored.min(category_cap).min(remaining);
        if allocated > 0 {
            slots.insert(&entry.category_id, allocated);
            remaining -= allocated;
        }
    }

    // Shortfall goes to the weak categories, one slot each
    if remaining > 0 {
        for entry in weights.iter().filter(|w| w.reason == WeightReason::Weak) {
            if remaining == 0 {
                break;
            }
            slots.insert(&entry.category_id, 1);
            remaining -= 1;
        }
    }

    debug!(
        requested = total_slots,
        allocated = slots.total(),
        categories = slots.len(),
        "slot allocation complete"
    );
    slots
}
