//! # Adaptive Mix Planner
//!
//! Decides how a fixed-size practice batch splits between due reviews,
//! new material, and extra reinforcement, from aggregate pool stats. The
//! counts feed the host's retrieval queries; no items are touched here.
//!
//! Used for plain quiz-style practice; flashcard drills go through the
//! full weight/slot/select pipeline instead.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Extra due-share when accuracy has fallen badly.
pub const REINFORCEMENT_BOOST_LOW: f64 = 0.2;

/// Extra due-share when accuracy is merely shaky.
pub const REINFORCEMENT_BOOST_MID: f64 = 0.1;

/// Accuracy below which the low-accuracy boost applies.
pub const LOW_ACCURACY_THRESHOLD: f64 = 0.65;

/// Accuracy below which the mid-accuracy boost applies.
pub const MID_ACCURACY_THRESHOLD: f64 = 0.75;

// ============================================================================
// TYPES
// ============================================================================

/// Aggregate stats over one practice pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStats {
    /// Items known to the progress store.
    pub total: usize,
    /// Items never answered.
    pub new_items: usize,
    /// Overall accuracy in `[0, 1]`.
    pub accuracy: f64,
    /// Items whose next review has passed.
    pub due_count: usize,
}

/// Planned batch composition. Components are non-negative and sum to at
/// most the requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeMix {
    /// Items drawn from the due queue.
    pub due: usize,
    /// Never-seen items.
    pub new_items: usize,
    /// Extra review of already-seen, not-yet-due items.
    pub review: usize,
}

// ============================================================================
// PLANNING
// ============================================================================

/// Split a batch of `count` items into due / new / extra-review targets.
///
/// Due pressure (share of the pool that is overdue) and low accuracy both
/// push the due share up, between 20% and 75% of the batch. The new-item
/// share of the remainder follows the pool's unseen ratio, damped while
/// reinforcement is needed. When every known item is new there is nothing
/// to review: the due queue is served as-is and the rest of the batch is
/// new material.
pub fn plan_mix(stats: &PracticeStats, count: usize) -> PracticeMix {
    if count == 0 {
        return PracticeMix { due: 0, new_items: 0, review: 0 };
    }

    if stats.total == stats.new_items {
        let due = stats.due_count.min(count);
        return PracticeMix {
            due,
            new_items: count - due,
            review: 0,
        };
    }

    let new_ratio = if stats.total == 0 {
        1.0
    } else {
        stats.new_items as f64 / stats.total as f64
    };
    let reinforcement_boost = if stats.accuracy < LOW_ACCURACY_THRESHOLD {
        REINFORCEMENT_BOOST_LOW
    } else if stats.accuracy < MID_ACCURACY_THRESHOLD {
        REINFORCEMENT_BOOST_MID
    } else {
        0.0
    };
    let due_pressure = (stats.due_count as f64 / stats.total.max(1) as f64).clamp(0.0, 1.0);

    let due_target = (0.2 + due_pressure * 0.4 + reinforcement_boost).clamp(0.2, 0.75);
    let new_target = (0.25 + new_ratio * 0.4 - reinforcement_boost * 0.5).clamp(0.15, 0.7);

    let due = ((count as f64 * due_target).round() as usize).min(count);
    let remainder = count - due;
    let new_items = ((remainder as f64 * new_target).round() as usize).min(remainder);

    PracticeMix {
        due,
        new_items,
        review: remainder - new_items,
    }
}
