//! # Session Pipeline
//!
//! The read-side pipeline that turns "give me K items" into an ordered
//! drill list:
//!
//! 1. [`weights`]: category aggregates -> normalized weights + reasons
//! 2. [`slots`]: weights + budget -> integer slots per category
//! 3. [`select`]: slots + candidate pool + item records -> top-N per slot
//! 4. [`interleave`]: final flat list -> round-robin across categories
//!
//! Every stage is a pure function over already-fetched snapshots; the
//! host fetches records and persists scheduler output around this
//! pipeline. Concept and quiz pools run through independent passes
//! ([`build_session`]) and may safely be computed concurrently.
//!
//! [`mix`] is the sibling planner for plain quiz practice, which splits a
//! batch into due/new/review counts instead of running category slots.

pub mod interleave;
pub mod mix;
pub mod select;
pub mod slots;
pub mod weights;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::cards::Categorized;
use crate::progress::{CategoryProgress, ItemProgress};

pub use interleave::measure_interleaving;
pub use mix::{plan_mix, PracticeMix, PracticeStats};
pub use select::select_cards;
pub use slots::{allocate_slots, SlotMap};
pub use weights::{category_weights, CategoryWeight, StudyMode, WeightReason};

// ============================================================================
// RESULTS
// ============================================================================

/// Output of one weight/slot/select/interleave pass for a single card
/// kind. The weights and slots ride along for caller-side display and
/// debugging; they are ephemeral and never persisted.
#[derive(Debug, Clone)]
pub struct SelectionResult<T> {
    /// Interleaved drill order.
    pub items: Vec<T>,
    /// Normalized weights the pass used, descending.
    pub weights: Vec<CategoryWeight>,
    /// Integer allocation the pass used.
    pub slots: SlotMap,
}

/// A full study session: two independent selection passes, one per card
/// kind, plus the shared category weights.
#[derive(Debug, Clone)]
pub struct SessionPlan<T> {
    pub concept: Vec<T>,
    pub quiz: Vec<T>,
    /// Weights from the category aggregates (identical inputs feed both
    /// passes, so one copy suffices).
    pub weights: Vec<CategoryWeight>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run the full pipeline for one candidate pool.
///
/// `categories` is the host-supplied aggregate snapshot, `progress` the
/// per-item records for the pool, `total_slots` the item budget. Empty
/// categories or a zero budget produce an empty result, not an error.
pub fn plan_drill<T, R>(
    candidates: &[T],
    categories: &[CategoryProgress],
    mode: StudyMode,
    total_slots: usize,
    progress: &HashMap<String, ItemProgress>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> SelectionResult<T>
where
    T: Categorized + Clone,
    R: Rng + ?Sized,
{
    let weights = category_weights(categories, mode, now);
    let slots = allocate_slots(&weights, total_slots);
    let picked = select_cards(candidates, &slots, progress, now);
    debug!(
        requested = total_slots,
        selected = picked.len(),
        categories = slots.len(),
        ?mode,
        "drill selection complete"
    );
    let items = interleave::interleave(picked, rng);

    SelectionResult { items, weights, slots }
}

/// Build a session from separate concept and quiz pools.
///
/// The two passes share the category snapshot but are otherwise
/// independent: separate candidate pools, separate budgets, separately
/// interleaved outputs.
#[allow(clippy::too_many_arguments)]
pub fn build_session<T, R>(
    concept_pool: &[T],
    quiz_pool: &[T],
    categories: &[CategoryProgress],
    mode: StudyMode,
    concept_count: usize,
    quiz_count: usize,
    progress: &HashMap<String, ItemProgress>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> SessionPlan<T>
where
    T: Categorized + Clone,
    R: Rng + ?Sized,
{
    let concept = plan_drill(concept_pool, categories, mode, concept_count, progress, now, rng);
    let quiz = plan_drill(quiz_pool, categories, mode, quiz_count, progress, now, rng);

    SessionPlan {
        concept: concept.items,
        quiz: quiz.items,
        weights: concept.weights,
    }
}
