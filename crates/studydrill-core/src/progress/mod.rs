//! # Progress Models
//!
//! The two record shapes the scheduling engine operates on:
//!
//! - [`ItemProgress`]: one per studyable item, mutated once per answer by
//!   the SM-2 scheduler and persisted by the host application.
//! - [`CategoryProgress`]: per-category aggregates (attempt counts,
//!   accuracy, staleness) supplied by the host as a read-model. The engine
//!   consumes this shape; it never computes long-run aggregates itself.
//!
//! Mastery labeling lives here too. [`MasteryStatus`] has exactly one
//! canonical derivation, [`MasteryStatus::from_record`]; the post-review
//! entry point [`MasteryStatus::after_review`] delegates to it so the two
//! can never drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// SM-2 lower bound on the ease factor.
pub const MIN_EASE: f64 = 1.3;

/// Ease factor assigned to an item with no prior history.
pub const DEFAULT_EASE: f64 = 2.5;

/// Review interval (days) at which an accurate item counts as mastered.
pub const MASTERED_INTERVAL_DAYS: u32 = 21;

/// Review interval (days) at which an item graduates from learning.
pub const REVIEW_INTERVAL_DAYS: u32 = 7;

/// Accuracy an item must exceed, alongside the interval bar, to be mastered.
pub const MASTERED_ACCURACY: f64 = 0.8;

// ============================================================================
// MASTERY STATUS
// ============================================================================

/// Coarse mastery label for a studyable item.
///
/// Always derived, never hand-set: [`MasteryStatus::from_record`] is the
/// single source of truth, recomputed whenever the underlying record
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MasteryStatus {
    /// Never answered; an absent progress record implies this state.
    #[default]
    New,
    /// Answered at least once, interval still short.
    Learning,
    /// Graduated into spaced review (interval of a week or more).
    Review,
    /// Long interval and high accuracy; shown rarely.
    Mastered,
}

impl MasteryStatus {
    /// Canonical derivation from a persisted record.
    ///
    /// `attempts == 0` means the item was never answered. Otherwise the
    /// label follows interval first, accuracy second: a 21-day interval
    /// with better than 80% accuracy is mastered, a 7-day interval is in
    /// review, anything shorter is still learning.
    pub fn from_record(interval_days: u32, correct_count: u32, attempts: u32) -> Self {
        if attempts == 0 {
            return MasteryStatus::New;
        }
        let accuracy = correct_count as f64 / attempts as f64;
        if interval_days >= MASTERED_INTERVAL_DAYS && accuracy > MASTERED_ACCURACY {
            MasteryStatus::Mastered
        } else if interval_days >= REVIEW_INTERVAL_DAYS {
            MasteryStatus::Review
        } else {
            MasteryStatus::Learning
        }
    }

    /// Label for the state immediately after an SM-2 transition, when only
    /// the repetition streak is known.
    ///
    /// A streak of `n` successes is all-correct by construction, so this
    /// delegates to [`MasteryStatus::from_record`] with
    /// `correct = attempts = n`. A zero streak (the item just lapsed)
    /// counts as one failed attempt.
    pub fn after_review(interval_days: u32, repetitions: u32) -> Self {
        if repetitions == 0 {
            MasteryStatus::from_record(interval_days, 0, 1)
        } else {
            MasteryStatus::from_record(interval_days, repetitions, repetitions)
        }
    }

    /// String name used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryStatus::New => "new",
            MasteryStatus::Learning => "learning",
            MasteryStatus::Review => "review",
            MasteryStatus::Mastered => "mastered",
        }
    }

    /// Parse from a persisted string name. Unknown names fall back to `New`.
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "learning" => MasteryStatus::Learning,
            "review" => MasteryStatus::Review,
            "mastered" => MasteryStatus::Mastered,
            _ => MasteryStatus::New,
        }
    }
}

impl std::fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ITEM PROGRESS
// ============================================================================

/// Per-item spaced-repetition record.
///
/// Created on the first answer to an item (no record means the item is
/// [`MasteryStatus::New`]), mutated exactly once per answer event by
/// [`crate::scheduler::process_answer`], and persisted by the host through
/// a [`crate::store::ProgressStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProgress {
    /// Caller-supplied item identifier.
    pub item_id: String,
    /// Total answer events recorded for this item.
    pub attempts: u32,
    /// How many of those answers were correct. Never exceeds `attempts`.
    pub correct_count: u32,
    /// When the item was last answered.
    pub last_attempt: Option<DateTime<Utc>>,
    /// When the item next comes due, normalized to start of day.
    pub next_review: DateTime<Utc>,
    /// SM-2 ease factor, floored at [`MIN_EASE`].
    pub ease: f64,
    /// Current review interval in days.
    pub interval_days: u32,
    /// Derived mastery label; see [`MasteryStatus::from_record`].
    pub status: MasteryStatus,
}

impl ItemProgress {
    /// Fresh record for an item answered for the first time at `now`.
    ///
    /// Counts start at zero; the caller (normally
    /// [`crate::scheduler::process_answer`]) applies the first transition.
    pub fn new(item_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            attempts: 0,
            correct_count: 0,
            last_attempt: None,
            next_review: now,
            ease: DEFAULT_EASE,
            interval_days: 0,
            status: MasteryStatus::New,
        }
    }

    /// Fraction of answers that were correct, 0.0 for an unanswered item.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.attempts as f64
        }
    }

    /// Whether the item's next review has come due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// Re-derive `status` from the current interval and counts.
    pub fn recompute_status(&mut self) {
        self.status =
            MasteryStatus::from_record(self.interval_days, self.correct_count, self.attempts);
    }
}

// ============================================================================
// CATEGORY PROGRESS
// ============================================================================

/// Direction a category's recent accuracy is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    #[default]
    Stable,
}

/// Per-category aggregate read-model.
///
/// Supplied by the host (usually computed from the item record store);
/// the engine only consumes it. `recent_*` fields cover a host-defined
/// sliding window; `overall_*` cover all history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    /// Category identifier (e.g. a subelement code).
    pub category_id: String,
    /// Kind of grouping this id refers to (e.g. "subelement", "group").
    pub category_type: String,
    pub total_attempts: u32,
    pub total_correct: u32,
    pub recent_attempts: u32,
    pub recent_correct: u32,
    /// All-time accuracy in `[0, 1]`.
    pub overall_accuracy: f64,
    /// Sliding-window accuracy in `[0, 1]`.
    pub recent_accuracy: f64,
    /// Host-computed weakness score in `[0, 1]`, higher is weaker.
    pub weakness_score: f64,
    /// When any item in this category was last studied.
    pub last_studied: Option<DateTime<Utc>>,
    pub trend: Trend,
}

impl CategoryProgress {
    /// Aggregate for a category with no recorded history.
    pub fn untouched(category_id: impl Into<String>, category_type: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            category_type: category_type.into(),
            total_attempts: 0,
            total_correct: 0,
            recent_attempts: 0,
            recent_correct: 0,
            overall_accuracy: 0.0,
            recent_accuracy: 0.0,
            weakness_score: 1.0,
            last_studied: None,
            trend: Trend::Stable,
        }
    }
}
