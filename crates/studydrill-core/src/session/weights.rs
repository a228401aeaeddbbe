//! # Category Weight Engine
//!
//! Turns per-category aggregates into a normalized weight per category,
//! each tagged with a human-meaningful reason code. Weights are ephemeral:
//! recomputed fresh on every selection request, never persisted.
//!
//! The adaptive mode biases toward weak recent accuracy, unexplored
//! categories, and staleness; review and explore modes are deliberately
//! blunt two-level preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::CategoryProgress;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base weight for a category with recent activity in adaptive mode.
pub const ADAPTIVE_BASE_WEIGHT: f64 = 0.5;

/// Weight granted to a never-practiced category in adaptive mode.
pub const EXPLORE_BONUS_WEIGHT: f64 = 1.5;

/// Recent accuracy below this marks a category weak.
pub const WEAK_ACCURACY_THRESHOLD: f64 = 0.5;

/// Recent accuracy above this marks a category strong.
pub const STRONG_ACCURACY_THRESHOLD: f64 = 0.85;

/// Damping applied to strong categories so they still appear, just less.
pub const STRONG_WEIGHT_DAMPING: f64 = 0.7;

/// Recency boost gained per day since the category was last studied.
pub const RECENCY_BOOST_PER_DAY: f64 = 0.1;

/// Upper bound on the recency boost multiplier.
pub const RECENCY_BOOST_CAP: f64 = 2.0;

/// Days without study after which a category counts as rusty.
pub const RUSTY_AFTER_DAYS: f64 = 7.0;

/// Raw per-category weight cap, as a fraction of the category count.
/// Keeps one runaway weight from dominating before normalization.
pub const RAW_WEIGHT_CAP_PER_CATEGORY: f64 = 0.4;

// ============================================================================
// TYPES
// ============================================================================

/// Session mode steering how category weights are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Blend weakness, exploration, and staleness signals.
    #[default]
    Adaptive,
    /// Prefer material that has been seen before.
    Review,
    /// Prefer material that has never been seen.
    Explore,
}

/// Why a category received its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightReason {
    /// Recent accuracy below the weak threshold.
    Weak,
    /// Recent accuracy above the strong threshold (weight damped).
    Strong,
    /// No recent attempts; boosted so it gets tried.
    Explore,
    /// Not studied for over a week.
    Rusty,
    #[default]
    Normal,
}

/// Normalized weight for one category, ephemeral per request.
///
/// For any non-empty input the weights are non-negative and sum to 1
/// within floating-point tolerance (unless every raw weight was zero, in
/// which case the zero list is returned unnormalized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeight {
    pub category_id: String,
    pub weight: f64,
    pub reason: WeightReason,
}

// ============================================================================
// WEIGHT COMPUTATION
// ============================================================================

/// Compute normalized category weights for one selection request.
///
/// Empty input yields an empty output. The result is sorted descending by
/// final weight; ties keep input order (stable sort).
pub fn category_weights(
    categories: &[CategoryProgress],
    mode: StudyMode,
    now: DateTime<Utc>,
) -> Vec<CategoryWeight> {
    if categories.is_empty() {
        return Vec::new();
    }

    let raw_cap = RAW_WEIGHT_CAP_PER_CATEGORY * categories.len() as f64;
    let mut weights: Vec<CategoryWeight> = categories
        .iter()
        .map(|category| match mode {
            StudyMode::Adaptive => adaptive_weight(category, raw_cap, now),
            StudyMode::Review => review_weight(category),
            StudyMode::Explore => explore_weight(category),
        })
        .collect();

    let sum: f64 = weights.iter().map(|w| w.weight).sum();
    if sum != 0.0 {
        for entry in &mut weights {
            entry.weight /= sum;
        }
    }

    weights.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    weights
}

fn adaptive_weight(category: &CategoryProgress, raw_cap: f64, now: DateTime<Utc>) -> CategoryWeight {
    let mut reason = WeightReason::Normal;
    let mut weight;

    if category.recent_attempts > 0 {
        // Weight rises as recent accuracy falls
        weight = ADAPTIVE_BASE_WEIGHT + (1.0 - category.recent_accuracy);
        if category.recent_accuracy < WEAK_ACCURACY_THRESHOLD {
            reason = WeightReason::Weak;
        } else if category.recent_accuracy > STRONG_ACCURACY_THRESHOLD {
            reason = WeightReason::Strong;
            weight *= STRONG_WEIGHT_DAMPING;
        }
    } else {
        weight = EXPLORE_BONUS_WEIGHT;
        reason = WeightReason::Explore;
    }

    if let Some(last_studied) = category.last_studied {
        let days_since = (now - last_studied).num_seconds() as f64 / 86_400.0;
        let recency_boost = (1.0 + days_since * RECENCY_BOOST_PER_DAY).min(RECENCY_BOOST_CAP);
        weight *= recency_boost;
        if days_since > RUSTY_AFTER_DAYS && reason == WeightReason::Normal {
            reason = WeightReason::Rusty;
        }
    }

    CategoryWeight {
        category_id: category.category_id.clone(),
        weight: weight.min(raw_cap),
        reason,
    }
}

fn review_weight(category: &CategoryProgress) -> CategoryWeight {
    let weight = if category.recent_attempts > 0 { 1.0 } else { 0.5 };
    CategoryWeight {
        category_id: category.category_id.clone(),
        weight,
        reason: WeightReason::Normal,
    }
}

fn explore_weight(category: &CategoryProgress) -> CategoryWeight {
    let (weight, reason) = if category.recent_attempts == 0 {
        (2.0, WeightReason::Explore)
    } else {
        (0.5, WeightReason::Normal)
    };
    CategoryWeight {
        category_id: category.category_id.clone(),
        weight,
        reason,
    }
}
