//! # SM-2 Item Scheduler
//!
//! Per-item spaced-repetition state transitions, SuperMemo-2 variant.
//!
//! Reference: <https://super-memory.com/english/ol/sm2.htm>
//!
//! Two entry points:
//!
//! - [`schedule`]: the raw SM-2 transition over an explicit quality grade
//!   and prior `(repetitions, ease, interval)` state.
//! - [`process_answer`]: boolean-correctness wrapper used by the host,
//!   which also maintains the persisted [`ItemProgress`] counts. The
//!   persisted record does not carry a repetition counter, so the streak
//!   is estimated from the prior interval.
//!
//! Both are pure: "now" is a parameter, nothing is read or written, and
//! every input in the documented domain produces a value (no panics).

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{ItemProgress, MasteryStatus, MIN_EASE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Quality grade assigned to a correct boolean answer.
pub const QUALITY_CORRECT: u8 = 4;

/// Quality grade assigned to an incorrect boolean answer.
pub const QUALITY_INCORRECT: u8 = 2;

/// Quality at or above which a review counts as a success.
pub const QUALITY_PASS: u8 = 3;

/// Interval (days) after the first successful review.
pub const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval (days) after the second successful review.
pub const SECOND_INTERVAL_DAYS: u32 = 6;

// ============================================================================
// SCHEDULING RESULT
// ============================================================================

/// Outcome of one SM-2 transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduled {
    /// New ease factor, floored at [`MIN_EASE`].
    pub ease: f64,
    /// New review interval in days.
    pub interval_days: u32,
    /// New repetition streak (zero after a failure).
    pub repetitions: u32,
    /// Next review timestamp, normalized to start of day for stable
    /// cross-session scheduling.
    pub next_review: DateTime<Utc>,
    /// Mastery label for the just-computed state; for persisted records
    /// the canonical [`MasteryStatus::from_record`] is authoritative.
    pub status: MasteryStatus,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Run one SM-2 transition.
///
/// Success (`quality >= 3`): the streak extends, the interval graduates
/// 1 → 6 → `round(interval × ease)`, and the ease moves by the SM-2
/// polynomial (zero net change at quality 4), floored at [`MIN_EASE`].
///
/// Failure (`quality < 3`): the streak and interval reset, the item comes
/// back tomorrow, and the ease is left untouched.
pub fn schedule(
    quality: u8,
    prior_repetitions: u32,
    prior_ease: f64,
    prior_interval_days: u32,
    now: DateTime<Utc>,
) -> Scheduled {
    let (repetitions, interval_days, ease) = if quality >= QUALITY_PASS {
        let interval = match prior_repetitions {
            0 => FIRST_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => (prior_interval_days as f64 * prior_ease).round() as u32,
        };
        let shortfall = (5 - quality.min(5)) as f64;
        let ease = (prior_ease + (0.1 - shortfall * (0.08 + shortfall * 0.02))).max(MIN_EASE);
        (prior_repetitions + 1, interval, ease)
    } else {
        (0, FIRST_INTERVAL_DAYS, prior_ease)
    };

    let next_review = start_of_day(now + Duration::days(interval_days as i64));

    Scheduled {
        ease,
        interval_days,
        repetitions,
        next_review,
        status: MasteryStatus::after_review(interval_days, repetitions),
    }
}

/// Apply a boolean answer to an item's persisted record.
///
/// Correct maps to quality [`QUALITY_CORRECT`], incorrect to
/// [`QUALITY_INCORRECT`]. A missing `prior` record means the item is
/// brand-new. Returns the fully updated record: counts, `last_attempt`,
/// SM-2 state, and the canonical mastery status.
pub fn process_answer(
    item_id: &str,
    is_correct: bool,
    prior: Option<&ItemProgress>,
    now: DateTime<Utc>,
) -> ItemProgress {
    let base = match prior {
        Some(record) => record.clone(),
        None => ItemProgress::new(item_id, now),
    };

    let quality = if is_correct {
        QUALITY_CORRECT
    } else {
        QUALITY_INCORRECT
    };
    let repetitions = estimate_repetitions(base.interval_days);
    let scheduled = schedule(quality, repetitions, base.ease, base.interval_days, now);

    let mut updated = ItemProgress {
        attempts: base.attempts + 1,
        correct_count: base.correct_count + u32::from(is_correct),
        last_attempt: Some(now),
        next_review: scheduled.next_review,
        ease: scheduled.ease,
        interval_days: scheduled.interval_days,
        ..base
    };
    updated.recompute_status();
    updated
}

/// Estimate the repetition streak from a persisted interval.
///
/// The record store does not track repetitions separately, so the streak
/// is recovered from how far the interval has graduated: a 6-day-or-longer
/// interval implies at least two successes, any positive interval one.
pub fn estimate_repetitions(interval_days: u32) -> u32 {
    if interval_days >= SECOND_INTERVAL_DAYS {
        2
    } else if interval_days >= FIRST_INTERVAL_DAYS {
        1
    } else {
        0
    }
}

/// Truncate a timestamp to 00:00:00 UTC on the same day.
fn start_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}
