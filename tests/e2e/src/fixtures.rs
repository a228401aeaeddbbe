//! Test Data Factory
//!
//! Builds realistic study scenarios for the journey tests:
//! - Card pools laid out like a license exam (sections, topic groups)
//! - Answer histories replayed through the real SM-2 scheduler
//! - Category aggregates computed the way a host app would

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use studydrill_core::{
    process_answer, CardKind, CategoryProgress, DrillCard, ItemProgress, MemoryProgressStore,
    ProgressStore,
};

/// A fixed "now" so journeys are reproducible.
pub fn anchor_time() -> DateTime<Utc> {
    use chrono::TimeZone;
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Build a pool of `per_topic` cards for each `(section, topic)` pair,
/// e.g. `("T1", "T1A")`.
pub fn pool(kind: CardKind, layout: &[(&str, &str)], per_topic: usize) -> Vec<DrillCard> {
    let mut cards = Vec::new();
    for (section, topic) in layout {
        for i in 0..per_topic {
            cards.push(DrillCard::new(
                format!("{topic}{i:02}"),
                kind,
                *topic,
                *section,
                "technician",
            ));
        }
    }
    cards
}

/// Replay an answer history for one item through the real scheduler.
///
/// `outcomes` run oldest-first, one day apart, with the final answer
/// landing exactly `days_ago` days before the anchor time.
pub fn replay_history(
    store: &mut MemoryProgressStore,
    item_id: &str,
    outcomes: &[bool],
    days_ago: i64,
) {
    let start = anchor_time() - Duration::days(days_ago + outcomes.len() as i64 - 1);
    let mut record: Option<ItemProgress> = None;
    for (i, &correct) in outcomes.iter().enumerate() {
        let at = start + Duration::days(i as i64);
        let updated = process_answer(item_id, correct, record.as_ref(), at);
        record = Some(updated);
    }
    if let Some(record) = record {
        store.upsert(record).expect("memory store upsert");
    }
}

/// Compute category aggregates from the store, the way a host would:
/// every record whose item id starts with the category prefix counts,
/// and "recent" covers the last 7 days.
pub fn aggregate(
    store: &MemoryProgressStore,
    category_id: &str,
    category_type: &str,
) -> CategoryProgress {
    let recent_cutoff = anchor_time() - Duration::days(7);
    let mut category = CategoryProgress::untouched(category_id, category_type);

    for record in store.all().expect("memory store read") {
        if !record.item_id.starts_with(category_id) {
            continue;
        }
        category.total_attempts += record.attempts;
        category.total_correct += record.correct_count;
        if record.last_attempt.is_some_and(|ts| ts >= recent_cutoff) {
            category.recent_attempts += record.attempts;
            category.recent_correct += record.correct_count;
        }
        category.last_studied = category.last_studied.max(record.last_attempt);
    }

    if category.total_attempts > 0 {
        category.overall_accuracy =
            category.total_correct as f64 / category.total_attempts as f64;
        category.weakness_score = 1.0 - category.overall_accuracy;
    }
    if category.recent_attempts > 0 {
        category.recent_accuracy =
            category.recent_correct as f64 / category.recent_attempts as f64;
    }
    category
}

/// Progress snapshot keyed by item id, the shape the selector takes.
pub fn snapshot(store: &MemoryProgressStore) -> HashMap<String, ItemProgress> {
    store.snapshot()
}
