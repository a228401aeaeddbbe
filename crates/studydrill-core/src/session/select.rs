//! # Card Selector
//!
//! Fills each category's slot budget from that category's candidate pool,
//! ranking by due-ness, mastery, and staleness. Concept and quiz pools go
//! through separate passes with the same logic; within one pass an item is
//! never selected twice even when it matches several categories.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::cards::Categorized;
use crate::progress::ItemProgress;

use super::slots::SlotMap;

/// Select up to each category's slot count from `candidates`.
///
/// Categories are visited in the [`SlotMap`]'s iteration order (the order
/// the allocator produced). A candidate qualifies for a category when any
/// of its category attributes match ([`Categorized::in_category`]) and it
/// has not already been taken by an earlier category in this pass.
///
/// Within a category, candidates sort by:
/// 1. items with a progress record before items without one;
/// 2. among recorded items, due ones (`next_review <= now`) first;
/// 3. ascending accuracy (shakier items first);
/// 4. ascending last-attempt time (oldest seen first).
pub fn select_cards<T>(
    candidates: &[T],
    slots: &SlotMap,
    progress: &HashMap<String, ItemProgress>,
    now: DateTime<Utc>,
) -> Vec<T>
where
    T: Categorized + Clone,
{
    let mut selected: Vec<T> = Vec::with_capacity(slots.total());
    let mut taken: HashSet<&str> = HashSet::new();

    for (category_id, slot_count) in slots.iter() {
        if slot_count == 0 {
            continue;
        }

        let mut pool: Vec<&T> = candidates
            .iter()
            .filter(|card| card.in_category(category_id) && !taken.contains(card.item_id()))
            .collect();

        pool.sort_by(|a, b| rank_key(*a, progress, now).partial_cmp(&rank_key(*b, progress, now)).unwrap_or(Ordering::Equal));

        for card in pool.into_iter().take(slot_count) {
            taken.insert(card.item_id());
            selected.push(card.clone());
        }
    }

    selected
}

/// Sort key: lower tuples select first.
fn rank_key<T: Categorized>(
    card: &T,
    progress: &HashMap<String, ItemProgress>,
    now: DateTime<Utc>,
) -> (u8, u8, f64, i64) {
    match progress.get(card.item_id()) {
        Some(record) => {
            let due = if record.is_due(now) { 0 } else { 1 };
            let last_seen = record
                .last_attempt
                .map(|ts| ts.timestamp())
                .unwrap_or(i64::MIN);
            (0, due, record.accuracy(), last_seen)
        }
        // Unrecorded items sort after everything with history
        None => (1, 1, 1.0, i64::MAX),
    }
}
