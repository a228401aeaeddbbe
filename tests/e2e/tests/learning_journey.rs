//! A learner's multi-week journey: answers flow through the SM-2
//! scheduler into the store, aggregates are rebuilt, and later sessions
//! reflect the accumulated history.

use chrono::Duration;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use studydrill_core::{
    plan_drill, process_answer, CardKind, MasteryStatus, MemoryProgressStore, ProgressStore,
    StudyMode, WeightReason,
};
use studydrill_e2e::fixtures::{aggregate, anchor_time, pool, replay_history, snapshot};

#[test]
fn four_successes_graduate_to_mastered() {
    let mut store = MemoryProgressStore::new();
    replay_history(&mut store, "T1A00", &[true, true, true, true], 0);

    let record = store.get("T1A00").unwrap().unwrap();
    // Intervals graduate 1 -> 6 -> 15 -> 38 with the default ease
    assert_eq!(record.interval_days, 38);
    assert_eq!(record.status, MasteryStatus::Mastered);
    assert_eq!(record.attempts, 4);
    assert_eq!(record.correct_count, 4);
}

#[test]
fn a_lapse_resets_the_interval_but_keeps_history() {
    let mut store = MemoryProgressStore::new();
    replay_history(&mut store, "T1A00", &[true, true, true, false], 0);

    let record = store.get("T1A00").unwrap().unwrap();
    assert_eq!(record.interval_days, 1);
    assert_eq!(record.status, MasteryStatus::Learning);
    assert_eq!(record.attempts, 4);
    assert_eq!(record.correct_count, 3);
}

#[test]
fn due_queue_surfaces_lapsed_material_first() {
    let mut store = MemoryProgressStore::new();
    // Mastered long ago, now far overdue
    replay_history(&mut store, "T1A00", &[true, true, true, true], 60);
    // Fresh success, due tomorrow
    replay_history(&mut store, "T2A00", &[true], 0);

    let due = store.due_before(anchor_time()).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].item_id, "T1A00");
}

#[test]
fn session_leans_into_the_weak_category() {
    let mut store = MemoryProgressStore::new();
    // T1 is rough: mostly misses across several items this week
    for i in 0..4 {
        replay_history(&mut store, &format!("T1A0{i}"), &[false, false, true], 1);
    }
    // T2 is solid
    for i in 0..4 {
        replay_history(&mut store, &format!("T2A0{i}"), &[true, true, true], 1);
    }

    let categories = vec![
        aggregate(&store, "T1", "subelement"),
        aggregate(&store, "T2", "subelement"),
    ];
    assert!(categories[0].recent_accuracy < 0.5);
    assert!(categories[1].recent_accuracy > 0.85);

    let layout = [("T1", "T1A"), ("T2", "T2A")];
    let quiz_pool = pool(CardKind::Quiz, &layout, 10);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let result = plan_drill(
        &quiz_pool,
        &categories,
        StudyMode::Adaptive,
        8,
        &snapshot(&store),
        anchor_time(),
        &mut rng,
    );

    let weak_weight = result
        .weights
        .iter()
        .find(|w| w.category_id == "T1")
        .unwrap();
    assert_eq!(weak_weight.reason, WeightReason::Weak);

    let t1_count = result.items.iter().filter(|c| c.section == "T1").count();
    let t2_count = result.items.iter().filter(|c| c.section == "T2").count();
    assert!(t1_count > t2_count, "weak category must dominate ({t1_count} vs {t2_count})");
}

#[test]
fn answers_between_sessions_change_the_next_selection() {
    let mut store = MemoryProgressStore::new();
    replay_history(&mut store, "T1A00", &[false], 0);
    replay_history(&mut store, "T1A01", &[true, true], 10);

    let layout = [("T1", "T1A")];
    let quiz_pool = pool(CardKind::Quiz, &layout, 4);
    let categories = vec![aggregate(&store, "T1", "subelement")];
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let result = plan_drill(
        &quiz_pool,
        &categories,
        StudyMode::Adaptive,
        2,
        &snapshot(&store),
        anchor_time(),
        &mut rng,
    );

    // Recorded items outrank the never-seen cards; the weak-category
    // shortfall pass stretches the budget to cover both
    let ids: Vec<&str> = result.items.iter().map(|c| c.id.as_str()).collect();
    assert!(ids.contains(&"T1A00"));
    assert!(ids.contains(&"T1A01"));

    // The learner clears the lapsed item; it stops being due today
    let record = store.get("T1A00").unwrap().unwrap();
    let updated = process_answer("T1A00", true, Some(&record), anchor_time());
    store.upsert(updated).unwrap();

    let result = plan_drill(
        &quiz_pool,
        &categories,
        StudyMode::Adaptive,
        1,
        &snapshot(&store),
        anchor_time(),
        &mut rng,
    );
    assert_eq!(result.items[0].id, "T1A01");
}
