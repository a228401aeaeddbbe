//! Quiz-practice batch planning across learner life stages: brand new,
//! steady, struggling, and overdue-swamped.

use studydrill_core::{plan_mix, MemoryProgressStore, PracticeStats, ProgressStore};
use studydrill_e2e::fixtures::{anchor_time, replay_history};

/// Build stats from a real store, the way a host would before planning.
fn stats_from_store(store: &MemoryProgressStore, pool_size: usize) -> PracticeStats {
    let records = store.all().unwrap();
    let attempts: u32 = records.iter().map(|r| r.attempts).sum();
    let correct: u32 = records.iter().map(|r| r.correct_count).sum();
    PracticeStats {
        total: pool_size,
        new_items: pool_size - records.len(),
        accuracy: if attempts == 0 {
            0.0
        } else {
            correct as f64 / attempts as f64
        },
        due_count: store.due_before(anchor_time()).unwrap().len(),
    }
}

#[test]
fn brand_new_learner_gets_all_new_material() {
    let store = MemoryProgressStore::new();
    let mix = plan_mix(&stats_from_store(&store, 40), 10);
    assert_eq!(mix.due, 0);
    assert_eq!(mix.new_items, 10);
    assert_eq!(mix.review, 0);
}

#[test]
fn steady_learner_gets_a_balanced_batch() {
    let mut store = MemoryProgressStore::new();
    for i in 0..20 {
        // Mostly right, every item seen twice, nothing overdue
        replay_history(&mut store, &format!("Q{i:02}"), &[true, i % 5 != 0], 0);
    }

    let stats = stats_from_store(&store, 40);
    let mix = plan_mix(&stats, 10);
    assert!(mix.due + mix.new_items + mix.review <= 10);
    assert!(mix.new_items > 0, "half the pool is unseen");
    assert!(mix.review > 0, "seen material still gets reinforcement");
}

#[test]
fn swamped_learner_gets_a_due_heavy_batch() {
    let mut store = MemoryProgressStore::new();
    for i in 0..30 {
        // Reviewed two weeks ago and never since: all overdue by now
        replay_history(&mut store, &format!("Q{i:02}"), &[true, true], 14);
    }

    let stats = stats_from_store(&store, 40);
    assert_eq!(stats.due_count, 30);

    let mix = plan_mix(&stats, 12);
    assert!(mix.due >= mix.new_items + mix.review, "due must dominate: {mix:?}");
}

#[test]
fn struggling_learner_gets_extra_reinforcement() {
    let shaky = PracticeStats { total: 40, new_items: 10, accuracy: 0.55, due_count: 10 };
    let solid = PracticeStats { total: 40, new_items: 10, accuracy: 0.9, due_count: 10 };

    let shaky_mix = plan_mix(&shaky, 12);
    let solid_mix = plan_mix(&solid, 12);
    assert!(shaky_mix.due > solid_mix.due);
    assert!(shaky_mix.new_items <= solid_mix.new_items);
}
