//! # Studydrill Core
//!
//! Adaptive drill scheduling engine for study apps. Decides *which* items
//! a learner sees next and *in what order*:
//!
//! - **SM-2 scheduling**: per-item spaced repetition keeps material
//!   resurfacing right before it is forgotten
//! - **Category weighting**: practice bends toward weak, stale, and
//!   never-seen topics, with human-readable reason codes
//! - **Exact slot allocation**: a session budget of K items becomes an
//!   integer-per-category split with share caps and floors
//! - **Interleaving**: round-robin ordering across categories, which
//!   improves discrimination learning over blocked practice
//! - **Adaptive mix planning**: quiz batches split between due, new, and
//!   reinforcement material from aggregate stats
//!
//! The engine is deliberately I/O-free: every function is pure over
//! already-fetched snapshots, "now" and randomness are injected, and the
//! durable stores are traits the host implements (see [`store`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use chrono::Utc;
//! use studydrill_core::{
//!     build_session, process_answer, CardKind, CategoryProgress, DrillCard, StudyMode,
//! };
//!
//! let now = Utc::now();
//! let concepts = vec![DrillCard::new("c1", CardKind::Concept, "T1A", "T1", "technician")];
//! let quizzes = vec![DrillCard::new("q1", CardKind::Quiz, "T1A", "T1", "technician")];
//! let categories = vec![CategoryProgress::untouched("T1", "subelement")];
//!
//! let mut rng = rand::rng();
//! let plan = build_session(
//!     &concepts,
//!     &quizzes,
//!     &categories,
//!     StudyMode::Adaptive,
//!     5,
//!     10,
//!     &HashMap::new(),
//!     now,
//!     &mut rng,
//! );
//! assert_eq!(plan.quiz.len(), 1);
//!
//! // Write side: one update per answer event
//! let updated = process_answer("q1", true, None, now);
//! assert_eq!(updated.interval_days, 1);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod cards;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Item and category models
pub use cards::{CardKind, Categorized, DrillCard};
pub use progress::{
    CategoryProgress, ItemProgress, MasteryStatus, Trend, DEFAULT_EASE, MIN_EASE,
};

// SM-2 scheduling (write side)
pub use scheduler::{
    estimate_repetitions, process_answer, schedule, Scheduled, QUALITY_CORRECT, QUALITY_INCORRECT,
};

// Selection pipeline (read side)
pub use session::{
    allocate_slots, build_session, category_weights, measure_interleaving, plan_drill, plan_mix,
    select_cards, CategoryWeight, PracticeMix, PracticeStats, SelectionResult, SessionPlan,
    SlotMap, StudyMode, WeightReason,
};
pub use session::interleave::interleave;

// Store boundary
pub use store::{CachedPool, CardPool, MemoryProgressStore, ProgressStore, StoreError};
