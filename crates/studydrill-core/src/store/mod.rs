//! # Store Boundary
//!
//! The engine performs no I/O. This module defines the contracts the
//! host's storage layers must meet:
//!
//! - [`ProgressStore`]: the durable per-item record store, addressable by
//!   item id and by a "next review before" range query.
//! - [`CardPool`]: a provider of studyable items per level, replacing the
//!   source app's dynamic per-level module import with an injected,
//!   testable interface. [`CachedPool`] adds caller-owned memoization.
//!
//! [`MemoryProgressStore`] is the bundled in-memory implementation, used
//! by the test suites and by embedders that do their own persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cards::DrillCard;
use crate::progress::ItemProgress;

// ============================================================================
// ERRORS
// ============================================================================

/// Failures crossing the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested pool or level does not exist.
    #[error("unknown pool level: {0}")]
    UnknownLevel(String),

    /// The backing store failed; the message comes from the backend.
    #[error("storage backend error: {0}")]
    Backend(String),
}

// ============================================================================
// PROGRESS STORE
// ============================================================================

/// Durable per-item record store.
///
/// Writes happen once per answer event. The engine never calls this
/// trait itself; the host fetches snapshots before invoking the pipeline
/// and persists [`crate::scheduler::process_answer`] output afterwards.
/// Concurrent upserts for the *same* item are not coordinated here;
/// serializing double-submissions (last-write-wins is acceptable) is the
/// caller's responsibility.
pub trait ProgressStore {
    /// Fetch one item's record, `None` if the item was never answered.
    fn get(&self, item_id: &str) -> Result<Option<ItemProgress>, StoreError>;

    /// All records with `next_review <= cutoff`, i.e. the due queue.
    fn due_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<ItemProgress>, StoreError>;

    /// Insert or replace one item's record.
    fn upsert(&mut self, record: ItemProgress) -> Result<(), StoreError>;

    /// Every known record. Hosts use this to build category aggregates.
    fn all(&self) -> Result<Vec<ItemProgress>, StoreError>;
}

/// In-memory [`ProgressStore`], the reference implementation.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: HashMap<String, ItemProgress>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot keyed by item id, the shape the selector consumes.
    pub fn snapshot(&self) -> HashMap<String, ItemProgress> {
        self.records.clone()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get(&self, item_id: &str) -> Result<Option<ItemProgress>, StoreError> {
        Ok(self.records.get(item_id).cloned())
    }

    fn due_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<ItemProgress>, StoreError> {
        let mut due: Vec<ItemProgress> = self
            .records
            .values()
            .filter(|record| record.next_review <= cutoff)
            .cloned()
            .collect();
        due.sort_by_key(|record| record.next_review);
        Ok(due)
    }

    fn upsert(&mut self, record: ItemProgress) -> Result<(), StoreError> {
        self.records.insert(record.item_id.clone(), record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<ItemProgress>, StoreError> {
        Ok(self.records.values().cloned().collect())
    }
}

// ============================================================================
// CARD POOLS
// ============================================================================

/// Provider of the studyable item pool for one level.
pub trait CardPool {
    /// Load every card for the given level.
    fn load(&self, level: &str) -> Result<Vec<DrillCard>, StoreError>;
}

/// Memoizing wrapper around a [`CardPool`].
///
/// Pools are large and immutable per level, so the first load is cached
/// and served from memory afterwards. Caching lives here, owned by the
/// caller, so the engine itself stays free of global state.
pub struct CachedPool<P: CardPool> {
    inner: P,
    cache: Mutex<HashMap<String, Vec<DrillCard>>>,
}

impl<P: CardPool> CachedPool<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of levels currently cached.
    pub fn cached_levels(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl<P: CardPool> CardPool for CachedPool<P> {
    fn load(&self, level: &str) -> Result<Vec<DrillCard>, StoreError> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(cards) = cache.get(level) {
                return Ok(cards.clone());
            }
        }

        let cards = self.inner.load(level)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(level.to_string(), cards.clone());
        }
        Ok(cards)
    }
}
