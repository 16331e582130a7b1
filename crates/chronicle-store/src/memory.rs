//! In-memory implementation of `ChangeStore`.
//!
//! `InMemoryChangeStore` is the reference sink: an append-only `Vec` behind
//! a `Mutex`, safe to share across threads while recorders append. Use
//! `rows()` to take a snapshot for the query helpers in `crate::query`.

use std::sync::{Arc, Mutex};

use tracing::debug;

use chronicle_contracts::{
    change::ChangeRecord,
    error::{ChronicleError, ChronicleResult},
};
use chronicle_core::traits::ChangeStore;

use crate::row::StoredChange;

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryChangeStore`.
pub(crate) struct StoreState {
    /// All rows appended so far, in append order.
    pub(crate) rows: Vec<StoredChange>,

    /// The next surrogate id to assign (starts at 1).
    pub(crate) next_id: u64,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory, append-only change store.
///
/// # Thread safety
///
/// `append()` acquires a `Mutex` internally, making the store the engine's
/// sole serialization point: rows from one change set keep their emission
/// order, while batches from concurrent recorders interleave freely.
pub struct InMemoryChangeStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryChangeStore {
    /// Create an empty store. Surrogate ids start at 1.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                rows: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Snapshot all rows appended so far, in append order.
    pub fn rows(&self) -> Vec<StoredChange> {
        let state = self.state.lock().expect("change store lock poisoned");
        state.rows.clone()
    }

    /// The number of rows appended so far.
    pub fn len(&self) -> usize {
        let state = self.state.lock().expect("change store lock poisoned");
        state.rows.len()
    }

    /// True when no rows have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryChangeStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── ChangeStore impl ──────────────────────────────────────────────────────────

impl ChangeStore for InMemoryChangeStore {
    /// Append one emitted row, assigning the next surrogate id.
    ///
    /// Returns `Err(StoreRejected)` only if the internal mutex is poisoned,
    /// which cannot happen under normal operation.
    fn append(&self, record: &ChangeRecord) -> ChronicleResult<()> {
        let mut state = self.state.lock().map_err(|e| ChronicleError::StoreRejected {
            reason: format!("change store lock poisoned: {}", e),
        })?;

        let id = state.next_id;
        state.rows.push(StoredChange {
            id,
            record: record.clone(),
        });
        state.next_id += 1;

        debug!(
            id,
            record_type = %record.record_type,
            kind = %record.kind.as_str(),
            "change row appended"
        );

        Ok(())
    }
}
