//! # chronicle-store
//!
//! The reference persistence layer for Chronicle: an in-memory, append-only
//! change store plus read-only query helpers over its rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chronicle_contracts::record::ActorId;
//! use chronicle_core::ChangeRecorder;
//! use chronicle_store::{query, InMemoryChangeStore};
//!
//! let store = Arc::new(InMemoryChangeStore::new());
//! let recorder = ChangeRecorder::new(ActorId::new("user-1"), store.clone());
//! recorder.updated(&record)?;
//!
//! let rows = store.rows();
//! for (set, group) in query::grouped_by_set(&rows) {
//!     println!("{set}: {} rows", group.len());
//! }
//! ```

pub mod memory;
pub mod query;
pub mod row;

pub use memory::InMemoryChangeStore;
pub use row::StoredChange;

// ── Tests ─────────────────────────────────────────────────────────────────────
