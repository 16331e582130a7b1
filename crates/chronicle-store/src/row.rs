//! Stored change rows.
//!
//! `StoredChange` is what the in-memory store keeps: the immutable payload
//! the recorder emitted, wrapped with the store-assigned surrogate id.

use serde::{Deserialize, Serialize};

use chronicle_contracts::change::ChangeRecord;

/// One persisted change row.
///
/// The `id` is assigned by the store on append, starting at 1 and strictly
/// increasing in append order. The embedded `record` is stored exactly as
/// emitted and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredChange {
    /// Store-assigned surrogate key.
    pub id: u64,

    /// The immutable emitted payload.
    pub record: ChangeRecord,
}
