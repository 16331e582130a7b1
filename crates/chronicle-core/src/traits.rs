//! Core trait definitions for the Chronicle engine.
//!
//! Two traits define the engine's boundary:
//!
//! - `Trackable`   — the record capability: any entity type exposing
//!                   identity, attribute snapshots, and logging metadata is
//!                   eligible for tracking, without inheritance.
//! - `ChangeStore` — the persistence sink that accepts emitted rows.
//!
//! The recorder wires them together: it reads the record through
//! `Trackable` and never mutates it, and appends rows through `ChangeStore`.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use chronicle_contracts::{change::ChangeRecord, error::ChronicleResult, record::RecordId};

/// A structured record whose mutations can be tracked.
///
/// Attribute maps are ordered (`BTreeMap`), which gives every derived set a
/// stable iteration order — the emitted rows of one update batch are
/// deterministic for a given record state.
///
/// All methods are read-only views; the engine never writes back through
/// this trait.
pub trait Trackable {
    /// The record's identity within its type.
    fn record_id(&self) -> RecordId;

    /// The record's type tag (e.g. "user", "invoice").
    fn record_type(&self) -> &str;

    /// The current attribute values, after the mutation.
    fn attributes(&self) -> &BTreeMap<String, Value>;

    /// The pre-mutation snapshot of attribute values.
    fn original(&self) -> &BTreeMap<String, Value>;

    /// Names of attributes whose current value differs from the original
    /// snapshot.
    ///
    /// The default considers an attribute changed when it is absent from
    /// the original or holds a different value there. Attributes present
    /// only in the original are not reported — a mutation sets values, it
    /// does not unset them.
    fn changed_attributes(&self) -> BTreeSet<String> {
        self.attributes()
            .iter()
            .filter(|(name, value)| self.original().get(*name) != Some(*value))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Explicit allow-list of loggable attributes. Empty means "not
    /// configured": every changed attribute is a logging candidate.
    fn loggable_attributes(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Explicit deny-list of unloggable attributes. Empty means "not
    /// configured". The deny-list wins over the allow-list.
    fn unloggable_attributes(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Attributes whose values must never appear in clear text in the
    /// trail. They are still logged, but with both values replaced by the
    /// redaction sentinel.
    fn sensitive_attributes(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Whether the record carries automatically managed timestamp columns.
    fn uses_timestamps(&self) -> bool {
        true
    }

    /// Column name of the creation timestamp.
    fn created_at_column(&self) -> &str {
        "created_at"
    }

    /// Column name of the last-update timestamp.
    fn updated_at_column(&self) -> &str {
        "updated_at"
    }

    /// Column name of the soft-delete marker, when the record soft-deletes.
    fn deleted_at_column(&self) -> Option<&str> {
        None
    }
}

/// The persistence sink for emitted change rows.
///
/// `append` must treat every row as append-only: rows written here are
/// never modified or deleted by the engine. A failed append aborts the
/// remainder of the batch being emitted; rows already appended for the same
/// change set are NOT rolled back, so partial change sets are possible and
/// must be tolerated by readers.
pub trait ChangeStore: Send + Sync {
    /// Persist one change row.
    fn append(&self, record: &ChangeRecord) -> ChronicleResult<()>;
}
