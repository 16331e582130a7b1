//! The change recorder: lifecycle events in, change rows out.
//!
//! One recorder serves one actor. Lifecycle notifications arrive at the four
//! typed entry points — `created`, `updated`, `deleted`, `restored` — and
//! each invocation computes and emits its rows independently:
//!
//!   Trackable → filter → diff → change-set → ChangeStore::append
//!
//! `updated` emits one row per loggable attribute diff, all sharing one
//! change-set identifier; the other events emit exactly one row with no
//! attribute detail. The recorder holds no mutable state, so concurrent
//! invocations cannot race inside the engine — the store is the sole
//! serialization point.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use chronicle_contracts::{
    change::{ChangeKind, ChangeRecord},
    error::ChronicleResult,
    record::ActorId,
};

use crate::{
    changeset::{self, ChangeSetMode},
    diff,
    traits::{ChangeStore, Trackable},
};

/// Records lifecycle events for one actor into one change store.
///
/// The actor and store are fixed at construction; the recorder itself is
/// immutable and may be shared freely across threads.
pub struct ChangeRecorder {
    actor: ActorId,
    store: Arc<dyn ChangeStore>,
    mode: ChangeSetMode,
}

impl ChangeRecorder {
    /// Create a recorder attributing changes to `actor`, emitting into
    /// `store`, with content-hash change-set identifiers.
    pub fn new(actor: ActorId, store: Arc<dyn ChangeStore>) -> Self {
        Self {
            actor,
            store,
            mode: ChangeSetMode::default(),
        }
    }

    /// Switch the change-set identifier construction.
    pub fn with_change_set_mode(mut self, mode: ChangeSetMode) -> Self {
        self.mode = mode;
        self
    }

    /// Record that `record` was created. Emits exactly one row.
    pub fn created(&self, record: &dyn Trackable) -> ChronicleResult<ChangeRecord> {
        self.record_lifecycle(ChangeKind::Create, record)
    }

    /// Record an update of `record`, one row per loggable attribute diff.
    ///
    /// All rows of the batch share one freshly issued change-set identifier
    /// and are appended in diff order. When filtering leaves nothing to
    /// log, no rows are emitted and the store is not touched.
    ///
    /// # Errors
    ///
    /// The first failing append aborts the remainder of the batch and is
    /// returned as-is. Rows appended before the failure stay in the store;
    /// readers must treat a change set as "rows observed so far".
    pub fn updated(&self, record: &dyn Trackable) -> ChronicleResult<Vec<ChangeRecord>> {
        let diffs = diff::extract(record);
        let record_id = record.record_id();

        if diffs.is_empty() {
            debug!(
                record_type = %record.record_type(),
                record_id = %record_id.0,
                "no loggable attribute changes; nothing recorded"
            );
            return Ok(Vec::new());
        }

        let recorded_at = Utc::now();
        let change_set = self.issue_change_set(record, ChangeKind::Update, recorded_at);

        let mut rows = Vec::with_capacity(diffs.len());
        for diff in diffs {
            let row = ChangeRecord {
                actor: self.actor.clone(),
                record_type: record.record_type().to_string(),
                record_id: record_id.clone(),
                kind: ChangeKind::Update,
                change_set: Some(change_set.clone()),
                attribute: Some(diff.attribute),
                old_value: diff.old_value,
                new_value: diff.new_value,
                recorded_at,
            };
            self.store.append(&row)?;
            rows.push(row);
        }

        info!(
            record_type = %record.record_type(),
            record_id = %record_id.0,
            change_set = %change_set,
            rows = rows.len(),
            "update change set recorded"
        );

        Ok(rows)
    }

    /// Record that `record` was deleted. Emits exactly one row.
    pub fn deleted(&self, record: &dyn Trackable) -> ChronicleResult<ChangeRecord> {
        self.record_lifecycle(ChangeKind::Delete, record)
    }

    /// Record that `record` was restored from deletion. Emits exactly one
    /// row.
    pub fn restored(&self, record: &dyn Trackable) -> ChronicleResult<ChangeRecord> {
        self.record_lifecycle(ChangeKind::Restore, record)
    }

    /// Emit the single row for a non-update lifecycle event: no attribute
    /// detail, change set of one.
    fn record_lifecycle(
        &self,
        kind: ChangeKind,
        record: &dyn Trackable,
    ) -> ChronicleResult<ChangeRecord> {
        let recorded_at = Utc::now();
        let change_set = self.issue_change_set(record, kind, recorded_at);

        let row = ChangeRecord {
            actor: self.actor.clone(),
            record_type: record.record_type().to_string(),
            record_id: record.record_id(),
            kind,
            change_set: Some(change_set),
            attribute: None,
            old_value: None,
            new_value: None,
            recorded_at,
        };
        self.store.append(&row)?;

        info!(
            record_type = %row.record_type,
            record_id = %row.record_id.0,
            kind = %kind.as_str(),
            "lifecycle change recorded"
        );

        Ok(row)
    }

    fn issue_change_set(
        &self,
        record: &dyn Trackable,
        kind: ChangeKind,
        at: DateTime<Utc>,
    ) -> String {
        match self.mode {
            ChangeSetMode::ContentHash => changeset::generate(
                &self.actor,
                record.record_type(),
                &record.record_id(),
                kind,
                at,
            ),
            ChangeSetMode::Random => changeset::random(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
