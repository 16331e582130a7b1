//! Change event kinds and the emitted change row payload.
//!
//! `ChangeRecord` is what the recorder hands to the change store — one per
//! lifecycle event, or one per changed attribute for updates. Rows are
//! append-only: once emitted they are never modified or deleted by the
//! engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ActorId, RecordId};

/// The lifecycle event a change row records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The record came into existence.
    Create,

    /// One or more attributes of an existing record were mutated.
    ///
    /// The default kind — the overwhelmingly common case, and the only one
    /// that carries attribute-level detail.
    #[default]
    Update,

    /// The record was (soft-)deleted.
    Delete,

    /// A previously deleted record was brought back.
    Restore,
}

impl ChangeKind {
    /// The stable wire name of this kind, as stored in the sink's `type`
    /// column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
            ChangeKind::Restore => "restore",
        }
    }
}

/// One immutable change row, as emitted by the recorder.
///
/// For `kind != Update` the attribute fields are all `None` and exactly one
/// row exists per event. For `Update`, every row produced by one mutation
/// event shares the same `change_set` value, and together the rows enumerate
/// each loggable changed attribute exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Who made the change.
    pub actor: ActorId,

    /// Type tag of the mutated record (e.g. "user", "invoice").
    pub record_type: String,

    /// Identity of the mutated record within its type.
    pub record_id: RecordId,

    /// Which lifecycle event produced this row.
    pub kind: ChangeKind,

    /// Correlation identifier grouping all rows of one mutation event.
    ///
    /// Always populated by the recorder — single-row events form a
    /// change set of one. At most 32 bytes.
    pub change_set: Option<String>,

    /// The changed attribute name. `None` for non-update events.
    pub attribute: Option<String>,

    /// Rendered pre-mutation value, or the redaction sentinel for sensitive
    /// attributes. `None` for non-update events and for absent/null values.
    pub old_value: Option<String>,

    /// Rendered post-mutation value, under the same rules as `old_value`.
    pub new_value: Option<String>,

    /// Wall-clock time (UTC) the lifecycle notification was processed.
    pub recorded_at: DateTime<Utc>,
}
