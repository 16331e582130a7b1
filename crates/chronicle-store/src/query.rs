//! Read-only query helpers over stored change rows.
//!
//! Counterparts of the lookups the audit trail is indexed for: by event
//! kind, by change set, by owning record, and grouped by change set. They
//! operate on a snapshot slice (see `InMemoryChangeStore::rows()`), so
//! queries never block appends.
//!
//! A change set is "rows observed so far", not a guaranteed-complete
//! transaction: a failed append can leave a multi-row update partially
//! stored, and the engine performs no rollback.

use std::collections::BTreeMap;

use chronicle_contracts::{change::ChangeKind, record::RecordId};

use crate::row::StoredChange;

/// All rows recording the given event kind.
pub fn of_kind(rows: &[StoredChange], kind: ChangeKind) -> Vec<&StoredChange> {
    rows.iter().filter(|row| row.record.kind == kind).collect()
}

/// All rows belonging to the given change set, in emission order.
pub fn in_set<'a>(rows: &'a [StoredChange], set: &str) -> Vec<&'a StoredChange> {
    rows.iter()
        .filter(|row| row.record.change_set.as_deref() == Some(set))
        .collect()
}

/// All rows for one record, matched on type tag and identity.
pub fn for_record<'a>(
    rows: &'a [StoredChange],
    record_type: &str,
    record_id: &RecordId,
) -> Vec<&'a StoredChange> {
    rows.iter()
        .filter(|row| row.record.record_type == record_type && &row.record.record_id == record_id)
        .collect()
}

/// Rows grouped by change set, each group in emission order.
///
/// Rows without a change-set value are skipped — the engine always
/// populates one, so the case only arises for rows from other writers.
pub fn grouped_by_set(rows: &[StoredChange]) -> BTreeMap<String, Vec<&StoredChange>> {
    let mut groups: BTreeMap<String, Vec<&StoredChange>> = BTreeMap::new();

    for row in rows {
        if let Some(set) = row.record.change_set.as_deref() {
            groups.entry(set.to_string()).or_default().push(row);
        }
    }

    groups
}
