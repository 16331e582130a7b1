//! Attribute filtering: which changed attributes get logged.
//!
//! Filtering algorithm, in order:
//!
//! 1. If an allow-list is configured, keep only changed attributes on it —
//!    and drop from the timestamp set any column the allow-list names, so an
//!    explicitly allow-listed timestamp column is still logged.
//! 2. If a deny-list is configured, remove everything on it, together with
//!    the (possibly reduced) timestamp set.
//! 3. With no deny-list, remove only the timestamp set.
//!
//! An attribute on both lists is excluded: the deny-list is applied after
//! the allow-list and wins. Contradictory configuration is never an error.

use std::collections::BTreeSet;

use tracing::debug;

use crate::traits::Trackable;

/// Reduce `changed` to the subset that should be logged.
///
/// `allow` and `deny` are the record's explicit lists; an empty set means
/// the list is not configured. `timestamps` holds the automatically managed
/// timestamp columns, excluded by default.
pub fn loggable_attributes(
    changed: &BTreeSet<String>,
    allow: &BTreeSet<String>,
    deny: &BTreeSet<String>,
    timestamps: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut retained = changed.clone();
    let mut timestamps = timestamps.clone();

    if !allow.is_empty() {
        retained.retain(|attribute| allow.contains(attribute));
        // An allow-listed timestamp column is an explicit request to log it.
        timestamps.retain(|column| !allow.contains(column));
    }

    if !deny.is_empty() {
        retained.retain(|attribute| !deny.contains(attribute) && !timestamps.contains(attribute));
    } else {
        retained.retain(|attribute| !timestamps.contains(attribute));
    }

    debug!(
        changed = changed.len(),
        retained = retained.len(),
        "attribute filter applied"
    );

    retained
}

/// The timestamp columns of `record` that are excluded from logging by
/// default.
///
/// Empty when the record does not use managed timestamps. Includes the
/// soft-delete column only when the record declares one.
pub fn timestamp_attributes(record: &dyn Trackable) -> BTreeSet<String> {
    if !record.uses_timestamps() {
        return BTreeSet::new();
    }

    let mut columns = BTreeSet::new();
    columns.insert(record.created_at_column().to_string());
    columns.insert(record.updated_at_column().to_string());
    if let Some(deleted_at) = record.deleted_at_column() {
        columns.insert(deleted_at.to_string());
    }

    columns
}
