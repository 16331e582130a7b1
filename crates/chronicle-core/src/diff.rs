//! Diff extraction: per-attribute (old, new) pairs for one update event.

use chronicle_contracts::{diff::AttributeDiff, value};

use crate::{filter, traits::Trackable};

/// Extract the loggable attribute diffs for one update of `record`.
///
/// Runs the attribute filter over the record's changed set, then for each
/// retained attribute emits either the redaction sentinel pair (sensitive
/// attributes) or the rendered original and current values.
///
/// The output preserves the ordered iteration of the filtered set, so one
/// event's batch is deterministic for a given record state. An empty result
/// means the update has nothing to log.
pub fn extract(record: &dyn Trackable) -> Vec<AttributeDiff> {
    let retained = filter::loggable_attributes(
        &record.changed_attributes(),
        &record.loggable_attributes(),
        &record.unloggable_attributes(),
        &filter::timestamp_attributes(record),
    );
    let sensitive = record.sensitive_attributes();

    retained
        .into_iter()
        .map(|attribute| {
            if sensitive.contains(&attribute) {
                return AttributeDiff::redacted(attribute);
            }

            let old_value = record.original().get(&attribute).and_then(value::render);
            let new_value = record.attributes().get(&attribute).and_then(value::render);

            AttributeDiff {
                attribute,
                old_value,
                new_value,
            }
        })
        .collect()
}
