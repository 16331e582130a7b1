//! # chronicle-core
//!
//! The diffing, filtering, and change-set correlation engine of Chronicle.
//!
//! This crate provides:
//! - The two boundary traits (`Trackable`, `ChangeStore`)
//! - The attribute filter and diff extractor
//! - Change-set identifier construction
//! - The `ChangeRecorder` that wires them together per lifecycle event
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chronicle_core::{ChangeRecorder, traits::{Trackable, ChangeStore}};
//! use chronicle_contracts::record::ActorId;
//!
//! let recorder = ChangeRecorder::new(ActorId::new("user-1"), store);
//! recorder.updated(&record)?;
//! ```

pub mod changeset;
pub mod diff;
pub mod filter;
pub mod recorder;
pub mod traits;

pub use changeset::ChangeSetMode;
pub use recorder::ChangeRecorder;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use chronicle_contracts::{
        change::ChangeKind,
        diff::AttributeDiff,
        record::{ActorId, RecordId},
    };

    use crate::traits::Trackable;
    use crate::{changeset, diff, filter};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// A record fixture with configurable snapshots and metadata.
    struct TestRecord {
        attributes: BTreeMap<String, Value>,
        original: BTreeMap<String, Value>,
        allow: BTreeSet<String>,
        deny: BTreeSet<String>,
        sensitive: BTreeSet<String>,
        soft_deletes: bool,
    }

    impl TestRecord {
        fn new() -> Self {
            Self {
                attributes: BTreeMap::new(),
                original: BTreeMap::new(),
                allow: BTreeSet::new(),
                deny: BTreeSet::new(),
                sensitive: BTreeSet::new(),
                soft_deletes: false,
            }
        }

        /// Register one attribute mutation: `old` in the original snapshot,
        /// `new` as the current value.
        fn change(mut self, name: &str, old: Value, new: Value) -> Self {
            self.original.insert(name.to_string(), old);
            self.attributes.insert(name.to_string(), new);
            self
        }

        /// Register an attribute that only exists in the current state.
        fn fresh(mut self, name: &str, new: Value) -> Self {
            self.attributes.insert(name.to_string(), new);
            self
        }
    }

    impl Trackable for TestRecord {
        fn record_id(&self) -> RecordId {
            RecordId::new("7")
        }

        fn record_type(&self) -> &str {
            "user"
        }

        fn attributes(&self) -> &BTreeMap<String, Value> {
            &self.attributes
        }

        fn original(&self) -> &BTreeMap<String, Value> {
            &self.original
        }

        fn loggable_attributes(&self) -> BTreeSet<String> {
            self.allow.clone()
        }

        fn unloggable_attributes(&self) -> BTreeSet<String> {
            self.deny.clone()
        }

        fn sensitive_attributes(&self) -> BTreeSet<String> {
            self.sensitive.clone()
        }

        fn deleted_at_column(&self) -> Option<&str> {
            self.soft_deletes.then_some("deleted_at")
        }
    }

    // ── Attribute filter ──────────────────────────────────────────────────────

    /// With no lists configured, only timestamp columns are removed.
    #[test]
    fn filter_removes_timestamps_by_default() {
        let retained = filter::loggable_attributes(
            &set(&["name", "email", "updated_at"]),
            &set(&[]),
            &set(&[]),
            &set(&["created_at", "updated_at"]),
        );

        assert_eq!(retained, set(&["name", "email"]));
    }

    /// An empty changed set yields an empty result — no rows to emit.
    #[test]
    fn filter_of_nothing_is_nothing() {
        let retained = filter::loggable_attributes(
            &set(&[]),
            &set(&["name"]),
            &set(&["email"]),
            &set(&["created_at"]),
        );

        assert!(retained.is_empty());
    }

    /// An allow-list restricts the changed set to its intersection.
    #[test]
    fn filter_allow_list_restricts() {
        let retained = filter::loggable_attributes(
            &set(&["name", "email", "phone"]),
            &set(&["name"]),
            &set(&[]),
            &set(&[]),
        );

        assert_eq!(retained, set(&["name"]));
    }

    /// An explicitly allow-listed timestamp column is still logged.
    #[test]
    fn filter_allow_list_rescues_timestamp_column() {
        let retained = filter::loggable_attributes(
            &set(&["name", "updated_at"]),
            &set(&["name", "updated_at"]),
            &set(&[]),
            &set(&["created_at", "updated_at"]),
        );

        assert_eq!(retained, set(&["name", "updated_at"]));
    }

    /// A deny-list removes its members from the result.
    #[test]
    fn filter_deny_list_removes() {
        let retained = filter::loggable_attributes(
            &set(&["name", "email"]),
            &set(&[]),
            &set(&["email"]),
            &set(&[]),
        );

        assert_eq!(retained, set(&["name"]));
    }

    /// Timestamps are removed alongside the deny-list, not instead of it.
    #[test]
    fn filter_deny_list_keeps_timestamp_exclusion() {
        let retained = filter::loggable_attributes(
            &set(&["name", "email", "updated_at"]),
            &set(&[]),
            &set(&["email"]),
            &set(&["updated_at"]),
        );

        assert_eq!(retained, set(&["name"]));
    }

    /// An attribute on both lists is excluded — deny wins, applied after
    /// allow.
    #[test]
    fn filter_deny_wins_over_allow() {
        let retained = filter::loggable_attributes(
            &set(&["name", "email"]),
            &set(&["name", "email"]),
            &set(&["email"]),
            &set(&[]),
        );

        assert_eq!(retained, set(&["name"]));
    }

    /// Timestamp columns come from the record's metadata, including the
    /// soft-delete marker only when declared.
    #[test]
    fn timestamp_attributes_follow_record_metadata() {
        let plain = TestRecord::new();
        assert_eq!(
            filter::timestamp_attributes(&plain),
            set(&["created_at", "updated_at"])
        );

        let mut soft = TestRecord::new();
        soft.soft_deletes = true;
        assert_eq!(
            filter::timestamp_attributes(&soft),
            set(&["created_at", "updated_at", "deleted_at"])
        );
    }

    // ── Diff extraction ───────────────────────────────────────────────────────

    /// Old and new values come from the original snapshot and the current
    /// state, in ordered-attribute order.
    #[test]
    fn extract_pairs_original_and_current_values() {
        let record = TestRecord::new()
            .change("name", json!("A"), json!("B"))
            .change("email", json!("x"), json!("y"));

        let diffs = diff::extract(&record);

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].attribute, "email");
        assert_eq!(diffs[0].old_value.as_deref(), Some("x"));
        assert_eq!(diffs[0].new_value.as_deref(), Some("y"));
        assert_eq!(diffs[1].attribute, "name");
        assert_eq!(diffs[1].old_value.as_deref(), Some("A"));
        assert_eq!(diffs[1].new_value.as_deref(), Some("B"));
    }

    /// A sensitive attribute's diff carries the sentinel in both positions
    /// and never the real content.
    #[test]
    fn extract_redacts_sensitive_attributes() {
        let mut record = TestRecord::new().change("password", json!("old-secret"), json!("s3cret"));
        record.sensitive = set(&["password"]);

        let diffs = diff::extract(&record);

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].old_value.as_deref(), Some(AttributeDiff::REDACTED));
        assert_eq!(diffs[0].new_value.as_deref(), Some(AttributeDiff::REDACTED));

        let rendered = format!("{:?}", diffs);
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("old-secret"));
    }

    /// An attribute set for the first time has no old value; a null value
    /// renders as absent.
    #[test]
    fn extract_handles_absent_and_null_values() {
        let record = TestRecord::new()
            .fresh("nickname", json!("ali"))
            .change("bio", json!("hello"), json!(null));

        let diffs = diff::extract(&record);

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].attribute, "bio");
        assert_eq!(diffs[0].old_value.as_deref(), Some("hello"));
        assert_eq!(diffs[0].new_value, None);
        assert_eq!(diffs[1].attribute, "nickname");
        assert_eq!(diffs[1].old_value, None);
        assert_eq!(diffs[1].new_value.as_deref(), Some("ali"));
    }

    /// Structured attribute values are serialized to canonical JSON text.
    #[test]
    fn extract_serializes_structured_values() {
        let record = TestRecord::new().change(
            "address",
            json!({ "city": "Berlin" }),
            json!({ "city": "Paris" }),
        );

        let diffs = diff::extract(&record);

        assert_eq!(diffs[0].old_value.as_deref(), Some("{\"city\":\"Berlin\"}"));
        assert_eq!(diffs[0].new_value.as_deref(), Some("{\"city\":\"Paris\"}"));
    }

    /// An unchanged attribute produces no diff.
    #[test]
    fn extract_skips_unchanged_attributes() {
        let record = TestRecord::new()
            .change("name", json!("A"), json!("A"))
            .change("email", json!("x"), json!("y"));

        let diffs = diff::extract(&record);

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].attribute, "email");
    }

    // ── Change-set identifiers ────────────────────────────────────────────────

    fn base_id(at: chrono::DateTime<Utc>) -> String {
        changeset::generate(
            &ActorId::new("auditor-1"),
            "user",
            &RecordId::new("7"),
            ChangeKind::Update,
            at,
        )
    }

    /// The identifier fits the sink column and splits into hash, seconds,
    /// and microseconds.
    #[test]
    fn generate_shape_and_length() {
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 22, 12, 58).unwrap();
        let id = base_id(at);

        assert!(id.len() <= changeset::MAX_LEN);

        let parts: Vec<&str> = id.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 8);
        assert!(parts[0].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[1], at.timestamp().to_string());
        assert_eq!(parts[2], "000000");
    }

    /// Identical payload and timestamp produce the identical identifier —
    /// the key is content-addressable.
    #[test]
    fn generate_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 22, 12, 58).unwrap();
        assert_eq!(base_id(at), base_id(at));
    }

    /// Any differing payload field changes the hash component.
    #[test]
    fn generate_commits_to_every_payload_field() {
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 22, 12, 58).unwrap();
        let base = base_id(at);

        let other_actor = changeset::generate(
            &ActorId::new("auditor-2"),
            "user",
            &RecordId::new("7"),
            ChangeKind::Update,
            at,
        );
        let other_kind = changeset::generate(
            &ActorId::new("auditor-1"),
            "user",
            &RecordId::new("7"),
            ChangeKind::Delete,
            at,
        );

        assert_ne!(base, other_actor);
        assert_ne!(base, other_kind);
    }

    /// For one payload, identifiers sort by emission time at sub-second
    /// resolution.
    #[test]
    fn generate_sorts_by_emission_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 6, 22, 12, 58).unwrap();
        let later = earlier + chrono::Duration::microseconds(250);

        assert!(base_id(earlier) < base_id(later));
    }

    /// Random identifiers are 32 hex chars and unique across calls.
    #[test]
    fn random_identifiers_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| changeset::random()).collect();

        assert_eq!(ids.len(), 100);
        for id in &ids {
            assert_eq!(id.len(), 32);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
