//! Per-attribute diff type and the sensitive-value redaction sentinel.

use serde::{Deserialize, Serialize};

/// The old/new value pair extracted for one changed attribute.
///
/// `old_value` and `new_value` are rendered text (see `crate::value`), or
/// both [`AttributeDiff::REDACTED`] when the attribute is sensitive — the
/// real contents of a sensitive attribute never reach the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDiff {
    /// The attribute name.
    pub attribute: String,

    /// Rendered pre-mutation value. `None` when the attribute was absent or
    /// null before the mutation.
    pub old_value: Option<String>,

    /// Rendered post-mutation value. `None` when the attribute is now
    /// absent or null.
    pub new_value: Option<String>,
}

impl AttributeDiff {
    /// The fixed sentinel stored in place of a sensitive attribute's values.
    ///
    /// The audit trail is typically readable by a broader population than
    /// the record itself, so sensitive values are replaced before emission
    /// rather than at display time.
    pub const REDACTED: &'static str = "** HIDDEN **";

    /// Build the diff for a sensitive attribute: both positions carry the
    /// redaction sentinel, regardless of the real values.
    pub fn redacted(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            old_value: Some(Self::REDACTED.to_string()),
            new_value: Some(Self::REDACTED.to_string()),
        }
    }
}
