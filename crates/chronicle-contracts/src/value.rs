//! Attribute-value rendering.
//!
//! Change rows store values as plain text. Rendering rules:
//!
//!   1. `Null` renders as no value at all (`None`) — the sink column is
//!      nullable.
//!   2. Strings render as their raw contents, without JSON quoting, so the
//!      stored text matches what the record held.
//!   3. Everything else renders as compact canonical JSON. `serde_json`
//!      maps are key-ordered, so structurally equal values always render to
//!      identical text.
//!
//! Rendering is for observation, not reconstruction: a consumer can display
//! or re-parse the text, but round-tripping back to the original typed value
//! is not guaranteed.

use serde_json::Value;

/// Render one attribute value to its loggable text form.
pub fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
