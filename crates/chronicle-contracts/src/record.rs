//! Record and actor identity types.
//!
//! These newtypes name the two identities every change row is attributed to.
//! Chronicle never interprets their contents — they are opaque keys supplied
//! by the hosting application.

use serde::{Deserialize, Serialize};

/// Stable identifier of a tracked record within its record type.
///
/// Together with the record's type tag this locates the entity a change row
/// belongs to. Example: RecordId("42") under record type "user".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    /// Construct a record id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identity of the actor a change is attributed to.
///
/// Injected into the recorder at construction time — Chronicle has no notion
/// of an ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    /// Construct an actor id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
