//! Change-set correlation identifiers.
//!
//! Every row emitted for one logical mutation carries the same change-set
//! identifier, so consumers can regroup an update's attribute rows after
//! the fact. Two constructions are available:
//!
//! - [`generate`] (the default): a content-derived short hash of the base
//!   payload joined with the event timestamp. Identifier layout:
//!
//!     `{sha256[..8]}.{unix_secs}.{micros:06}`
//!
//!   Content-addressable (identical payload + timestamp → identical id) and
//!   sortable by emission order at microsecond resolution.
//! - [`random`]: a UUIDv4 in simple form. Use via
//!   `ChangeSetMode::Random` when uniqueness must be guaranteed rather
//!   than merely probable — the hash+wall-clock form can collide under
//!   high-frequency concurrent writes with clock skew.
//!
//! These are correlation keys, not security tokens.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use chronicle_contracts::{
    change::ChangeKind,
    record::{ActorId, RecordId},
};

/// Maximum identifier length, matching the sink's `set` column width.
///
/// Both constructions stay within it: the hash form is 26 bytes for any
/// contemporary timestamp, the random form exactly 32.
pub const MAX_LEN: usize = 32;

/// How the recorder issues change-set identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeSetMode {
    /// Content hash + event timestamp (see [`generate`]).
    #[default]
    ContentHash,

    /// Random UUIDv4 (see [`random`]).
    Random,
}

/// Build the content-hash change-set identifier for one mutation event.
///
/// The hash commits to every field of the base payload: actor, record type,
/// record identity, and event kind. Each contributing field is fed to the
/// hasher explicitly so nothing is accidentally omitted.
pub fn generate(
    actor: &ActorId,
    record_type: &str,
    record_id: &RecordId,
    kind: ChangeKind,
    at: DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(actor.0.as_bytes());
    hasher.update(record_type.as_bytes());
    hasher.update(record_id.0.as_bytes());
    hasher.update(kind.as_str().as_bytes());
    let digest = hex::encode(hasher.finalize());

    let id = format!(
        "{}.{}.{:06}",
        &digest[..8],
        at.timestamp(),
        at.timestamp_subsec_micros()
    );
    debug_assert!(id.len() <= MAX_LEN);
    id
}

/// Build a random change-set identifier: 32 lowercase hex characters.
pub fn random() -> String {
    Uuid::new_v4().simple().to_string()
}
