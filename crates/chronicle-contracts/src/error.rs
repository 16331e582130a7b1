//! Error types for the Chronicle engine.
//!
//! The surface is deliberately narrow. Contradictory filter configuration is
//! never an error (the deny-list silently wins), and the read-only query
//! helpers cannot fail — so the persistence sink is the engine's only
//! failure source.

use thiserror::Error;

/// The unified error type for the Chronicle crates.
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// The change store could not persist an emitted row.
    ///
    /// Propagated to the lifecycle caller as-is. Rows already appended for
    /// the same change set stay in the store — the engine performs no
    /// rollback and no retries, so readers must tolerate partial change
    /// sets.
    #[error("change store rejected row: {reason}")]
    StoreRejected { reason: String },
}

/// Convenience alias used throughout the Chronicle crates.
pub type ChronicleResult<T> = Result<T, ChronicleError>;
