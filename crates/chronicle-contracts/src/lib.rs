//! # chronicle-contracts
//!
//! Shared types and contracts for the Chronicle change-tracking engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, value rendering, and error types.

pub mod change;
pub mod diff;
pub mod error;
pub mod record;
pub mod value;
