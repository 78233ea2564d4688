//! Best-effort remote mirroring of the consolidated document.
//!
//! # Responsibility
//! - Define the remote document store seam and the pull/push coordinator.
//!
//! # Invariants
//! - Remote failures never propagate; local state stays authoritative.

pub mod remote;

pub use remote::{
    RemoteDocument, RemoteError, RemoteStore, RemoteSync, REMOTE_DOCUMENT_KEY, REMOTE_TABLE,
};
