//! Remote store seam and best-effort sync coordinator.
//!
//! # Responsibility
//! - Pull the latest remote document into the local store on startup.
//! - Push the freshly saved document after every local save.
//!
//! # Invariants
//! - Both directions swallow every failure (no retry, no backoff); they
//!   only emit log events.
//! - The remote mirror is an optimization, never a dependency of local
//!   read/write.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::{info, warn};

use crate::repo::APP_DATA_KEY;
use crate::store::KvStore;

/// Remote table holding one row per application.
pub const REMOTE_TABLE: &str = "app_data";
/// Fixed row key for this application's document.
pub const REMOTE_DOCUMENT_KEY: &str = "pve-event";

/// Failure reported by a remote store client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No remote endpoint is configured.
    NotConfigured,
    /// Network or protocol failure.
    Transport(String),
    /// The remote endpoint answered but refused the operation.
    Rejected { code: String, message: String },
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "remote store is not configured"),
            Self::Transport(message) => write!(f, "remote transport failed: {message}"),
            Self::Rejected { code, message } => {
                write!(f, "remote store rejected operation ({code}): {message}")
            }
        }
    }
}

impl Error for RemoteError {}

/// One fetched remote row: the document text and its update stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    pub value: String,
    pub updated_at: Option<String>,
}

/// Contract for the external remote synchronization client.
pub trait RemoteStore {
    /// Fetches the latest stored document, `None` when the row is absent.
    fn fetch_latest(&self) -> Result<Option<RemoteDocument>, RemoteError>;
    /// Pushes the document text, stamping the row's update time.
    fn push(&self, document: &str) -> Result<(), RemoteError>;
}

/// Best-effort coordinator between the remote store and the local one.
pub struct RemoteSync<R: RemoteStore> {
    remote: R,
}

impl<R: RemoteStore> RemoteSync<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    /// Startup pull: overwrites the local consolidated key with the remote
    /// document when one exists.
    ///
    /// Returns whether a remote document was applied — the completion
    /// signal observers may react to. All failures are swallowed.
    pub fn pull_into<S: KvStore>(&self, store: &S) -> bool {
        match self.remote.fetch_latest() {
            Ok(Some(document)) if !document.value.is_empty() => {
                match store.set(APP_DATA_KEY, &document.value) {
                    Ok(()) => {
                        info!(
                            "event=remote_pull module=sync status=ok bytes={}",
                            document.value.len()
                        );
                        true
                    }
                    Err(err) => {
                        warn!("event=remote_pull module=sync status=error error={err}");
                        false
                    }
                }
            }
            Ok(_) => {
                info!("event=remote_pull module=sync status=empty");
                false
            }
            Err(err) => {
                warn!("event=remote_pull module=sync status=error error={err}");
                false
            }
        }
    }

    /// Post-save push of the freshly serialized document text.
    ///
    /// Returns whether the push succeeded. All failures are swallowed.
    pub fn push_after_save(&self, document: &str) -> bool {
        match self.remote.push(document) {
            Ok(()) => {
                info!(
                    "event=remote_push module=sync status=ok bytes={}",
                    document.len()
                );
                true
            }
            Err(err) => {
                warn!("event=remote_push module=sync status=error error={err}");
                false
            }
        }
    }
}
