//! Document repository contracts over the key/value store.
//!
//! # Responsibility
//! - Materialize the planning document from storage (parse, migrate or
//!   default) and write it back as one blob.
//!
//! # Invariants
//! - Only store failures propagate; malformed stored data degrades to
//!   parse warnings or defaults, never to errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document_repo;

pub use document_repo::{
    DocumentRepository, APP_DATA_KEY, LEGACY_EVENT_KEY, LEGACY_LADEF_KEY, LEGACY_SLOTLISTE_KEY,
};

use crate::store::StoreError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error: the only hard failure source is the local store.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
