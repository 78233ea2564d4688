//! Core domain logic for the Einsatzplan event planner.
//! This crate is the single source of truth for the document format and
//! its storage semantics.

pub mod codec;
pub mod config;
pub mod defaults;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod sync;

pub use codec::{DocumentCodec, ParseOutcome, ParseWarning};
pub use config::RemoteConfig;
pub use defaults::DefaultTables;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    BrevityCode, CustomChecklistItem, EventDocument, EventInfo, Ladef, ModEntry, RadioNet,
    SlotAssignment, SLOT_MAX, SLOT_MIN,
};
pub use repo::{DocumentRepository, RepoError, RepoResult, APP_DATA_KEY};
pub use service::{DocumentPatch, PlanService};
pub use store::{open_store, open_store_in_memory, KvStore, SqliteKvStore, StoreError};
pub use sync::{RemoteStore, RemoteSync};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
