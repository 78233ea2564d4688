//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `einsatzplan_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use einsatzplan_core::store::{open_store_in_memory, SqliteKvStore};
use einsatzplan_core::{DocumentRepository, RemoteConfig};

fn main() {
    println!("einsatzplan_core version={}", einsatzplan_core::core_version());

    // Why: probe the defaults load path end to end without touching any
    // on-disk state.
    match probe_defaults() {
        Ok(summary) => println!("{summary}"),
        Err(err) => eprintln!("einsatzplan probe failed: {err}"),
    }

    let sync = if RemoteConfig::from_env().is_some() {
        "enabled"
    } else {
        "disabled"
    };
    println!("remote sync={sync}");
}

fn probe_defaults() -> Result<String, Box<dyn std::error::Error>> {
    let conn = open_store_in_memory()?;
    let repo = DocumentRepository::new(SqliteKvStore::new(&conn));
    let outcome = repo.load()?;
    Ok(format!(
        "defaults: funk={} mods={} brevity={} checkliste={}",
        outcome.document.funk.len(),
        outcome.document.mods.len(),
        outcome.document.brevity.len(),
        outcome.document.checklist.len()
    ))
}
