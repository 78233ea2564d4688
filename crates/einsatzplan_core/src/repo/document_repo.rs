//! Document load/save over the key/value store, including the one-shot
//! legacy migration.
//!
//! # Responsibility
//! - Load the consolidated document, falling back to legacy-key migration
//!   and finally to the compiled-in defaults.
//! - Save the document as one atomic upsert of the consolidated key.
//!
//! # Invariants
//! - The legacy migration runs at most once: it writes the consolidated
//!   key and deletes all legacy keys in the same load.
//! - The defaults path never persists anything.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::codec::{DocumentCodec, ParseOutcome};
use crate::model::document::{EventDocument, SlotAssignment, SLOT_MAX, SLOT_MIN};
use crate::repo::RepoResult;
use crate::store::KvStore;

/// Consolidated store key holding the whole serialized document.
pub const APP_DATA_KEY: &str = "pve-event-csv";
/// Legacy per-section JSON keys, read once for migration then deleted.
pub const LEGACY_EVENT_KEY: &str = "pve-event-data";
pub const LEGACY_SLOTLISTE_KEY: &str = "pve-slotliste-data";
pub const LEGACY_LADEF_KEY: &str = "pve-ladef-data";

/// Repository over one `KvStore`, owning the codec and its default tables.
pub struct DocumentRepository<S: KvStore> {
    store: S,
    codec: DocumentCodec,
}

impl<S: KvStore> DocumentRepository<S> {
    /// Creates a repository with the compiled-in default tables.
    pub fn new(store: S) -> Self {
        Self::with_codec(store, DocumentCodec::with_builtin_tables())
    }

    /// Creates a repository with a caller-provided codec (test tables).
    pub fn with_codec(store: S, codec: DocumentCodec) -> Self {
        Self { store, codec }
    }

    pub fn codec(&self) -> &DocumentCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the current document.
    ///
    /// Order: consolidated key, then legacy migration, then defaults.
    /// Malformed stored text degrades to warnings; only store failures
    /// propagate.
    pub fn load(&self) -> RepoResult<ParseOutcome> {
        if let Some(text) = self.store.get(APP_DATA_KEY)? {
            if !text.trim().is_empty() {
                return Ok(self.codec.split(&text));
            }
        }

        if let Some(document) = self.migrate_legacy()? {
            return Ok(ParseOutcome {
                document,
                warnings: Vec::new(),
            });
        }

        Ok(ParseOutcome {
            document: EventDocument::with_defaults(self.codec.tables()),
            warnings: Vec::new(),
        })
    }

    /// Serializes and stores the document, returning the written text so
    /// callers can hand it to the remote mirror.
    pub fn save(&self, document: &EventDocument) -> RepoResult<String> {
        let text = self.codec.assemble(document);
        self.store.set(APP_DATA_KEY, &text)?;
        info!(
            "event=document_save module=repo status=ok bytes={}",
            text.len()
        );
        Ok(text)
    }

    /// Converts the legacy multi-key JSON layout into one consolidated
    /// document, persists it and deletes the legacy keys.
    ///
    /// Returns `None` when no legacy key holds decodable data.
    fn migrate_legacy(&self) -> RepoResult<Option<EventDocument>> {
        let event = decode_legacy::<LegacyEventData>(self.store.get(LEGACY_EVENT_KEY)?);
        let slots = decode_legacy::<BTreeMap<String, LegacySlot>>(
            self.store.get(LEGACY_SLOTLISTE_KEY)?,
        );
        let ladef = decode_legacy::<LegacyLadef>(self.store.get(LEGACY_LADEF_KEY)?);

        if event.is_none() && slots.is_none() && ladef.is_none() {
            return Ok(None);
        }

        info!("event=legacy_migration module=repo status=start");

        let mut document = EventDocument::empty();
        if let Some(event) = event {
            document.event.datum = event.datum;
            document.event.uhrzeit = event.uhrzeit;
            document.event.server = event.server;
        }
        if let Some(slots) = slots {
            for (raw_slot, legacy) in slots {
                let Ok(slot) = raw_slot.trim().parse::<u8>() else {
                    continue;
                };
                if !(SLOT_MIN..=SLOT_MAX).contains(&slot) {
                    continue;
                }
                document.slots.insert(
                    slot,
                    SlotAssignment {
                        role: legacy.role,
                        name: legacy.name,
                        notes: legacy.notes,
                    },
                );
            }
        }
        if let Some(ladef) = ladef {
            document.ladef.lage = ladef.lage;
            document.ladef.auftrag = ladef.auftrag;
            document.ladef.durchfuehrung = ladef.durchfuehrung;
            document.ladef.einsatz = ladef.einsatz;
            document.ladef.fuehrung = ladef.fuehrung;
        }
        // Newer sections stay empty; only the structural checklist ids are
        // seeded so the section round-trips deterministically.
        for id in self.codec.tables().checklist_ids {
            document.checklist.insert((*id).to_string(), false);
        }

        let text = self.codec.assemble(&document);
        self.store.set(APP_DATA_KEY, &text)?;
        self.store.remove(LEGACY_EVENT_KEY)?;
        self.store.remove(LEGACY_SLOTLISTE_KEY)?;
        self.store.remove(LEGACY_LADEF_KEY)?;

        info!(
            "event=legacy_migration module=repo status=ok bytes={}",
            text.len()
        );
        Ok(Some(document))
    }
}

fn decode_legacy<T: DeserializeOwned>(raw: Option<String>) -> Option<T> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("event=legacy_migration module=repo status=skip_key error={err}");
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyEventData {
    datum: String,
    uhrzeit: String,
    server: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacySlot {
    role: String,
    name: String,
    notes: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyLadef {
    lage: String,
    auftrag: String,
    durchfuehrung: String,
    einsatz: String,
    fuehrung: String,
}
