//! Planning document use-case service: partial updates, import and export.
//!
//! # Responsibility
//! - Apply a partial change set through one load-merge-save cycle.
//! - Provide the text seams for the external download trigger and file
//!   reader collaborators.
//!
//! # Invariants
//! - Scalar sections merge key-by-key; list sections and the respawn text
//!   replace wholesale when present in the patch.
//! - Fields absent from the patch are never touched.
//! - Last writer wins; there is no concurrent-editor merge.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::codec::ParseOutcome;
use crate::model::document::{
    BrevityCode, CustomChecklistItem, EventDocument, ModEntry, RadioNet, SLOT_MAX, SLOT_MIN,
};
use crate::repo::{DocumentRepository, RepoResult};
use crate::store::KvStore;

/// Partial update for the event metadata section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventInfoPatch {
    pub datum: Option<String>,
    pub uhrzeit: Option<String>,
    pub zeitzone: Option<String>,
    pub server: Option<String>,
    pub passwort: Option<String>,
    pub beschreibung: Option<String>,
    pub kontakt: Option<String>,
}

/// Partial update for one roster slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SlotPatch {
    pub role: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for the operation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LadefPatch {
    pub lage: Option<String>,
    pub auftrag: Option<String>,
    pub durchfuehrung: Option<String>,
    pub einsatz: Option<String>,
    pub fuehrung: Option<String>,
}

/// Partial change set applied to the current document.
///
/// `event`, `slots`, `ladef` and `checklist` are shallow-merged; the list
/// sections and `respawn` replace wholesale when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentPatch {
    pub event: Option<EventInfoPatch>,
    pub slots: Option<BTreeMap<u8, SlotPatch>>,
    pub ladef: Option<LadefPatch>,
    pub checklist: Option<BTreeMap<String, bool>>,
    pub custom_items: Option<Vec<CustomChecklistItem>>,
    pub funk: Option<Vec<RadioNet>>,
    pub mods: Option<Vec<ModEntry>>,
    pub brevity: Option<Vec<BrevityCode>>,
    pub respawn: Option<String>,
}

impl DocumentPatch {
    /// Merges this patch into `document` in place.
    pub fn apply_to(&self, document: &mut EventDocument) {
        if let Some(event) = &self.event {
            merge_option(&mut document.event.datum, &event.datum);
            merge_option(&mut document.event.uhrzeit, &event.uhrzeit);
            merge_option(&mut document.event.zeitzone, &event.zeitzone);
            merge_option(&mut document.event.server, &event.server);
            merge_option(&mut document.event.passwort, &event.passwort);
            merge_option(&mut document.event.beschreibung, &event.beschreibung);
            merge_option(&mut document.event.kontakt, &event.kontakt);
        }
        if let Some(slots) = &self.slots {
            for (slot, patch) in slots {
                if !(SLOT_MIN..=SLOT_MAX).contains(slot) {
                    continue;
                }
                let assignment = document.slots.entry(*slot).or_default();
                merge_option(&mut assignment.role, &patch.role);
                merge_option(&mut assignment.name, &patch.name);
                merge_option(&mut assignment.notes, &patch.notes);
            }
        }
        if let Some(ladef) = &self.ladef {
            merge_option(&mut document.ladef.lage, &ladef.lage);
            merge_option(&mut document.ladef.auftrag, &ladef.auftrag);
            merge_option(&mut document.ladef.durchfuehrung, &ladef.durchfuehrung);
            merge_option(&mut document.ladef.einsatz, &ladef.einsatz);
            merge_option(&mut document.ladef.fuehrung, &ladef.fuehrung);
        }
        if let Some(checklist) = &self.checklist {
            for (id, checked) in checklist {
                document.checklist.insert(id.clone(), *checked);
            }
        }
        if let Some(custom_items) = &self.custom_items {
            // Wholesale replacement: ids dropped from the custom list leave
            // the unified map too, new ids enter it with their own flag.
            for item in &document.custom_items {
                if !custom_items.iter().any(|new| new.id == item.id) {
                    document.checklist.remove(&item.id);
                }
            }
            for item in custom_items {
                document.checklist.insert(item.id.clone(), item.checked);
            }
            document.custom_items = custom_items.clone();
        }
        if let Some(funk) = &self.funk {
            document.funk = funk.clone();
        }
        if let Some(mods) = &self.mods {
            document.mods = mods.clone();
        }
        if let Some(brevity) = &self.brevity {
            document.brevity = brevity.clone();
        }
        if let Some(respawn) = &self.respawn {
            document.respawn = respawn.clone();
        }
    }
}

fn merge_option(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Use-case service wrapper around one document repository.
pub struct PlanService<S: KvStore> {
    repo: DocumentRepository<S>,
}

impl<S: KvStore> PlanService<S> {
    pub fn new(repo: DocumentRepository<S>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &DocumentRepository<S> {
        &self.repo
    }

    /// Loads the current document (parse, migrate or default).
    pub fn load(&self) -> RepoResult<ParseOutcome> {
        self.repo.load()
    }

    /// Applies one partial change set in a load-merge-save cycle and
    /// returns the merged document.
    pub fn update(&self, patch: &DocumentPatch) -> RepoResult<EventDocument> {
        let mut document = self.repo.load()?.document;
        patch.apply_to(&mut document);
        self.repo.save(&document)?;
        Ok(document)
    }

    /// Returns the serialized document text for the download trigger.
    pub fn export(&self) -> RepoResult<String> {
        let document = self.repo.load()?.document;
        Ok(self.repo.codec().assemble(&document))
    }

    /// Parses user-supplied text and stores it, returning the parse
    /// outcome so callers can surface warnings.
    pub fn import(&self, text: &str) -> RepoResult<ParseOutcome> {
        let outcome = self.repo.codec().split(text);
        self.repo.save(&outcome.document)?;
        Ok(outcome)
    }
}
