//! Event planning document aggregate.
//!
//! # Responsibility
//! - Define the record types for every section of the planning document.
//! - Provide constructors for the empty and the all-defaults shape.
//!
//! # Invariants
//! - `zeitzone` defaults to `"MEZ"` and is never persisted empty.
//! - Slot keys outside 1..=33 never enter the aggregate.
//! - Custom checklist item ids are mirrored into the unified checklist map
//!   on load; the map is authoritative until the next save.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults::DefaultTables;

/// First valid roster slot number.
pub const SLOT_MIN: u8 = 1;
/// Last valid roster slot number. The roster never grows or shrinks.
pub const SLOT_MAX: u8 = 33;

/// Timezone written when none was ever entered.
pub const DEFAULT_TIMEZONE: &str = "MEZ";

/// Event metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInfo {
    pub datum: String,
    pub uhrzeit: String,
    pub zeitzone: String,
    pub server: String,
    pub passwort: String,
    pub beschreibung: String,
    pub kontakt: String,
}

impl Default for EventInfo {
    fn default() -> Self {
        Self {
            datum: String::new(),
            uhrzeit: String::new(),
            zeitzone: DEFAULT_TIMEZONE.to_string(),
            server: String::new(),
            passwort: String::new(),
            beschreibung: String::new(),
            kontakt: String::new(),
        }
    }
}

/// One roster slot. Field names match the legacy per-slot JSON keys.
///
/// An empty `role` means "use the compiled-in default for this slot number";
/// the default is applied at serialize time only and never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotAssignment {
    pub role: String,
    pub name: String,
    pub notes: String,
}

/// Five-part operation order (Lage, Auftrag, Durchführung, Einsatz, Führung).
///
/// All fields are free text and may contain the document's own delimiter
/// characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ladef {
    pub lage: String,
    pub auftrag: String,
    pub durchfuehrung: String,
    pub einsatz: String,
    pub fuehrung: String,
}

/// User-defined checklist entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

/// One radio net row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioNet {
    pub netz: String,
    pub primaer: String,
    pub ausweich: String,
    pub teilnehmer: String,
}

/// One mod list row. `kategorie` comes from the closed category-id set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModEntry {
    pub name: String,
    pub kategorie: String,
}

/// One brevity code row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrevityCode {
    pub code: String,
    pub bedeutung: String,
}

/// The consolidated planning document, loaded and saved as one blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDocument {
    pub event: EventInfo,
    /// Occupied roster slots, keyed 1..=33. Unset slots are still emitted
    /// on serialize with their compiled-in default role.
    pub slots: BTreeMap<u8, SlotAssignment>,
    pub ladef: Ladef,
    /// Unified checklist state over built-in and custom item ids.
    pub checklist: BTreeMap<String, bool>,
    pub custom_items: Vec<CustomChecklistItem>,
    pub funk: Vec<RadioNet>,
    pub mods: Vec<ModEntry>,
    pub brevity: Vec<BrevityCode>,
    /// Respawn rules, one free-text value. Empty means "section omitted".
    pub respawn: String,
}

impl EventDocument {
    /// Returns the all-empty document shape (timezone already defaulted).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a document populated from the compiled-in default tables.
    ///
    /// Slot roles are intentionally not materialized here; they stay
    /// serialize-time defaults so later table changes still apply.
    pub fn with_defaults(tables: &DefaultTables) -> Self {
        let mut document = Self::empty();
        for id in tables.checklist_ids {
            document.checklist.insert((*id).to_string(), false);
        }
        document.funk = tables
            .radio_nets
            .iter()
            .map(|(netz, primaer, ausweich, teilnehmer)| RadioNet {
                netz: (*netz).to_string(),
                primaer: (*primaer).to_string(),
                ausweich: (*ausweich).to_string(),
                teilnehmer: (*teilnehmer).to_string(),
            })
            .collect();
        document.mods = tables
            .mods
            .iter()
            .map(|(name, kategorie)| ModEntry {
                name: (*name).to_string(),
                kategorie: (*kategorie).to_string(),
            })
            .collect();
        document.brevity = tables
            .brevity_codes
            .iter()
            .map(|(code, bedeutung)| BrevityCode {
                code: (*code).to_string(),
                bedeutung: (*bedeutung).to_string(),
            })
            .collect();
        document
    }

    /// Returns the checklist map merged with custom item ids.
    ///
    /// Map entries win over the item's own flag; ids only present on custom
    /// items are added with the item's flag.
    pub fn unified_checklist(&self) -> BTreeMap<String, bool> {
        let mut unified = self.checklist.clone();
        for item in &self.custom_items {
            unified.entry(item.id.clone()).or_insert(item.checked);
        }
        unified
    }

    /// Inserts a slot assignment, rejecting out-of-range slot numbers.
    pub fn set_slot(&mut self, slot: u8, assignment: SlotAssignment) -> bool {
        if !(SLOT_MIN..=SLOT_MAX).contains(&slot) {
            return false;
        }
        self.slots.insert(slot, assignment);
        true
    }
}
