//! Compiled-in default tables for the event planning document.
//!
//! # Responsibility
//! - Provide the default slot-role table, radio nets, mod list, brevity
//!   codes, built-in checklist ids and the closed mod-category set.
//! - Keep all tables immutable and injectable, so codec and repository
//!   callers (and tests) can substitute alternates.
//!
//! # Invariants
//! - `SLOT_ROLES` covers exactly slots 1..=33.
//! - Default mods only use category ids from `MOD_CATEGORIES`.

use crate::model::document::{SLOT_MAX, SLOT_MIN};

/// Default role per slot number, index 0 holding slot 1.
///
/// One platoon lead followed by four eight-man squads.
const SLOT_ROLES: [&str; 33] = [
    "Platoon Lead (PL)",
    "Squad Lead (SL)",
    "Medic",
    "FTL Alpha",
    "Rifleman",
    "Rifleman",
    "FTL Bravo",
    "Rifleman",
    "Rifleman",
    "Squad Lead (SL)",
    "Medic",
    "FTL Alpha",
    "Rifleman",
    "Rifleman",
    "FTL Bravo",
    "Rifleman",
    "Rifleman",
    "Squad Lead (SL)",
    "Medic",
    "FTL Alpha",
    "Rifleman",
    "Rifleman",
    "FTL Bravo",
    "Rifleman",
    "Rifleman",
    "Squad Lead (SL)",
    "Medic",
    "FTL Alpha",
    "Rifleman",
    "Rifleman",
    "FTL Bravo",
    "Rifleman",
    "Rifleman",
];

/// Closed set of mod category ids accepted by the planner UI.
const MOD_CATEGORIES: [&str; 4] = ["pflicht", "optional", "karten", "client"];

/// Default radio nets as `(netz, primaer, ausweich, teilnehmer)`.
const RADIO_NETS: [(&str, &str, &str, &str); 5] = [
    ("Führung", "52.0", "38.0", "PL, alle Squad Leads"),
    ("Alpha", "60.0", "61.0", "Squad Alpha"),
    ("Bravo", "70.0", "71.0", "Squad Bravo"),
    ("Charlie", "80.0", "81.0", "Squad Charlie"),
    ("Delta", "90.0", "91.0", "Squad Delta"),
];

/// Default mod list as `(name, kategorie)`.
const MODS: [(&str, &str); 8] = [
    ("CBA_A3", "pflicht"),
    ("ACE", "pflicht"),
    ("Task Force Radio", "pflicht"),
    ("RHS USAF", "pflicht"),
    ("RHS AFRF", "pflicht"),
    ("CUP Terrains Core", "karten"),
    ("Blastcore Edited", "optional"),
    ("ShackTac User Interface", "client"),
];

/// Default brevity codes as `(code, bedeutung)`.
const BREVITY_CODES: [(&str, &str); 8] = [
    ("COPY", "Verstanden"),
    ("WILCO", "Verstanden, wird ausgeführt"),
    ("OSCAR MIKE", "Einheit ist in Bewegung"),
    ("CONTACT", "Feindkontakt"),
    ("WEAPONS FREE", "Feuer frei"),
    ("WEAPONS HOLD", "Feuer einstellen"),
    ("MEDIC", "Sanitäter wird benötigt"),
    ("RTB", "Rückkehr zur Basis"),
];

/// Built-in checklist item ids, always present in a fresh document.
const CHECKLIST_IDS: [&str; 6] = [
    "server_aufgesetzt",
    "mods_geladen",
    "slotliste_geprueft",
    "briefing_erstellt",
    "funkplan_verteilt",
    "mission_getestet",
];

/// Immutable default tables injected into codec and repository.
#[derive(Debug, Clone, Copy)]
pub struct DefaultTables {
    /// Role per slot, index 0 holding slot `SLOT_MIN`.
    pub slot_roles: &'static [&'static str; 33],
    /// `(netz, primaer, ausweich, teilnehmer)` rows.
    pub radio_nets: &'static [(&'static str, &'static str, &'static str, &'static str)],
    /// `(name, kategorie)` rows.
    pub mods: &'static [(&'static str, &'static str)],
    /// `(code, bedeutung)` rows.
    pub brevity_codes: &'static [(&'static str, &'static str)],
    /// Built-in checklist item ids.
    pub checklist_ids: &'static [&'static str],
    /// Closed set of accepted mod category ids.
    pub mod_categories: &'static [&'static str],
}

impl DefaultTables {
    /// Returns the compiled-in production tables.
    pub fn builtin() -> Self {
        Self {
            slot_roles: &SLOT_ROLES,
            radio_nets: &RADIO_NETS,
            mods: &MODS,
            brevity_codes: &BREVITY_CODES,
            checklist_ids: &CHECKLIST_IDS,
            mod_categories: &MOD_CATEGORIES,
        }
    }

    /// Returns the default role for one slot number, empty when out of range.
    pub fn slot_role(&self, slot: u8) -> &'static str {
        if !(SLOT_MIN..=SLOT_MAX).contains(&slot) {
            return "";
        }
        self.slot_roles[usize::from(slot - SLOT_MIN)]
    }

    /// Returns whether `kategorie` is one of the accepted category ids.
    pub fn is_known_category(&self, kategorie: &str) -> bool {
        self.mod_categories.contains(&kategorie)
    }
}

impl Default for DefaultTables {
    fn default() -> Self {
        Self::builtin()
    }
}
