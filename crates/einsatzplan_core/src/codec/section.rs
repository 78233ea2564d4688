//! Section grammar: header tokens, wire labels and one serializer/parser
//! pair per section.
//!
//! # Responsibility
//! - Emit each section's lines in its fixed shape.
//! - Parse one section body tolerantly: bad rows are skipped with a
//!   warning, unknown labels are ignored with a warning.
//!
//! # Invariants
//! - SLOTLISTE always emits slots 1..=33 in order.
//! - FUNK/MODS/BREVITY/CHECKLISTE_CUSTOM/RESPAWN are omitted when empty.
//! - The trailing column of a tabular row may contain the delimiter; its
//!   split parts are re-concatenated on parse.

use std::collections::BTreeMap;

use crate::codec::field::{decode_field, encode_field};
use crate::codec::ParseWarning;
use crate::defaults::DefaultTables;
use crate::model::document::{
    BrevityCode, CustomChecklistItem, EventDocument, EventInfo, Ladef, ModEntry, RadioNet,
    SlotAssignment, DEFAULT_TIMEZONE, SLOT_MAX, SLOT_MIN,
};

pub const HEADER_EVENT: &str = "[EVENT]";
pub const HEADER_SLOTLISTE: &str = "[SLOTLISTE]";
pub const HEADER_LADEF: &str = "[LADEF]";
pub const HEADER_CHECKLISTE: &str = "[CHECKLISTE]";
pub const HEADER_CHECKLISTE_CUSTOM: &str = "[CHECKLISTE_CUSTOM]";
pub const HEADER_FUNK: &str = "[FUNK]";
pub const HEADER_MODS: &str = "[MODS]";
pub const HEADER_BREVITY: &str = "[BREVITY]";
pub const HEADER_RESPAWN: &str = "[RESPAWN]";

const SECTION_EVENT: &str = "EVENT";
const SECTION_SLOTLISTE: &str = "SLOTLISTE";
const SECTION_LADEF: &str = "LADEF";
const SECTION_CHECKLISTE: &str = "CHECKLISTE";
const SECTION_CHECKLISTE_CUSTOM: &str = "CHECKLISTE_CUSTOM";
const SECTION_FUNK: &str = "FUNK";
const SECTION_MODS: &str = "MODS";
const SECTION_BREVITY: &str = "BREVITY";
const SECTION_RESPAWN: &str = "RESPAWN";

const COLUMNS_KEY_VALUE: &str = "Feld;Wert";
const COLUMNS_SLOTLISTE: &str = "Slot;Rolle;Name;Bemerkung";
const COLUMNS_LADEF: &str = "Abschnitt;Inhalt";
const COLUMNS_CHECKLISTE: &str = "Id;Erledigt";
const COLUMNS_CHECKLISTE_CUSTOM: &str = "Id;Text;Erledigt";
const COLUMNS_FUNK: &str = "Netz;Primär;Ausweich;Teilnehmer";
const COLUMNS_MODS: &str = "Mod;Kategorie";
const COLUMNS_BREVITY: &str = "Code;Bedeutung";

// ---------------------------------------------------------------------------
// Serializers. Each returns the section's lines; an empty vec means the
// section is omitted from the document.
// ---------------------------------------------------------------------------

pub(crate) fn event_block(event: &EventInfo) -> Vec<String> {
    vec![
        HEADER_EVENT.to_string(),
        COLUMNS_KEY_VALUE.to_string(),
        format!("Datum;{}", encode_field(&event.datum)),
        format!("Uhrzeit;{}", encode_field(&event.uhrzeit)),
        format!("Zeitzone;{}", encode_field(&event.zeitzone)),
        format!("Server;{}", encode_field(&event.server)),
        format!("Passwort;{}", encode_field(&event.passwort)),
        format!("Beschreibung;{}", encode_field(&event.beschreibung)),
        format!("Kontakt;{}", encode_field(&event.kontakt)),
    ]
}

pub(crate) fn slotliste_block(
    slots: &BTreeMap<u8, SlotAssignment>,
    tables: &DefaultTables,
) -> Vec<String> {
    let mut lines = vec![HEADER_SLOTLISTE.to_string(), COLUMNS_SLOTLISTE.to_string()];
    for slot in SLOT_MIN..=SLOT_MAX {
        let assignment = slots.get(&slot);
        let stored_role = assignment.map_or("", |a| a.role.as_str());
        let role = if stored_role.is_empty() {
            tables.slot_role(slot)
        } else {
            stored_role
        };
        let name = assignment.map_or("", |a| a.name.as_str());
        let notes = assignment.map_or("", |a| a.notes.as_str());
        lines.push(format!(
            "{slot};{};{};{}",
            encode_field(role),
            encode_field(name),
            encode_field(notes)
        ));
    }
    lines
}

pub(crate) fn ladef_block(ladef: &Ladef) -> Vec<String> {
    vec![
        HEADER_LADEF.to_string(),
        COLUMNS_LADEF.to_string(),
        format!("Lage;{}", encode_field(&ladef.lage)),
        format!("Auftrag;{}", encode_field(&ladef.auftrag)),
        format!("Durchführung;{}", encode_field(&ladef.durchfuehrung)),
        format!("Einsatz;{}", encode_field(&ladef.einsatz)),
        format!("Führung;{}", encode_field(&ladef.fuehrung)),
    ]
}

pub(crate) fn checkliste_block(document: &EventDocument) -> Vec<String> {
    let mut lines = vec![HEADER_CHECKLISTE.to_string(), COLUMNS_CHECKLISTE.to_string()];
    for (id, checked) in document.unified_checklist() {
        lines.push(format!(
            "{};{}",
            encode_field(&id),
            if checked { "1" } else { "0" }
        ));
    }
    lines
}

pub(crate) fn checkliste_custom_block(document: &EventDocument) -> Vec<String> {
    if document.custom_items.is_empty() {
        return Vec::new();
    }
    let unified = document.unified_checklist();
    let mut lines = vec![
        HEADER_CHECKLISTE_CUSTOM.to_string(),
        COLUMNS_CHECKLISTE_CUSTOM.to_string(),
    ];
    for item in &document.custom_items {
        let checked = unified.get(&item.id).copied().unwrap_or(item.checked);
        lines.push(format!(
            "{};{};{}",
            encode_field(&item.id),
            encode_field(&item.text),
            if checked { "1" } else { "0" }
        ));
    }
    lines
}

pub(crate) fn funk_block(nets: &[RadioNet]) -> Vec<String> {
    if nets.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![HEADER_FUNK.to_string(), COLUMNS_FUNK.to_string()];
    for net in nets {
        lines.push(format!(
            "{};{};{};{}",
            encode_field(&net.netz),
            encode_field(&net.primaer),
            encode_field(&net.ausweich),
            encode_field(&net.teilnehmer)
        ));
    }
    lines
}

pub(crate) fn mods_block(mods: &[ModEntry]) -> Vec<String> {
    if mods.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![HEADER_MODS.to_string(), COLUMNS_MODS.to_string()];
    for entry in mods {
        lines.push(format!(
            "{};{}",
            encode_field(&entry.name),
            encode_field(&entry.kategorie)
        ));
    }
    lines
}

pub(crate) fn brevity_block(codes: &[BrevityCode]) -> Vec<String> {
    if codes.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![HEADER_BREVITY.to_string(), COLUMNS_BREVITY.to_string()];
    for code in codes {
        lines.push(format!(
            "{};{}",
            encode_field(&code.code),
            encode_field(&code.bedeutung)
        ));
    }
    lines
}

pub(crate) fn respawn_block(respawn: &str) -> Vec<String> {
    if respawn.is_empty() {
        return Vec::new();
    }
    vec![
        HEADER_RESPAWN.to_string(),
        COLUMNS_KEY_VALUE.to_string(),
        format!("Regeln;{}", encode_field(respawn)),
    ]
}

// ---------------------------------------------------------------------------
// Parsers. Each consumes one section body (lines between its header and the
// next header) and mutates the document in place.
// ---------------------------------------------------------------------------

fn is_column_row(line: &str, first_label: &str) -> bool {
    line.split(';').next().map(str::trim) == Some(first_label)
}

/// Re-concatenates the trailing split parts of a tabular row so a free-text
/// last column may contain the delimiter.
fn join_tail(parts: &[&str]) -> String {
    decode_field(&parts.join(";"))
}

pub(crate) fn parse_event(body: &[&str], event: &mut EventInfo, warnings: &mut Vec<ParseWarning>) {
    for line in body {
        let Some((raw_key, raw_value)) = line.split_once(';') else {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_EVENT,
                row: (*line).to_string(),
            });
            continue;
        };
        let value = decode_field(raw_value);
        match raw_key.trim() {
            "Feld" => {}
            "Datum" => event.datum = value,
            "Uhrzeit" => event.uhrzeit = value,
            "Zeitzone" => {
                event.zeitzone = if value.is_empty() {
                    DEFAULT_TIMEZONE.to_string()
                } else {
                    value
                }
            }
            "Server" => event.server = value,
            "Passwort" => event.passwort = value,
            "Beschreibung" => event.beschreibung = value,
            "Kontakt" => event.kontakt = value,
            other => warnings.push(ParseWarning::UnknownKey {
                section: SECTION_EVENT,
                key: other.to_string(),
            }),
        }
    }
}

pub(crate) fn parse_slotliste(
    body: &[&str],
    slots: &mut BTreeMap<u8, SlotAssignment>,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Slot") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 4 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_SLOTLISTE,
                row: (*line).to_string(),
            });
            continue;
        }
        let slot = match parts[0].trim().parse::<u8>() {
            Ok(slot) if (SLOT_MIN..=SLOT_MAX).contains(&slot) => slot,
            _ => {
                warnings.push(ParseWarning::SkippedRow {
                    section: SECTION_SLOTLISTE,
                    row: (*line).to_string(),
                });
                continue;
            }
        };
        slots.insert(
            slot,
            SlotAssignment {
                role: decode_field(parts[1]),
                name: decode_field(parts[2]),
                notes: join_tail(&parts[3..]),
            },
        );
    }
}

fn ladef_field<'doc>(ladef: &'doc mut Ladef, label: &str) -> Option<&'doc mut String> {
    // Producing tools disagree on umlaut encoding; accept the ASCII-folded
    // label variants as the same field.
    match label {
        "Lage" => Some(&mut ladef.lage),
        "Auftrag" => Some(&mut ladef.auftrag),
        "Durchführung" | "Durchfuehrung" | "Durchfuhrung" => Some(&mut ladef.durchfuehrung),
        "Einsatz" => Some(&mut ladef.einsatz),
        "Führung" | "Fuehrung" | "Fuhrung" => Some(&mut ladef.fuehrung),
        _ => None,
    }
}

pub(crate) fn parse_ladef(body: &[&str], ladef: &mut Ladef, warnings: &mut Vec<ParseWarning>) {
    for line in body {
        let Some((raw_key, raw_value)) = line.split_once(';') else {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_LADEF,
                row: (*line).to_string(),
            });
            continue;
        };
        let key = raw_key.trim();
        if key == "Abschnitt" {
            continue;
        }
        match ladef_field(ladef, key) {
            Some(field) => *field = decode_field(raw_value),
            None => warnings.push(ParseWarning::UnknownKey {
                section: SECTION_LADEF,
                key: key.to_string(),
            }),
        }
    }
}

pub(crate) fn parse_checkliste(
    body: &[&str],
    checklist: &mut BTreeMap<String, bool>,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Id") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 2 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_CHECKLISTE,
                row: (*line).to_string(),
            });
            continue;
        }
        let flag = parts[parts.len() - 1].trim() == "1";
        let id = join_tail(&parts[..parts.len() - 1]);
        checklist.insert(id, flag);
    }
}

pub(crate) fn parse_checkliste_custom(
    body: &[&str],
    document: &mut EventDocument,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Id") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 3 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_CHECKLISTE_CUSTOM,
                row: (*line).to_string(),
            });
            continue;
        }
        let checked = parts[parts.len() - 1].trim() == "1";
        let id = decode_field(parts[0]);
        let text = join_tail(&parts[1..parts.len() - 1]);
        // The custom row is the wire truth for its own checked state; mirror
        // it into the unified map so both views agree after load.
        document.checklist.insert(id.clone(), checked);
        document
            .custom_items
            .push(CustomChecklistItem { id, text, checked });
    }
}

pub(crate) fn parse_funk(
    body: &[&str],
    nets: &mut Vec<RadioNet>,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Netz") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 4 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_FUNK,
                row: (*line).to_string(),
            });
            continue;
        }
        nets.push(RadioNet {
            netz: decode_field(parts[0]),
            primaer: decode_field(parts[1]),
            ausweich: decode_field(parts[2]),
            teilnehmer: join_tail(&parts[3..]),
        });
    }
}

pub(crate) fn parse_mods(
    body: &[&str],
    mods: &mut Vec<ModEntry>,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Mod") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 2 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_MODS,
                row: (*line).to_string(),
            });
            continue;
        }
        mods.push(ModEntry {
            name: decode_field(parts[0]),
            kategorie: join_tail(&parts[1..]),
        });
    }
}

pub(crate) fn parse_brevity(
    body: &[&str],
    codes: &mut Vec<BrevityCode>,
    warnings: &mut Vec<ParseWarning>,
) {
    for (index, line) in body.iter().enumerate() {
        if index == 0 && is_column_row(line, "Code") {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 2 {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_BREVITY,
                row: (*line).to_string(),
            });
            continue;
        }
        codes.push(BrevityCode {
            code: decode_field(parts[0]),
            bedeutung: join_tail(&parts[1..]),
        });
    }
}

pub(crate) fn parse_respawn(
    body: &[&str],
    respawn: &mut String,
    warnings: &mut Vec<ParseWarning>,
) {
    for line in body {
        let Some((raw_key, raw_value)) = line.split_once(';') else {
            warnings.push(ParseWarning::SkippedRow {
                section: SECTION_RESPAWN,
                row: (*line).to_string(),
            });
            continue;
        };
        match raw_key.trim() {
            "Feld" => {}
            "Regeln" => *respawn = decode_field(raw_value),
            other => warnings.push(ParseWarning::UnknownKey {
                section: SECTION_RESPAWN,
                key: other.to_string(),
            }),
        }
    }
}
