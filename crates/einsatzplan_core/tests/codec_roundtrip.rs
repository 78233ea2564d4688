use std::collections::BTreeMap;

use einsatzplan_core::{
    BrevityCode, CustomChecklistItem, DocumentCodec, EventDocument, ModEntry, RadioNet,
    SlotAssignment, SLOT_MAX, SLOT_MIN,
};

/// Builds a document with every field explicitly populated, so parsing the
/// serialized text reproduces it field for field.
fn fully_populated_document() -> EventDocument {
    let mut document = EventDocument::empty();
    document.event.datum = "2024-06-01".to_string();
    document.event.uhrzeit = "19:30".to_string();
    document.event.zeitzone = "MESZ".to_string();
    document.event.server = "Hauptserver; Slot 2".to_string();
    document.event.passwort = "geheim".to_string();
    document.event.beschreibung = "Angriff bei Nacht \"Phase Blau\"".to_string();
    document.event.kontakt = "orga@example.org".to_string();

    for slot in SLOT_MIN..=SLOT_MAX {
        document.slots.insert(
            slot,
            SlotAssignment {
                role: format!("Rolle {slot}"),
                name: format!("Spieler {slot}"),
                notes: if slot % 2 == 0 {
                    "TS; Kanal 3".to_string()
                } else {
                    String::new()
                },
            },
        );
    }

    document.ladef.lage = "Feind hält den Norden; zivile Lage unklar".to_string();
    document.ladef.auftrag = "Brücke sichern".to_string();
    document.ladef.durchfuehrung = "Phase 1; Phase 2; Phase 3".to_string();
    document.ladef.einsatz = "Versorgung über LZ \"Adler\"".to_string();
    document.ladef.fuehrung = "PL führt; SL vertreten".to_string();

    document.checklist.insert("server_aufgesetzt".to_string(), true);
    document.checklist.insert("mods_geladen".to_string(), false);
    document.checklist.insert("eigene_1".to_string(), true);
    document.custom_items.push(CustomChecklistItem {
        id: "eigene_1".to_string(),
        text: "Karte; hochladen".to_string(),
        checked: true,
    });

    document.funk.push(RadioNet {
        netz: "Führung".to_string(),
        primaer: "52.0".to_string(),
        ausweich: "38.0".to_string(),
        teilnehmer: "PL; SL Alpha; SL Bravo".to_string(),
    });
    document.mods.push(ModEntry {
        name: "ACE".to_string(),
        kategorie: "pflicht".to_string(),
    });
    document.brevity.push(BrevityCode {
        code: "OSCAR MIKE".to_string(),
        bedeutung: "Einheit ist in Bewegung".to_string(),
    });
    document.respawn = "Welle alle 20 Minuten; danach Basis".to_string();
    document
}

#[test]
fn roundtrip_reproduces_every_field() {
    let codec = DocumentCodec::with_builtin_tables();
    let document = fully_populated_document();

    let outcome = codec.split(&codec.assemble(&document));

    assert!(outcome.warnings.is_empty(), "warnings: {:?}", outcome.warnings);
    assert_eq!(outcome.document, document);
}

#[test]
fn serialize_parse_serialize_is_idempotent() {
    let codec = DocumentCodec::with_builtin_tables();
    let document = fully_populated_document();

    let first = codec.assemble(&codec.split(&codec.assemble(&document)).document);
    let second = codec.assemble(&codec.split(&first).document);

    assert_eq!(first, second);
}

#[test]
fn every_slot_is_emitted_with_default_role_fallback() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.slots.insert(
        4,
        SlotAssignment {
            role: "JTAC".to_string(),
            name: "Janek".to_string(),
            notes: String::new(),
        },
    );

    let text = codec.assemble(&document);
    let outcome = codec.split(&text);

    assert_eq!(outcome.document.slots.len(), 33);
    for slot in SLOT_MIN..=SLOT_MAX {
        let parsed = outcome.document.slots.get(&slot).expect("slot row present");
        if slot == 4 {
            assert_eq!(parsed.role, "JTAC");
            assert_eq!(parsed.name, "Janek");
        } else {
            assert_eq!(parsed.role, codec.tables().slot_role(slot));
            assert!(parsed.name.is_empty());
        }
    }
}

#[test]
fn stored_roles_are_not_replaced_by_defaults() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.slots.insert(
        1,
        SlotAssignment {
            role: "Eigener Name".to_string(),
            name: String::new(),
            notes: String::new(),
        },
    );

    let outcome = codec.split(&codec.assemble(&document));
    assert_eq!(
        outcome.document.slots.get(&1).map(|s| s.role.as_str()),
        Some("Eigener Name")
    );
}

#[test]
fn empty_list_sections_are_omitted_and_import_as_empty() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.event.datum = "2024-06-01".to_string();
    document.checklist.insert("mods_geladen".to_string(), false);

    let text = codec.assemble(&document);
    assert!(!text.contains("[FUNK]"));
    assert!(!text.contains("[MODS]"));
    assert!(!text.contains("[BREVITY]"));
    assert!(!text.contains("[CHECKLISTE_CUSTOM]"));
    assert!(!text.contains("[RESPAWN]"));

    let outcome = codec.split(&text);
    assert!(outcome.document.funk.is_empty());
    assert!(outcome.document.mods.is_empty());
    assert!(outcome.document.brevity.is_empty());
    assert!(outcome.document.custom_items.is_empty());
    assert!(outcome.document.respawn.is_empty());
}

#[test]
fn checkliste_rows_are_sorted_by_id() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.checklist.insert("zulu".to_string(), true);
    document.checklist.insert("alpha".to_string(), false);
    document.checklist.insert("mike".to_string(), true);

    let text = codec.assemble(&document);
    let alpha = text.find("alpha;0").expect("alpha row present");
    let mike = text.find("mike;1").expect("mike row present");
    let zulu = text.find("zulu;1").expect("zulu row present");
    assert!(alpha < mike && mike < zulu);
}

#[test]
fn custom_checked_state_reaches_unified_checklist_on_parse() {
    let codec = DocumentCodec::with_builtin_tables();
    let text = "[CHECKLISTE_CUSTOM]\r\nId;Text;Erledigt\r\neigene_9;Nachbesprechung planen;1";

    let outcome = codec.split(text);

    assert_eq!(outcome.document.checklist.get("eigene_9"), Some(&true));
    assert_eq!(outcome.document.custom_items.len(), 1);
    assert!(outcome.document.custom_items[0].checked);
}

#[test]
fn custom_rows_write_checked_state_from_unified_map() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.custom_items.push(CustomChecklistItem {
        id: "eigene_1".to_string(),
        text: "Template testen".to_string(),
        checked: false,
    });
    // The unified map was toggled after the item was created.
    document.checklist.insert("eigene_1".to_string(), true);

    let text = codec.assemble(&document);
    assert!(text.contains("eigene_1;Template testen;1"));
}

#[test]
fn quoted_fields_survive_the_document_roundtrip() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.ladef.lage = "\"a;b\"".to_string();
    document.event.server = "halb \" zitiert".to_string();

    let outcome = codec.split(&codec.assemble(&document));
    assert_eq!(outcome.document.ladef.lage, "\"a;b\"");
    assert_eq!(outcome.document.event.server, "halb \" zitiert");
}

#[test]
fn embedded_newlines_collapse_to_spaces() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.ladef.auftrag = "Zeile eins\nZeile zwei\r\nZeile drei".to_string();

    let outcome = codec.split(&codec.assemble(&document));
    assert_eq!(
        outcome.document.ladef.auftrag,
        "Zeile eins Zeile zwei Zeile drei"
    );
}

#[test]
fn umlaut_folded_ladef_labels_import_into_the_same_fields() {
    let codec = DocumentCodec::with_builtin_tables();
    let text = "[LADEF]\r\nAbschnitt;Inhalt\r\nLage;ruhig\r\nDurchfuehrung;Phase 1\r\nFuehrung;PL";

    let outcome = codec.split(text);
    assert_eq!(outcome.document.ladef.durchfuehrung, "Phase 1");
    assert_eq!(outcome.document.ladef.fuehrung, "PL");
}

#[test]
fn alternate_default_tables_drive_slot_roles() {
    static ROLES: [&str; 33] = ["Testrolle"; 33];
    let mut tables = einsatzplan_core::DefaultTables::builtin();
    tables.slot_roles = &ROLES;
    let codec = DocumentCodec::new(tables);

    let text = codec.assemble(&EventDocument::empty());
    let outcome = codec.split(&text);
    assert!(outcome
        .document
        .slots
        .values()
        .all(|slot| slot.role == "Testrolle"));
}

#[test]
fn unified_map_wins_over_custom_flag_in_checkliste_rows() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut document = EventDocument::empty();
    document.checklist.insert("eigene_1".to_string(), false);
    document.custom_items.push(CustomChecklistItem {
        id: "eigene_1".to_string(),
        text: "Punkt".to_string(),
        checked: true,
    });

    let text = codec.assemble(&document);
    // Exactly one CHECKLISTE row for the id, carrying the map's state.
    let rows: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("eigene_1;"))
        .collect();
    assert_eq!(rows, vec!["eigene_1;0", "eigene_1;Punkt;0"]);
}

#[test]
fn checklist_map_state_is_reconstructed_for_mixed_documents() {
    let codec = DocumentCodec::with_builtin_tables();
    let mut checklist = BTreeMap::new();
    checklist.insert("mods_geladen".to_string(), true);
    let mut document = EventDocument::empty();
    document.checklist = checklist;

    let outcome = codec.split(&codec.assemble(&document));
    assert_eq!(outcome.document.checklist.get("mods_geladen"), Some(&true));
}
