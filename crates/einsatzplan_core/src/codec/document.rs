//! Document assembler and splitter.
//!
//! # Responsibility
//! - Join all section blocks into one CRLF text document with a leading
//!   byte-order mark.
//! - Split incoming text back into a document, dispatching per section and
//!   tolerating anything malformed.
//!
//! # Invariants
//! - Sections are emitted in one fixed canonical order.
//! - Splitting never fails; input without any known section yields the
//!   all-defaults document ("no data yet").

use crate::codec::section::{
    brevity_block, checkliste_block, checkliste_custom_block, event_block, funk_block,
    ladef_block, mods_block, parse_brevity, parse_checkliste, parse_checkliste_custom,
    parse_event, parse_funk, parse_ladef, parse_mods, parse_respawn, parse_slotliste,
    respawn_block, slotliste_block, HEADER_BREVITY, HEADER_CHECKLISTE,
    HEADER_CHECKLISTE_CUSTOM, HEADER_EVENT, HEADER_FUNK, HEADER_LADEF, HEADER_MODS,
    HEADER_RESPAWN, HEADER_SLOTLISTE,
};
use crate::codec::{ParseOutcome, ParseWarning};
use crate::defaults::DefaultTables;
use crate::model::document::EventDocument;

const BOM: char = '\u{feff}';
const LINE_ENDING: &str = "\r\n";

/// Bidirectional codec between `EventDocument` and the section-delimited
/// text format, parameterized by the injected default tables.
#[derive(Debug, Clone, Copy)]
pub struct DocumentCodec {
    tables: DefaultTables,
}

impl DocumentCodec {
    pub fn new(tables: DefaultTables) -> Self {
        Self { tables }
    }

    /// Codec over the compiled-in production tables.
    pub fn with_builtin_tables() -> Self {
        Self::new(DefaultTables::builtin())
    }

    pub fn tables(&self) -> &DefaultTables {
        &self.tables
    }

    /// Serializes the document: sections in canonical order, separated by
    /// one blank line, CRLF endings, leading byte-order mark.
    pub fn assemble(&self, document: &EventDocument) -> String {
        let blocks = [
            event_block(&document.event),
            slotliste_block(&document.slots, &self.tables),
            ladef_block(&document.ladef),
            checkliste_block(document),
            checkliste_custom_block(document),
            funk_block(&document.funk),
            mods_block(&document.mods),
            brevity_block(&document.brevity),
            respawn_block(&document.respawn),
        ];
        let body = blocks
            .iter()
            .filter(|block| !block.is_empty())
            .map(|block| block.join(LINE_ENDING))
            .collect::<Vec<_>>()
            .join(&format!("{LINE_ENDING}{LINE_ENDING}"));
        format!("{BOM}{body}")
    }

    /// Parses text back into a document.
    ///
    /// Total over all inputs: unknown headers and malformed rows degrade to
    /// warnings; text without a single known section yields the
    /// all-defaults document.
    pub fn split(&self, text: &str) -> ParseOutcome {
        let stripped = text.strip_prefix(BOM).unwrap_or(text);
        let lines: Vec<&str> = stripped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut document = EventDocument::empty();
        let mut warnings = Vec::new();
        let mut recognized = false;

        let mut index = 0;
        while index < lines.len() {
            let line = lines[index];
            if !line.starts_with('[') {
                index += 1;
                continue;
            }
            let end = section_end(&lines, index + 1);
            let body = &lines[index + 1..end];
            match line {
                HEADER_EVENT => parse_event(body, &mut document.event, &mut warnings),
                HEADER_SLOTLISTE => parse_slotliste(body, &mut document.slots, &mut warnings),
                HEADER_LADEF => parse_ladef(body, &mut document.ladef, &mut warnings),
                HEADER_CHECKLISTE => {
                    parse_checkliste(body, &mut document.checklist, &mut warnings)
                }
                HEADER_CHECKLISTE_CUSTOM => {
                    parse_checkliste_custom(body, &mut document, &mut warnings)
                }
                HEADER_FUNK => parse_funk(body, &mut document.funk, &mut warnings),
                HEADER_MODS => parse_mods(body, &mut document.mods, &mut warnings),
                HEADER_BREVITY => parse_brevity(body, &mut document.brevity, &mut warnings),
                HEADER_RESPAWN => parse_respawn(body, &mut document.respawn, &mut warnings),
                unknown => {
                    warnings.push(ParseWarning::UnknownSection(unknown.to_string()));
                    index = end;
                    continue;
                }
            }
            recognized = true;
            index = end;
        }

        if !recognized {
            return ParseOutcome {
                document: EventDocument::with_defaults(&self.tables),
                warnings,
            };
        }
        ParseOutcome { document, warnings }
    }
}

impl Default for DocumentCodec {
    fn default() -> Self {
        Self::with_builtin_tables()
    }
}

fn section_end(lines: &[&str], start: usize) -> usize {
    lines[start..]
        .iter()
        .position(|line| line.starts_with('['))
        .map_or(lines.len(), |offset| start + offset)
}

#[cfg(test)]
mod tests {
    use super::DocumentCodec;
    use crate::codec::ParseWarning;
    use crate::model::document::EventDocument;

    #[test]
    fn assemble_starts_with_bom_and_uses_crlf() {
        let codec = DocumentCodec::with_builtin_tables();
        let text = codec.assemble(&EventDocument::empty());
        assert!(text.starts_with('\u{feff}'));
        assert!(text.contains("\r\n"));
        assert!(!text.contains("\n\n"), "blank lines must be CRLF-separated");
    }

    #[test]
    fn empty_input_yields_all_defaults_document() {
        let codec = DocumentCodec::with_builtin_tables();
        let outcome = codec.split("");
        assert_eq!(
            outcome.document,
            EventDocument::with_defaults(codec.tables())
        );
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn garbage_input_yields_all_defaults_document() {
        let codec = DocumentCodec::with_builtin_tables();
        let outcome = codec.split("kein dokument\nnur;zeilen\r\n42");
        assert_eq!(
            outcome.document,
            EventDocument::with_defaults(codec.tables())
        );
    }

    #[test]
    fn unknown_sections_are_skipped_with_warning() {
        let codec = DocumentCodec::with_builtin_tables();
        let text = "[EVENT]\r\nFeld;Wert\r\nServer;Altis Life\r\n\r\n[ZUKUNFT]\r\nirgendwas;1";
        let outcome = codec.split(text);
        assert_eq!(outcome.document.event.server, "Altis Life");
        assert_eq!(
            outcome.warnings,
            vec![ParseWarning::UnknownSection("[ZUKUNFT]".to_string())]
        );
    }

    #[test]
    fn sections_parse_in_any_order() {
        let codec = DocumentCodec::with_builtin_tables();
        let text = "[RESPAWN]\r\nFeld;Wert\r\nRegeln;Einmal pro Welle\r\n\r\n[EVENT]\r\nFeld;Wert\r\nDatum;2024-06-01";
        let outcome = codec.split(text);
        assert_eq!(outcome.document.respawn, "Einmal pro Welle");
        assert_eq!(outcome.document.event.datum, "2024-06-01");
    }

    #[test]
    fn preamble_lines_before_first_header_are_ignored() {
        let codec = DocumentCodec::with_builtin_tables();
        let text = "export vom 2024-06-01\r\n[EVENT]\r\nFeld;Wert\r\nDatum;2024-06-01";
        let outcome = codec.split(text);
        assert_eq!(outcome.document.event.datum, "2024-06-01");
        assert!(outcome.warnings.is_empty());
    }
}
