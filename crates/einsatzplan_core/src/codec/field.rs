//! Scalar cell escaping for semicolon-delimited rows.
//!
//! # Responsibility
//! - Encode one value so it survives inside a `;`-delimited row.
//! - Decode one cell back to its value.
//!
//! # Invariants
//! - Line breaks are collapsed to a single space; multi-line cells are not
//!   supported and the collapse is lossy.
//! - For newline-free values, `decode_field(encode_field(v)) == v`.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));

/// Encodes one scalar value as a row cell.
///
/// Internal double quotes are doubled, every line break collapses to one
/// space, and the cell is wrapped in double quotes when it contains the
/// delimiter or a quote.
pub fn encode_field(value: &str) -> String {
    let doubled = value.replace('"', "\"\"");
    let flat = LINE_BREAK_RE.replace_all(&doubled, " ");
    if flat.contains(';') || flat.contains('"') {
        format!("\"{flat}\"")
    } else {
        flat.into_owned()
    }
}

/// Decodes one row cell back to its value.
///
/// Strips one leading and one trailing quote independently, then un-doubles
/// internal quotes. Total over all inputs.
pub fn decode_field(cell: &str) -> String {
    let stripped = cell.strip_prefix('"').unwrap_or(cell);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    stripped.replace("\"\"", "\"")
}
