//! # initext
//!
//! A comment-preserving INI document parser and serializer.
//!
//! `initext` parses INI-style configuration text into an in-memory
//! [`Document`] of sections and key/value properties — *including* the
//! comments attached to them — lets you query and mutate it through typed
//! accessors, and serializes it back to canonical text. It is meant to be
//! embedded by host programs: there is no file I/O, no CLI handling, and no
//! logging in this crate.
//!
//! ## The format
//!
//! ```ini
//! ; database settings
//! [db]              ; opened lazily
//! host = localhost
//! port = 5432
//!
//! ; feature toggles
//! [flags]
//! verbose = on
//! ```
//!
//! - Sections are unique by name and keep insertion order; re-opening
//!   `[name]` merges into the existing section.
//! - Comment lines (`;` or `#`) and blank lines immediately before a section
//!   or property attach to it as its *block comment*; trailing text on the
//!   entity's own line attaches as its *inline comment*.
//! - Line endings may be LF, CR, or CRLF, freely mixed; output always uses
//!   `\n`.
//! - TAB/CR/LF inside names and values are escaped as `\t`/`\r`/`\n`;
//!   leading/trailing spaces and tabs around names and values are trimmed.
//!
//! Not supported: nested sections, multi-line values, file includes, and
//! environment-variable interpolation. Output is canonical rather than
//! byte-preserving — spacing around `=`, the comment marker character, and
//! the line-ending style are normalized on write.
//!
//! ## Quick start
//!
//! ```rust
//! use initext::Document;
//!
//! let text = "\
//! ; connection settings
//! [server]
//! host = example.com ; public name
//! port = 8080
//! ";
//!
//! let mut doc: Document = text.parse().unwrap();
//!
//! // Typed reads never fail; they fall back to the supplied default.
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.get("port").unwrap().get_i32(80), 8080);
//! assert_eq!(server.get("host").unwrap().comment(), " public name");
//!
//! // Mutate through lookup-or-create handles and write back out.
//! doc.section("server").property("port").set_i32(9090);
//! doc.section("limits").property("retries").set_i32(3);
//! assert!(doc.to_string().contains("port = 9090\n"));
//! assert!(doc.to_string().ends_with("[limits]\nretries = 3\n"));
//! ```
//!
//! ## Partial application on error
//!
//! Parsing is fail-fast but does not roll back: everything committed before
//! the first error stays in the document. Use [`Document::parse`] when you
//! need that contract; [`from_str`] discards the partial document.
//!
//! ```rust
//! use initext::{Document, ParseError};
//!
//! let mut doc = Document::new();
//! let result = doc.parse("[ok]\nk = v\n[broken\n");
//! assert_eq!(result, Err(ParseError::SectionClose));
//! assert!(doc.has_section("ok"));
//! ```
//!
//! ## Round-trip guarantee
//!
//! For any document `D`, parsing `to_string(&D)` into an empty document
//! yields a document structurally equal to `D` — same sections, properties,
//! names, values, and comments, in the same order. The serialized *text*
//! need not equal the hand-written text `D` came from.

pub mod document;
pub mod error;
pub mod escape;

mod de;
mod ser;

pub use document::{Document, Property, Section};
pub use error::{ParseError, Result};

/// Parses INI text into a fresh [`Document`].
///
/// Convenience wrapper over [`Document::parse`]; on error the partially
/// built document is discarded.
///
/// # Examples
///
/// ```rust
/// let doc = initext::from_str("[a]\nk = v\n").unwrap();
/// assert_eq!(doc.get("a").unwrap().get("k").unwrap().value(), "v");
/// ```
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered in the input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str) -> Result<Document> {
    let mut document = Document::new();
    document.parse(text)?;
    Ok(document)
}

/// Serializes a [`Document`] to canonical INI text.
///
/// Equivalent to the document's `Display` implementation.
///
/// # Examples
///
/// ```rust
/// use initext::Document;
///
/// let mut doc = Document::new();
/// doc.section("a").property("k").set_string("v");
/// assert_eq!(initext::to_string(&doc), "[a]\nk = v\n");
/// ```
#[must_use]
pub fn to_string(document: &Document) -> String {
    document.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialize_round_trip() {
        let text = "; head\n[a] ; side\nk = v ; note\n\nk2 = v2\n";
        let doc = from_str(text).unwrap();
        let rendered = to_string(&doc);
        let reparsed = from_str(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn from_str_rejects_malformed_input() {
        assert_eq!(from_str("k = v\n"), Err(ParseError::SectionMissing));
    }

    #[test]
    fn display_matches_to_string() {
        let doc = from_str("[a]\nk = v\n").unwrap();
        assert_eq!(format!("{doc}"), to_string(&doc));
    }
}
