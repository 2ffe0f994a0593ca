//! Error types for INI parsing.
//!
//! Parsing is fail-fast: the parser stops at the first structural error and
//! returns a single [`ParseError`]. Sections and properties committed from
//! well-formed text *before* the error are kept, so an `Err` result means
//! "partially applied", not "document unchanged".
//!
//! Serialization and the typed accessors never fail; [`ParseError`] is the
//! crate's whole error taxonomy.
//!
//! ## Examples
//!
//! ```rust
//! use initext::{from_str, ParseError};
//!
//! // A key/value line before any section header is rejected.
//! let result = from_str("host = example.com\n");
//! assert_eq!(result.unwrap_err(), ParseError::SectionMissing);
//! ```

use thiserror::Error;

/// All structural errors the parser can report.
///
/// The variants are mutually exclusive; parsing stops at the first one
/// encountered. Each variant maps to exactly one malformed construct:
///
/// | Variant              | Input it rejects                              |
/// |----------------------|-----------------------------------------------|
/// | `SectionMissing`     | `k = v` before any `[section]` header         |
/// | `SectionClose`       | `[name` not closed before end of line/input   |
/// | `SectionEmpty`       | `[]` (empty name after escape decoding)       |
/// | `AssignmentSymbol`   | a key with no `=` before end of line/input    |
/// | `KeyEmpty`           | `= v` (empty key after escape decoding)       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A key/value line appeared before any section was opened.
    #[error("option line appears before any section header")]
    SectionMissing,

    /// A `[` was not closed with `]` before the end of the line or input.
    #[error("section header is not closed with `]` before end of line")]
    SectionClose,

    /// A section name decoded to the empty string (`[]`).
    #[error("section name is empty")]
    SectionEmpty,

    /// A key line reached the end of the line or input without an `=`.
    #[error("option line has no `=` before end of line")]
    AssignmentSymbol,

    /// A key decoded to the empty string (`= value`).
    #[error("option key is empty")]
    KeyEmpty,
}

pub type Result<T> = std::result::Result<T, ParseError>;
