//! The in-memory document model.
//!
//! A [`Document`] owns an insertion-ordered set of [`Section`]s, unique by
//! name; each section owns an insertion-ordered set of [`Property`]s, unique
//! by name within the section. Order is semantically meaningful: it is the
//! order sections and properties serialize in.
//!
//! Both entity types carry the same comment attachments: a single *inline*
//! comment (trailing text on the entity's own line) and an ordered list of
//! *block* comment lines (the comment/blank lines immediately preceding the
//! entity in source text, where an empty string preserves a blank line).
//!
//! ## Ordered maps
//!
//! Sections and properties are stored in [`IndexMap`]s so that lookup is by
//! name while iteration follows insertion order deterministically. Removal
//! uses `shift_remove`, which keeps the remaining entries in order.
//!
//! ## Lookup-or-create
//!
//! [`Document::section`] and [`Section::property`] return the existing entry
//! or append a new one — the same call the parser uses, which is why
//! re-opening `[name]` in source text merges into the existing section
//! instead of duplicating it.
//!
//! ## Examples
//!
//! ```rust
//! use initext::Document;
//!
//! let mut doc = Document::new();
//! let server = doc.section("server");
//! server.property("host").set_string("example.com");
//! server.property("port").set_i32(8080);
//!
//! assert!(doc.has_section("server"));
//! let server = doc.get("server").unwrap();
//! assert_eq!(server.get("port").unwrap().get_i32(0), 8080);
//! ```

use indexmap::IndexMap;

/// A parsed or programmatically-built INI document.
///
/// Owns its sections exclusively; all access goes through borrows scoped to
/// the call. The `Display` implementation produces canonical INI text and the
/// `FromStr` implementation parses it.
///
/// # Examples
///
/// ```rust
/// use initext::Document;
///
/// let mut doc: Document = "[net]\ntimeout = 30\n".parse().unwrap();
/// doc.section("net").property("retries").set_i32(5);
/// assert_eq!(doc.to_string(), "[net]\ntimeout = 30\nretries = 5\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    /// Creates an empty document with no sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the section with the given name, appending a new empty one if
    /// absent (lookup-or-create).
    ///
    /// Calling this twice with the same name yields the same section:
    ///
    /// ```rust
    /// use initext::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.section("a").property("k").set_string("v");
    /// assert_eq!(doc.section("a").get("k").unwrap().value(), "v");
    /// assert_eq!(doc.len(), 1);
    /// ```
    pub fn section(&mut self, name: &str) -> &mut Section {
        debug_assert!(!name.is_empty(), "section names must be non-empty");
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name))
    }

    /// Returns the section with the given name without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns `true` if a section with the given name exists.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Removes the section with the given name, returning it if present.
    ///
    /// A no-op returning `None` if no such section exists. The remaining
    /// sections keep their relative order.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Drops all sections.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over the sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Parses `text`, building into (or extending) this document.
    ///
    /// Repeated `[name]` blocks merge into one section, and a pre-populated
    /// document is extended in place. On error, everything committed from
    /// well-formed text before the error is retained — an `Err` result means
    /// the document is *partially applied*, not unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`](crate::ParseError) encountered.
    pub fn parse(&mut self, text: &str) -> crate::Result<()> {
        crate::de::parse_into(self, text)
    }
}

// The round-trip law compares section order; IndexMap's own PartialEq is
// order-insensitive, so compare the ordered values directly.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sections.values().eq(other.sections.values())
    }
}

impl Eq for Document {}

impl std::str::FromStr for Document {
    type Err = crate::ParseError;

    /// Parses into a fresh document. Unlike [`Document::parse`], a partial
    /// document is not recoverable from an `Err` here.
    fn from_str(text: &str) -> crate::Result<Self> {
        let mut document = Document::new();
        document.parse(text)?;
        Ok(document)
    }
}

/// A named group of properties within a [`Document`].
///
/// Created by [`Document::section`] or by the parser on `[name]`.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    comment: String,
    comments: Vec<String>,
    properties: IndexMap<String, Property>,
}

impl Section {
    fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            comment: String::new(),
            comments: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// The section's name. Non-empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inline comment on the section's header line, or `""` if absent.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Sets the inline comment. An empty string removes it.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
    }

    /// The block comment lines preceding the section header.
    ///
    /// An empty string in the list represents a preserved blank line.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Replaces the block comment lines.
    pub fn set_comments<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = lines.into_iter().map(Into::into).collect();
    }

    /// Returns the property with the given name, appending a new one with an
    /// empty value if absent (lookup-or-create).
    pub fn property(&mut self, name: &str) -> &mut Property {
        debug_assert!(!name.is_empty(), "property names must be non-empty");
        self.properties
            .entry(name.to_string())
            .or_insert_with(|| Property::new(name))
    }

    /// Returns the property with the given name without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Returns `true` if a property with the given name exists.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Removes the property with the given name, returning it if present.
    ///
    /// A no-op returning `None` if no such property exists. The remaining
    /// properties keep their relative order.
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties.shift_remove(name)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the section has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over the properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.comment == other.comment
            && self.comments == other.comments
            && self.properties.values().eq(other.properties.values())
    }
}

impl Eq for Section {}

/// A named key/value pair within a [`Section`].
///
/// The value is stored only as a string; the typed `get_*`/`set_*` accessors
/// are lazy, non-persistent views over that string and never fail.
///
/// # Examples
///
/// ```rust
/// use initext::Document;
///
/// let mut doc: Document = "[flags]\nverbose = on\nlevel = 3x\n".parse().unwrap();
/// let flags = doc.get("flags").unwrap();
/// assert!(flags.get("verbose").unwrap().get_bool(false));
/// // Lenient parse: trailing garbage after the leading integer is ignored.
/// assert_eq!(flags.get("level").unwrap().get_i32(0), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: String,
    comment: String,
    comments: Vec<String>,
}

impl Property {
    fn new(name: &str) -> Self {
        Property {
            name: name.to_string(),
            value: String::new(),
            comment: String::new(),
            comments: Vec::new(),
        }
    }

    /// The property's name. Non-empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The inline comment on the property's line, or `""` if absent.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Sets the inline comment. An empty string removes it.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
    }

    /// The block comment lines preceding the property.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Replaces the block comment lines.
    pub fn set_comments<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = lines.into_iter().map(Into::into).collect();
    }

    /// Reads the value as a boolean.
    ///
    /// `"1"`, `"true"`, `"yes"`, `"on"` are true; `"0"`, `"false"`, `"no"`,
    /// `"off"` are false; anything else, including an empty value, yields
    /// `default`. Matching is case-sensitive.
    #[must_use]
    pub fn get_bool(&self, default: bool) -> bool {
        match self.value.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        }
    }

    /// Reads the value as an `i32`.
    ///
    /// An empty value yields `default`; otherwise the leading integer is
    /// parsed leniently (trailing garbage ignored, `0` if no digits,
    /// saturating on overflow).
    #[must_use]
    pub fn get_i32(&self, default: i32) -> i32 {
        if self.value.is_empty() {
            default
        } else {
            leading_i64(&self.value).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        }
    }

    /// Reads the value as an `i64`. Same leniency as [`Property::get_i32`].
    #[must_use]
    pub fn get_i64(&self, default: i64) -> i64 {
        if self.value.is_empty() {
            default
        } else {
            leading_i64(&self.value)
        }
    }

    /// Reads the value as an `f32`.
    ///
    /// An empty value yields `default`; otherwise the leading float is parsed
    /// leniently (trailing garbage ignored, `0.0` if unparsable).
    #[must_use]
    pub fn get_f32(&self, default: f32) -> f32 {
        if self.value.is_empty() {
            default
        } else {
            leading_f64(&self.value) as f32
        }
    }

    /// Reads the value as an `f64`. Same leniency as [`Property::get_f32`].
    #[must_use]
    pub fn get_f64(&self, default: f64) -> f64 {
        if self.value.is_empty() {
            default
        } else {
            leading_f64(&self.value)
        }
    }

    /// Returns the value, or `default` if the value is empty.
    #[must_use]
    pub fn get_string<'a>(&'a self, default: &'a str) -> &'a str {
        if self.value.is_empty() {
            default
        } else {
            &self.value
        }
    }

    /// Writes `"true"` or `"false"`.
    pub fn set_bool(&mut self, value: bool) {
        self.value = if value { "true" } else { "false" }.to_string();
    }

    /// Writes the decimal representation.
    pub fn set_i32(&mut self, value: i32) {
        self.value = value.to_string();
    }

    /// Writes the decimal representation.
    pub fn set_i64(&mut self, value: i64) {
        self.value = value.to_string();
    }

    /// Writes the value with 8 significant digits.
    pub fn set_f32(&mut self, value: f32) {
        self.value = format_sig(f64::from(value), 8);
    }

    /// Writes the value with 17 significant digits (enough to round-trip any
    /// `f64`).
    pub fn set_f64(&mut self, value: f64) {
        self.value = format_sig(value, 17);
    }

    /// Stores the value verbatim.
    pub fn set_string(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// Lenient leading-integer parse: optional outer whitespace and sign, then
/// digits up to the first non-digit. No digits parses as 0; overflow
/// saturates.
fn leading_i64(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = i64::from(byte - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Lenient leading-float parse: the longest prefix matching
/// `[+-]? digits* ('.' digits*)? ([eE][+-]? digits+)?` with at least one
/// mantissa digit. Anything else parses as 0.0.
fn leading_f64(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if let Some(b'+' | b'-') = bytes.first() {
        end += 1;
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut fraction_end = end + 1;
        let mut fraction_digits = 0;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
            fraction_digits += 1;
        }
        if mantissa_digits > 0 || fraction_digits > 0 {
            end = fraction_end;
            mantissa_digits += fraction_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if let Some(b'+' | b'-') = bytes.get(exponent_end) {
            exponent_end += 1;
        }
        let mut exponent_digits = 0;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
            exponent_digits += 1;
        }
        if exponent_digits > 0 {
            end = exponent_end;
        }
    }
    text[..end].parse().unwrap_or(0.0)
}

/// Formats with `digits` significant digits, `%g`-style: exponent notation
/// when the decimal exponent is below -4 or at least `digits`, fixed notation
/// otherwise, trailing zeros trimmed in both forms.
fn format_sig(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= digits as i32 {
        let mantissa = if mantissa.contains('.') {
            mantissa.trim_end_matches('0').trim_end_matches('.')
        } else {
            mantissa
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }
}
