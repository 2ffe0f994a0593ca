//! INI parsing.
//!
//! A single left-to-right scan over the input with one state variable and no
//! backtracking. The grammar is line-oriented:
//!
//! - top-level comment lines (`;` or `#`) and blank lines buffer up as the
//!   *pending* block-comment list, attached to the next section or property
//!   that opens and discarded at end of input if nothing follows;
//! - `[name]` opens (or re-opens) a section, optionally followed by an inline
//!   comment on the same line;
//! - `key = value` adds (or overwrites) a property in the open section,
//!   optionally followed by an inline comment.
//!
//! Line endings may be LF, CR, or CRLF, freely mixed. A CR ends the logical
//! line immediately and arms a pending-LF flag; the flag is consumed by the
//! very next character — an LF is absorbed without producing a blank line,
//! anything else clears the flag and is processed normally.
//!
//! Parsing is fail-fast with no rollback: the first structural error is
//! returned and everything committed before it stays in the document (see
//! [`crate::error`]).
//!
//! The machine is an explicit [`State`] enum plus a step function taking one
//! character; `None` is the end-of-input sentinel (an embedded NUL is treated
//! as that sentinel as well). The driver loop owns the single exit point.

use crate::document::Document;
use crate::error::{ParseError, Result};
use crate::escape::unescape;

/// Parses `text` into `document`, merging with whatever it already holds.
pub(crate) fn parse_into(document: &mut Document, text: &str) -> Result<()> {
    let mut parser = Parser::new(document);
    let mut characters = text.chars();
    loop {
        let character = match characters.next() {
            // An embedded NUL reads as the end sentinel.
            Some('\0') | None => None,
            other => other,
        };
        if parser.pending_lf {
            parser.pending_lf = false;
            if character == Some('\n') {
                continue;
            }
        }
        parser.step(character)?;
        if character.is_none() {
            return Ok(());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Top level, between entities.
    Start,
    /// Inside a top-level `;`/`#` comment line.
    Comment,
    /// Inside `[...]`, buffering the section name.
    SectionLabel,
    /// After `]`, scanning the rest of the header line for an inline comment.
    SectionJump,
    /// Capturing a section's inline comment.
    SectionComment,
    /// Buffering a property name, looking for `=`.
    Key,
    /// Buffering a property value.
    Value,
    /// Capturing a property's inline comment.
    ValueComment,
}

struct Parser<'a> {
    document: &'a mut Document,
    state: State,
    /// Armed by CR; the next character absorbs an LF or clears it.
    pending_lf: bool,
    /// Name or value text being accumulated, still escaped.
    buffer: String,
    /// Comment text being accumulated, verbatim.
    comment: String,
    /// Completed top-level comment/blank lines awaiting an entity.
    pending: Vec<String>,
    /// Name of the section open for key/value lines.
    section: Option<String>,
    /// Name of the property whose value or inline comment is being read.
    key: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(document: &'a mut Document) -> Self {
        Parser {
            document,
            state: State::Start,
            pending_lf: false,
            buffer: String::new(),
            comment: String::new(),
            pending: Vec::new(),
            section: None,
            key: None,
        }
    }

    /// Advances the machine by one character; `None` is the end sentinel.
    ///
    /// Returns the first structural error; otherwise the machine is left in
    /// its next state. Any end-of-line handling a state performs for `\n` it
    /// also performs for `\r` (arming [`Parser::pending_lf`]) and, where the
    /// line can legally end the input, for `None`.
    fn step(&mut self, character: Option<char>) -> Result<()> {
        match self.state {
            State::Start => match character {
                None => {}
                Some('\r') => {
                    self.pending_lf = true;
                    self.pending.push(String::new());
                }
                Some('\n') => self.pending.push(String::new()),
                Some('\t' | '\x0B' | '\x0C' | ' ') => {}
                Some(';' | '#') => self.state = State::Comment,
                Some('[') => self.state = State::SectionLabel,
                Some(other) => {
                    if self.section.is_none() {
                        return Err(ParseError::SectionMissing);
                    }
                    if other == '=' {
                        // A key line starting with `=` has an empty key.
                        return Err(ParseError::KeyEmpty);
                    }
                    self.buffer.push(other);
                    self.state = State::Key;
                }
            },
            State::Comment => match character {
                // A comment cut short by end of input never joins the pending
                // list; the list is about to be discarded anyway.
                None => {}
                Some('\r') => {
                    self.pending_lf = true;
                    self.finish_comment_line();
                }
                Some('\n') => self.finish_comment_line(),
                Some(other) => self.comment.push(other),
            },
            State::SectionLabel => match character {
                None | Some('\r' | '\n') => return Err(ParseError::SectionClose),
                Some(']') => self.open_section()?,
                Some(other) => self.buffer.push(other),
            },
            State::SectionJump => match character {
                None => {}
                Some('\r') => {
                    self.pending_lf = true;
                    self.state = State::Start;
                }
                Some('\n') => self.state = State::Start,
                Some(';' | '#') => self.state = State::SectionComment,
                // Anything else between `]` and the end of the line is ignored.
                Some(_) => {}
            },
            State::SectionComment => match character {
                Some('\r') => {
                    self.pending_lf = true;
                    self.store_section_comment();
                }
                None | Some('\n') => self.store_section_comment(),
                Some(other) => self.comment.push(other),
            },
            State::Key => match character {
                None | Some('\r' | '\n') => return Err(ParseError::AssignmentSymbol),
                Some('=') => self.open_property()?,
                Some(other) => self.buffer.push(other),
            },
            State::Value => match character {
                Some('\r') => {
                    self.pending_lf = true;
                    self.store_value();
                    self.state = State::Start;
                }
                Some('\n') => {
                    self.store_value();
                    self.state = State::Start;
                }
                None => self.store_value(),
                Some(';' | '#') => {
                    self.store_value();
                    self.state = State::ValueComment;
                }
                Some(other) => self.buffer.push(other),
            },
            State::ValueComment => match character {
                Some('\r') => {
                    self.pending_lf = true;
                    self.store_value_comment();
                }
                None | Some('\n') => self.store_value_comment(),
                Some(other) => self.comment.push(other),
            },
        }
        Ok(())
    }

    /// Completes a top-level comment line into the pending list.
    fn finish_comment_line(&mut self) {
        self.pending.push(std::mem::take(&mut self.comment));
        self.state = State::Start;
    }

    /// Handles `]`: decode the buffered name, look up or create the section,
    /// and attach the pending block comments.
    fn open_section(&mut self) -> Result<()> {
        let name = unescape(&self.buffer);
        self.buffer.clear();
        if name.is_empty() {
            return Err(ParseError::SectionEmpty);
        }
        let section = self.document.section(&name);
        if !self.pending.is_empty() {
            section.set_comments(std::mem::take(&mut self.pending));
        }
        self.section = Some(name);
        self.state = State::SectionJump;
        Ok(())
    }

    /// Handles `=`: decode the buffered key, look up or create the property,
    /// and attach the pending block comments.
    fn open_property(&mut self) -> Result<()> {
        let name = unescape(&self.buffer);
        self.buffer.clear();
        if name.is_empty() {
            return Err(ParseError::KeyEmpty);
        }
        let Self {
            document,
            section,
            pending,
            ..
        } = self;
        if let Some(section_name) = section.as_deref() {
            let property = document.section(section_name).property(&name);
            if !pending.is_empty() {
                property.set_comments(std::mem::take(pending));
            }
        }
        self.key = Some(name);
        self.state = State::Value;
        Ok(())
    }

    fn store_value(&mut self) {
        let value = unescape(&self.buffer);
        self.buffer.clear();
        let Self {
            document,
            section,
            key,
            ..
        } = self;
        if let (Some(section_name), Some(key_name)) = (section.as_deref(), key.as_deref()) {
            document
                .section(section_name)
                .property(key_name)
                .set_string(&value);
        }
    }

    fn store_section_comment(&mut self) {
        let comment = std::mem::take(&mut self.comment);
        let Self {
            document, section, ..
        } = self;
        if let Some(section_name) = section.as_deref() {
            document.section(section_name).set_comment(&comment);
        }
        self.state = State::Start;
    }

    fn store_value_comment(&mut self) {
        let comment = std::mem::take(&mut self.comment);
        let Self {
            document,
            section,
            key,
            ..
        } = self;
        if let (Some(section_name), Some(key_name)) = (section.as_deref(), key.as_deref()) {
            document
                .section(section_name)
                .property(key_name)
                .set_comment(&comment);
        }
        self.state = State::Start;
    }
}
