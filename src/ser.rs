//! Canonical INI serialization.
//!
//! The writer walks a [`Document`] in insertion order and emits normalized
//! text: one canonical `\n` line terminator, `;` for every comment marker,
//! and `name = value` spacing regardless of how the source was written. Block
//! comment lines are emitted before their entity (`;` + text, or a bare blank
//! line for an empty entry) and inline comments after it as ` ;` + text.
//!
//! Output is canonical, not byte-preserving: parsing the output of
//! serialization yields a structurally equal document, but the text itself
//! need not match any hand-written original.

use std::fmt::{self, Write};

use crate::document::{Document, Property, Section};
use crate::escape::escape;

/// Writes the whole document as canonical INI text.
pub(crate) fn write_document<W: Write>(document: &Document, output: &mut W) -> fmt::Result {
    for section in document.sections() {
        write_section(section, output)?;
    }
    Ok(())
}

fn write_section<W: Write>(section: &Section, output: &mut W) -> fmt::Result {
    write_block_comments(section.comments(), output)?;
    write!(output, "[{}]", escape(section.name()))?;
    write_inline_comment(section.comment(), output)?;
    output.write_char('\n')?;
    for property in section.properties() {
        write_property(property, output)?;
    }
    Ok(())
}

fn write_property<W: Write>(property: &Property, output: &mut W) -> fmt::Result {
    write_block_comments(property.comments(), output)?;
    write!(
        output,
        "{} = {}",
        escape(property.name()),
        escape(property.value())
    )?;
    write_inline_comment(property.comment(), output)?;
    output.write_char('\n')
}

fn write_block_comments<W: Write>(lines: &[String], output: &mut W) -> fmt::Result {
    for line in lines {
        if !line.is_empty() {
            output.write_char(';')?;
            output.write_str(line)?;
        }
        output.write_char('\n')?;
    }
    Ok(())
}

fn write_inline_comment<W: Write>(comment: &str, output: &mut W) -> fmt::Result {
    if !comment.is_empty() {
        output.write_str(" ;")?;
        output.write_str(comment)?;
    }
    Ok(())
}

impl fmt::Display for Document {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(self, formatter)
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn empty_document_serializes_to_nothing() {
        assert_eq!(Document::new().to_string(), "");
    }

    #[test]
    fn sections_and_properties_in_insertion_order() {
        let mut doc = Document::new();
        doc.section("b").property("y").set_string("2");
        doc.section("a").property("x").set_string("1");
        doc.section("b").property("z").set_string("3");
        assert_eq!(doc.to_string(), "[b]\ny = 2\nz = 3\n[a]\nx = 1\n");
    }

    #[test]
    fn comments_are_emitted_around_entities() {
        let mut doc = Document::new();
        let section = doc.section("net");
        section.set_comments([" transport", ""]);
        section.set_comment(" header note");
        let property = section.property("port");
        property.set_i32(8080);
        property.set_comments([" tcp port"]);
        property.set_comment(" keep below 1024? no");
        assert_eq!(
            doc.to_string(),
            "; transport\n\n[net] ; header note\n; tcp port\nport = 8080 ; keep below 1024? no\n"
        );
    }

    #[test]
    fn names_and_values_are_escaped() {
        let mut doc = Document::new();
        doc.section("tab\there")
            .property("multi")
            .set_string("line1\nline2");
        assert_eq!(doc.to_string(), "[tab\\there]\nmulti = line1\\nline2\n");
    }

    #[test]
    fn output_is_normalized_not_byte_preserving() {
        let mut doc = Document::new();
        doc.parse("[a]\r\nk=v # note\r\n").unwrap();
        assert_eq!(doc.to_string(), "[a]\nk = v ; note\n");
    }

    #[test]
    fn empty_inline_comment_is_omitted() {
        let mut doc = Document::new();
        doc.section("a").property("k").set_string("v");
        doc.section("a").set_comment("");
        assert_eq!(doc.to_string(), "[a]\nk = v\n");
    }
}
