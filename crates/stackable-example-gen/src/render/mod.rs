//! Renders a [`Document`] as commented YAML.
//!
//! Two styles are supported, see [`Format`]. Both emit two-space indented block mappings and
//! non-indented sequences:
//!
//! ```yaml
//! containers:
//! - name: ""
//!   args:
//!   - ""
//! ```
use std::io::{self, Write};

use snafu::{ResultExt, Snafu};

use crate::{
    config::{Config, Format},
    prop::{self, Document, Prop, PropValue},
};

mod multiline;
mod oneline;

use multiline::MultilineWriter;
use oneline::OnelineWriter;

const INDENT: &str = "  ";
const LIST_MARKER: &str = "- ";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to write rendered example"))]
    WriteOutput { source: std::io::Error },
}

/// Writes `document` to `writer` in the format selected by `config`.
pub fn write_document<W: Write>(writer: &mut W, document: &Document, config: &Config) -> Result<()> {
    tracing::debug!(format = %config.format, "rendering example document");

    match config.format {
        Format::Oneline => OnelineWriter::new(writer, config.comment_padding)
            .write_document(document)
            .context(WriteOutputSnafu),
        Format::Multiline => MultilineWriter::new(writer)
            .write_document(document)
            .context(WriteOutputSnafu),
    }
}

/// Emits single lines of the output. The traversal of the tree is shared by all formats, they
/// only differ in how comments are attached to a line.
trait LineWriter {
    /// Writes the line `code` annotated with `comment`. `comment_indent` is the indentation of
    /// the mapping level the line belongs to.
    fn write_line(&mut self, code: &str, comment: &[String], comment_indent: &str) -> io::Result<()>;

    fn write_document(&mut self, document: &Document) -> io::Result<()> {
        self.write_entries(document.header.iter(), 0, false)?;
        self.write_prop(&document.body, 0, false)
    }

    /// Writes the content of `prop`. `is_list` is set if `prop` is the item of a sequence, in
    /// which case its first line carries the list marker.
    fn write_prop(&mut self, prop: &Prop, level: usize, is_list: bool) -> io::Result<()> {
        match &prop.value {
            PropValue::Scalar(_) => Ok(()),
            PropValue::Properties(properties) => {
                self.write_entries(prop::sorted(properties), level, is_list)
            }
            PropValue::ListItem(item) => match &item.value {
                PropValue::Scalar(value) => {
                    let indent = list_indent(level);
                    self.write_line(&format!("{indent}{LIST_MARKER}{value}"), &item.comment, &indent)
                }
                _ => self.write_prop(item, level, true),
            },
        }
    }

    fn write_entries<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a Prop>,
        level: usize,
        is_list: bool,
    ) -> io::Result<()> {
        let comment_indent = indent(level);

        for (index, entry) in entries.into_iter().enumerate() {
            let line_indent = entry_indent(level, is_list && index == 0);
            let key = &entry.key;

            match &entry.value {
                PropValue::Scalar(value) => self.write_line(
                    &format!("{line_indent}{key}: {value}"),
                    &entry.comment,
                    &comment_indent,
                )?,
                PropValue::Properties(_) | PropValue::ListItem(_) => {
                    self.write_line(
                        &format!("{line_indent}{key}:"),
                        &entry.comment,
                        &comment_indent,
                    )?;
                    self.write_prop(entry, level + 1, false)?;
                }
            }
        }

        Ok(())
    }
}

/// Renders `document` into a [`String`].
pub fn render_to_string(document: &Document, config: &Config) -> Result<String> {
    let mut buffer = Vec::new();
    write_document(&mut buffer, document, config)?;

    // Every part of the output is assembled from `&str`s.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// The indentation of a mapping entry. The first entry of a list item replaces the last
/// indentation step with the list marker.
fn entry_indent(level: usize, list_marker: bool) -> String {
    if list_marker {
        format!("{}{LIST_MARKER}", list_indent(level))
    } else {
        indent(level)
    }
}

/// Sequences are not indented relative to their key, so their items start one level up.
fn list_indent(level: usize) -> String {
    indent(level.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, false, "")]
    #[case(2, false, "    ")]
    #[case(1, true, "- ")]
    #[case(3, true, "    - ")]
    #[case(0, true, "- ")]
    fn indentation(#[case] level: usize, #[case] list_marker: bool, #[case] expected: &str) {
        assert_eq!(entry_indent(level, list_marker), expected);
    }
}
