use std::io::{self, Write};

use super::LineWriter;

/// Appends comments to the end of the line, aligned at a fixed column:
///
/// ```yaml
/// replicas: 0                              # Number of replicas.
/// ```
pub(super) struct OnelineWriter<'a, W> {
    writer: &'a mut W,
    padding: usize,
}

impl<'a, W: Write> OnelineWriter<'a, W> {
    pub(super) fn new(writer: &'a mut W, padding: usize) -> Self {
        Self { writer, padding }
    }
}

impl<W: Write> LineWriter for OnelineWriter<'_, W> {
    fn write_line(&mut self, code: &str, comment: &[String], _comment_indent: &str) -> io::Result<()> {
        let comment = comment.join(" ");
        if comment.trim().is_empty() {
            return writeln!(self.writer, "{code}");
        }

        let padding = self.padding.saturating_sub(code.chars().count());
        writeln!(self.writer, "{code}{:padding$} # {comment}", "")
    }
}
