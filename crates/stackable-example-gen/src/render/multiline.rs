use std::io::{self, Write};

use super::LineWriter;

/// Writes comments as separate lines above the field, separated from the previous field by an
/// empty line:
///
/// ```yaml
/// name: ""
///
/// # Number of replicas.
/// replicas: 0
/// ```
pub(super) struct MultilineWriter<'a, W> {
    writer: &'a mut W,
}

impl<'a, W: Write> MultilineWriter<'a, W> {
    pub(super) fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<W: Write> LineWriter for MultilineWriter<'_, W> {
    fn write_line(&mut self, code: &str, comment: &[String], comment_indent: &str) -> io::Result<()> {
        if !comment.is_empty() {
            writeln!(self.writer)?;
        }

        for line in comment {
            if line.is_empty() {
                writeln!(self.writer, "{comment_indent}#")?;
            } else {
                writeln!(self.writer, "{comment_indent}# {line}")?;
            }
        }

        writeln!(self.writer, "{code}")
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{
        config::{Config, Format},
        prop::{Document, Prop},
        render::render_to_string,
    };

    fn render(document: &Document) -> String {
        let config = Config {
            format: Format::Multiline,
            ..Config::default()
        };

        render_to_string(document, &config).expect("rendering into a buffer must succeed")
    }

    fn comment(lines: &[&str]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn comments_above_fields() {
        let document = Document {
            header: vec![Prop::scalar("kind", "Widget").with_comment(comment(&["The kind."]))],
            body: Prop::properties(
                "",
                vec![
                    Prop::scalar("size", "\"\"")
                        .with_comment(comment(&["The size of the widget.", "", "Defaults to small."])),
                    Prop::properties("spec", vec![
                        Prop::scalar("replicas", "0").with_comment(comment(&["Replica count."])),
                    ]),
                ],
            ),
        };

        let expected = indoc! {r#"

            # The kind.
            kind: Widget

            # The size of the widget.
            #
            # Defaults to small.
            size: ""
            spec:

              # Replica count.
              replicas: 0
        "#};
        assert_eq!(render(&document), expected);
    }

    #[test]
    fn list_items() {
        let item = Prop::properties(
            "",
            vec![
                Prop::scalar("name", "\"\"").with_comment(comment(&["Name of the container."])),
                Prop::scalar("image", "\"\"").with_comment(comment(&["Image to run."])),
            ],
        );
        let document = Document {
            header: Vec::new(),
            body: Prop::properties(
                "",
                vec![
                    Prop::list("containers", item),
                    Prop::list("args", Prop::scalar("", "\"\"").with_comment(comment(&["An argument."]))),
                ],
            ),
        };

        let expected = indoc! {r#"
            args:

            # An argument.
            - ""
            containers:

              # Image to run.
            - image: ""

              # Name of the container.
              name: ""
        "#};
        assert_eq!(render(&document), expected);
    }
}
