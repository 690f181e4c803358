//! Settings shared by the normalizers and the renderer.
//!
//! A [`Config`] is built once (usually from command line arguments) and then passed by reference
//! into [`crate::crd`], [`crate::source`] and [`crate::render`].

/// The column at which trailing comments start in the [`Format::Oneline`] output.
pub const DEFAULT_COMMENT_PADDING: usize = 40;

/// The error returned when an unknown output format name is parsed.
pub type ParseFormatError = strum::ParseError;

/// Supported output styles of the rendered example.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// Comments are appended to the line of the field, aligned at the comment padding column.
    #[default]
    Oneline,

    /// Comments are written as separate lines directly above the field.
    Multiline,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The output style.
    pub format: Format,

    /// The column trailing comments are aligned at. Only used by [`Format::Oneline`].
    pub comment_padding: usize,

    /// Collapse well-known core Kubernetes types (tolerations and affinities) into `{}`.
    pub hide_core_types: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::default(),
            comment_padding: DEFAULT_COMMENT_PADDING,
            hide_core_types: true,
        }
    }
}
