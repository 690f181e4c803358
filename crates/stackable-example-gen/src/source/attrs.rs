//! Reads the parts of `#[serde(..)]` attributes and doc comments which influence the serialized
//! shape of a type.
use std::str::FromStr;

use convert_case::{Case, Casing};
use syn::{
    Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token, meta::ParseNestedMeta, token,
};

/// Serde attributes of a struct field.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct FieldAttributes {
    /// The serialized name set by `rename = ".."` or `rename(serialize = "..")`.
    pub rename: Option<String>,

    /// The fields of the member are serialized as if they were declared on the parent.
    pub flatten: bool,

    /// The member is not serialized at all.
    pub skip: bool,
}

impl FieldAttributes {
    pub(super) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut field = Self::default();

        for attr in serde_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(rename) = parse_serialize_name(&meta)? {
                        field.rename = Some(rename.value());
                    }
                } else if meta.path.is_ident("flatten") {
                    field.flatten = true;
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    field.skip = true;
                } else {
                    skip_nested(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(field)
    }
}

/// Serde attributes of a struct.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ContainerAttributes {
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttributes {
    pub(super) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut container = Self::default();

        for attr in serde_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(rule) = parse_serialize_name(&meta)? {
                        let parsed = RenameRule::from_str(&rule.value()).map_err(|_| {
                            syn::Error::new(rule.span(), format!("unknown rename rule {:?}", rule.value()))
                        })?;
                        container.rename_all = Some(parsed);
                    }
                } else {
                    skip_nested(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(container)
    }

    /// Returns the serialized name of the field `ident`.
    pub(super) fn field_name(&self, ident: &str) -> String {
        match self.rename_all {
            Some(rule) => rule.apply(ident),
            None => ident.to_owned(),
        }
    }
}

/// The case conversions supported by `#[serde(rename_all = "..")]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
pub(super) enum RenameRule {
    #[strum(serialize = "lowercase")]
    Lower,

    #[strum(serialize = "UPPERCASE")]
    Upper,

    #[strum(serialize = "PascalCase")]
    Pascal,

    #[strum(serialize = "camelCase")]
    Camel,

    #[strum(serialize = "snake_case")]
    Snake,

    #[strum(serialize = "SCREAMING_SNAKE_CASE")]
    ScreamingSnake,

    #[strum(serialize = "kebab-case")]
    Kebab,

    #[strum(serialize = "SCREAMING-KEBAB-CASE")]
    ScreamingKebab,
}

impl RenameRule {
    /// Applies the rule to a field name, which is expected to be snake case.
    ///
    /// Words are only split at underscores, digits do not start a new word.
    pub(super) fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_ascii_lowercase(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => field.from_case(Case::Snake).to_case(Case::Pascal),
            Self::Camel => field.from_case(Case::Snake).to_case(Case::Camel),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
        }
    }
}

/// Collects the lines of the doc comments in `attrs`.
///
/// Lines starting with `+` are markers for code generators and are dropped, as well as trailing
/// empty lines. Indented lines starting with `+` are regular content.
pub(super) fn doc_comments(attrs: &[Attribute]) -> Vec<String> {
    let mut lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(doc), ..
                }) => Some(doc.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| {
            doc.split('\n')
                .map(|line| {
                    let line = line.trim_end_matches('\r');
                    line.strip_prefix(' ').unwrap_or(line).to_owned()
                })
                .collect::<Vec<_>>()
        })
        .filter(|line| !line.starts_with('+'))
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    lines
}

fn serde_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parses `name = ".."` and `name(serialize = "..", deserialize = "..")`, returning the name used
/// during serialization.
fn parse_serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut serialize = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            serialize = Some(nested.value()?.parse()?);
        } else {
            skip_nested(&nested)?;
        }

        Ok(())
    })?;

    Ok(serialize)
}

/// Consumes the value of a serde option we are not interested in, like `default = ".."` or
/// `bound(serialize = "..")`.
fn skip_nested(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(token::Paren) {
        meta.parse_nested_meta(|nested| skip_nested(&nested))?;
    }

    Ok(())
}
