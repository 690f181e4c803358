//! Builds example documents from Rust type declarations.
//!
//! All `.rs` files below a package directory are parsed (without compiling them) and the
//! structs, enums and type aliases they declare are indexed by name. Starting at the requested
//! type, the fields are expanded the way `serde` would serialize them:
//!
//! - `#[serde(rename = "..")]` and `#[serde(rename_all = "..")]` determine the property keys,
//! - `#[serde(flatten)]` splices the fields of the member into the parent,
//! - `#[serde(skip)]` and `#[serde(skip_serializing)]` members are left out.
//!
//! Doc comments become the property comments.
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu, ensure};
use syn::{Item, ItemEnum, ItemStruct, ItemType, Type, ext::IdentExt};

use crate::{
    config::Config,
    defaults::{self, ResourcePreset},
    prop::{Document, Prop, PropValue},
};

mod attrs;
mod shape;

use attrs::{ContainerAttributes, FieldAttributes};
use shape::Shape;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "package {path} does not exist or contains no Rust source files",
        path = path.display()
    ))]
    PackageNotFound { path: PathBuf },

    #[snafu(display("failed to read directory {path}", path = path.display()))]
    ReadDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to read source file {path}", path = path.display()))]
    ReadSource {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to parse source file {path}", path = path.display()))]
    ParseSource { source: syn::Error, path: PathBuf },

    #[snafu(display("failed to parse serde attributes of {item}"))]
    ParseAttributes { source: syn::Error, item: String },

    #[snafu(display(
        "type {type_name:?} is not declared in package {package}",
        package = package.display()
    ))]
    TypeNotFound { type_name: String, package: PathBuf },
}

/// Loads the package at `path` and builds the example document for the type `type_name`.
pub fn from_package(path: impl AsRef<Path>, type_name: &str, config: &Config) -> Result<Document> {
    Package::load(path)?.build_document(type_name, config)
}

enum Declaration {
    Struct(ItemStruct),
    Enum(ItemEnum),
    Alias(ItemType),
}

/// The type declarations of a set of Rust source files.
#[derive(Default)]
pub struct Package {
    path: PathBuf,
    items: HashMap<String, Declaration>,
}

impl Package {
    /// Parses all Rust source files below the directory `path`.
    ///
    /// Files are processed in path order. If a name is declared more than once, the first
    /// declaration wins.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure!(path.is_dir(), PackageNotFoundSnafu { path });

        let mut files = Vec::new();
        collect_source_files(path, &mut files)?;
        ensure!(!files.is_empty(), PackageNotFoundSnafu { path });
        files.sort();

        let mut package = Self {
            path: path.to_path_buf(),
            items: HashMap::new(),
        };

        for file in &files {
            tracing::debug!(path = %file.display(), "parsing source file");
            let source = fs::read_to_string(file).context(ReadSourceSnafu { path: file })?;
            let parsed = syn::parse_file(&source).context(ParseSourceSnafu { path: file })?;
            package.index(parsed.items);
        }

        tracing::debug!(
            path = %package.path.display(),
            files = files.len(),
            types = package.items.len(),
            "loaded package"
        );

        Ok(package)
    }

    /// Parses a single source file.
    pub fn parse_str(source: &str) -> Result<Self> {
        let parsed = syn::parse_file(source).context(ParseSourceSnafu { path: "<string>" })?;

        let mut package = Self::default();
        package.index(parsed.items);
        Ok(package)
    }

    fn index(&mut self, items: Vec<Item>) {
        for item in items {
            let (name, declaration) = match item {
                Item::Struct(item) => (item.ident.to_string(), Declaration::Struct(item)),
                Item::Enum(item) => (item.ident.to_string(), Declaration::Enum(item)),
                Item::Type(item) => (item.ident.to_string(), Declaration::Alias(item)),
                Item::Mod(item) => {
                    if let Some((_, content)) = item.content {
                        self.index(content);
                    }
                    continue;
                }
                _ => continue,
            };

            if self.items.contains_key(&name) {
                tracing::debug!(type_name = %name, "type is declared more than once, ignoring redeclaration");
                continue;
            }
            self.items.insert(name, declaration);
        }
    }

    /// Builds the example document for the type `type_name`.
    ///
    /// Documents built from Rust types have no header.
    pub fn build_document(&self, type_name: &str, config: &Config) -> Result<Document> {
        ensure!(self.items.contains_key(type_name), TypeNotFoundSnafu {
            type_name,
            package: &self.path,
        });

        tracing::debug!(type_name, "building example from Rust type");
        let shape = self.resolve_declaration(type_name);

        Ok(Document {
            header: Vec::new(),
            body: Prop::new("", self.build_value(shape, &[], config)?),
        })
    }

    fn build_prop(&self, name: &str, ty: &Type, comment: Vec<String>, config: &Config) -> Result<Prop> {
        let shape = self.resolve(ty);
        let value = match defaults::synthesize(name, None, shape.leaf_kind(), config) {
            Some(literal) => PropValue::Scalar(literal),
            None => self.build_value(shape, &comment, config)?,
        };

        Ok(Prop {
            key: name.to_owned(),
            comment,
            value,
        })
    }

    /// Expands the children of a node which could not be rendered as a literal. `comment` is the
    /// comment of the node itself.
    fn build_value(&self, shape: Shape<'_>, comment: &[String], config: &Config) -> Result<PropValue> {
        let value = match shape {
            Shape::Struct(item) => PropValue::Properties(self.build_fields(item, config)?),
            Shape::List(element) => {
                PropValue::ListItem(Box::new(self.build_prop("", element, Vec::new(), config)?))
            }
            Shape::Map(value_type) => {
                PropValue::Properties(self.build_map_entries(value_type, comment, config)?)
            }
            Shape::Leaf(_) | Shape::Unresolved => PropValue::Properties(Vec::new()),
        };

        Ok(value)
    }

    fn build_fields(&self, item: &ItemStruct, config: &Config) -> Result<Vec<Prop>> {
        let container = ContainerAttributes::parse(&item.attrs).context(ParseAttributesSnafu {
            item: item.ident.to_string(),
        })?;

        let mut properties = Vec::new();
        for field in &item.fields {
            // Tuple structs with more than one field serialize as sequences
            let Some(ident) = &field.ident else {
                continue;
            };
            let ident = ident.unraw().to_string();

            let attributes = FieldAttributes::parse(&field.attrs).with_context(|_| {
                ParseAttributesSnafu {
                    item: format!("{}::{ident}", item.ident),
                }
            })?;

            if attributes.skip {
                continue;
            }

            if attributes.flatten {
                match self.resolve(&field.ty) {
                    Shape::Struct(inner) => properties.extend(self.build_fields(inner, config)?),
                    _ => tracing::debug!(
                        field = %ident,
                        "flattened field is not a struct of the package, skipping it"
                    ),
                }
                continue;
            }

            let name = attributes
                .rename
                .unwrap_or_else(|| container.field_name(&ident));
            let comment = attrs::doc_comments(&field.attrs);
            properties.push(self.build_prop(&name, &field.ty, comment, config)?);
        }

        Ok(properties)
    }

    /// Builds the example entries of a map with values of `value_type`.
    fn build_map_entries(
        &self,
        value_type: &Type,
        comment: &[String],
        config: &Config,
    ) -> Result<Vec<Prop>> {
        if let Some(preset) = ResourcePreset::detect(&comment.join(" ")) {
            return Ok(preset.properties(&[]));
        }

        let shape = self.resolve(value_type);
        let entry = match defaults::synthesize("", None, shape.leaf_kind(), config) {
            Some(literal) => Prop::scalar(defaults::MAP_KEY, literal),
            None => Prop::new(defaults::MAP_KEY, self.build_value(shape, &[], config)?),
        };

        Ok(vec![entry])
    }
}

/// Recursively collects the `.rs` files below `dir`, skipping hidden and `target` directories.
fn collect_source_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).context(ReadDirectorySnafu { path: dir })?;

    for entry in entries {
        let path = entry.context(ReadDirectorySnafu { path: dir })?.path();

        if path.is_dir() {
            let skipped = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.') || name == "target");

            if !skipped {
                collect_source_files(&path, files)?;
            }
        } else if path.extension().is_some_and(|extension| extension == "rs") {
            files.push(path);
        }
    }

    Ok(())
}
