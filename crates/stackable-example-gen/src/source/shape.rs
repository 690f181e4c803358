//! Maps Rust types to the shape they take once serialized.
use syn::{Fields, GenericArgument, ItemStruct, PathArguments, PathSegment, Type};

use super::{Declaration, Package};
use crate::defaults::LeafKind;

/// Smart pointers and other wrappers which serialize exactly like their content.
const TRANSPARENT_WRAPPERS: [&str; 8] = [
    "Option", "Box", "Arc", "Rc", "Cow", "RefCell", "Cell", "Mutex",
];

const INTEGERS: [&str; 12] = [
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];

const LISTS: [&str; 6] = ["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet", "IndexSet"];
const MAPS: [&str; 3] = ["HashMap", "BTreeMap", "IndexMap"];

const TIMESTAMPS: [&str; 6] = [
    "Time",
    "MicroTime",
    "DateTime",
    "NaiveDateTime",
    "OffsetDateTime",
    "Timestamp",
];

/// Types which serialize to arbitrary JSON.
const OPAQUE: [&str; 3] = ["Value", "JSON", "RawExtension"];

/// The serialized shape of a Rust type.
#[derive(Clone, Copy)]
pub(super) enum Shape<'a> {
    Leaf(LeafKind),

    /// A struct declared in the package, expanded into its fields.
    Struct(&'a ItemStruct),

    /// A sequence of the given element type.
    List(&'a Type),

    /// A map from (string) keys to the given value type.
    Map(&'a Type),

    /// Generic parameters and types declared outside of the package.
    Unresolved,
}

impl Shape<'_> {
    pub(super) fn leaf_kind(&self) -> Option<LeafKind> {
        match self {
            Self::Leaf(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl Package {
    /// Determines the shape of `ty`, looking through wrappers and type aliases.
    pub(super) fn resolve<'a>(&'a self, ty: &'a Type) -> Shape<'a> {
        match ty {
            Type::Reference(reference) => self.resolve(&reference.elem),
            Type::Paren(paren) => self.resolve(&paren.elem),
            Type::Group(group) => self.resolve(&group.elem),
            Type::Array(array) => Shape::List(&array.elem),
            Type::Slice(slice) => Shape::List(&slice.elem),
            Type::Path(path) => match path.path.segments.last() {
                Some(segment) => self.resolve_segment(segment),
                None => Shape::Unresolved,
            },
            _ => Shape::Unresolved,
        }
    }

    /// Determines the shape of the type declared as `name` in the package.
    pub(super) fn resolve_declaration(&self, name: &str) -> Shape<'_> {
        match self.items.get(name) {
            Some(Declaration::Struct(item)) => match &item.fields {
                // Newtypes serialize like the wrapped type
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                    self.resolve(&fields.unnamed[0].ty)
                }
                _ => Shape::Struct(item),
            },
            Some(Declaration::Enum(item)) => {
                if item.variants.iter().all(|variant| variant.fields.is_empty()) {
                    Shape::Leaf(LeafKind::String)
                } else {
                    Shape::Leaf(LeafKind::Opaque)
                }
            }
            Some(Declaration::Alias(item)) => self.resolve(&item.ty),
            None => {
                tracing::debug!(
                    type_name = name,
                    "type is not declared in the package, leaving it empty"
                );
                Shape::Unresolved
            }
        }
    }

    fn resolve_segment<'a>(&'a self, segment: &'a PathSegment) -> Shape<'a> {
        let ident = segment.ident.to_string();
        let name = ident.as_str();
        let arguments = type_arguments(segment);

        match arguments.as_slice() {
            [.., inner] if TRANSPARENT_WRAPPERS.contains(&name) => return self.resolve(inner),
            [element] if LISTS.contains(&name) => return Shape::List(*element),
            [key, value] if MAPS.contains(&name) => {
                return if self.is_string(key) && self.is_string(value) {
                    Shape::Leaf(LeafKind::StringMap)
                } else {
                    Shape::Map(*value)
                };
            }
            _ => {}
        }

        let kind = match name {
            "String" | "str" | "char" => LeafKind::String,
            "bool" => LeafKind::Boolean,
            "f32" | "f64" => LeafKind::Number,
            "Quantity" => LeafKind::Quantity,
            "Duration" => LeafKind::Duration,
            _ if INTEGERS.contains(&name) => LeafKind::Integer,
            _ if TIMESTAMPS.contains(&name) => LeafKind::Timestamp,
            _ if OPAQUE.contains(&name) => LeafKind::Opaque,
            _ => return self.resolve_declaration(name),
        };

        Shape::Leaf(kind)
    }

    fn is_string(&self, ty: &Type) -> bool {
        matches!(self.resolve(ty), Shape::Leaf(LeafKind::String))
    }
}

/// Returns the generic type arguments of a path segment, skipping lifetimes and constants.
fn type_arguments(segment: &PathSegment) -> Vec<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(arguments) => arguments
            .args
            .iter()
            .filter_map(|argument| match argument {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
