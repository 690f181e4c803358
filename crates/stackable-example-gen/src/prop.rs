//! The format-agnostic property tree both normalizers produce and the renderer consumes.
use std::cmp::Ordering;

/// Property keys which are always placed at the end of their parent, because they usually
/// override infrastructure settings rather than configure the product itself.
const TRAILING_KEYS: [&str; 4] = ["nodeSelector", "tolerations", "affinity", "resources"];

/// The property key which is always placed first.
const LEADING_KEY: &str = "enabled";

/// A single node of the property tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prop {
    /// The name of the property below its parent. Empty for list items.
    pub key: String,

    /// Comment lines describing the property. Might be empty.
    pub comment: Vec<String>,

    pub value: PropValue,
}

/// The content of a [`Prop`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropValue {
    /// A rendered literal, like `""`, `false`, `0` or `"0Gi"`.
    Scalar(String),

    /// A mapping of child properties. An empty list means that nothing could be synthesized for
    /// the property.
    Properties(Vec<Prop>),

    /// A sequence, described by its element.
    ListItem(Box<Prop>),
}

impl Prop {
    pub fn new(key: impl Into<String>, value: PropValue) -> Self {
        Self {
            key: key.into(),
            comment: Vec::new(),
            value,
        }
    }

    pub fn scalar(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, PropValue::Scalar(value.into()))
    }

    pub fn properties(key: impl Into<String>, properties: Vec<Prop>) -> Self {
        Self::new(key, PropValue::Properties(properties))
    }

    pub fn list(key: impl Into<String>, item: Prop) -> Self {
        Self::new(key, PropValue::ListItem(Box::new(item)))
    }

    pub fn with_comment(mut self, comment: Vec<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Returns the literal if this property is a leaf.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            PropValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

/// The root of a generated example.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Properties rendered first and in the given order, e.g. `apiVersion` and `kind`.
    pub header: Vec<Prop>,

    /// The remaining properties. Children are sorted with [`compare_keys`] during rendering.
    pub body: Prop,
}

fn category(key: &str) -> u8 {
    if key == LEADING_KEY {
        0
    } else if TRAILING_KEYS.contains(&key) {
        2
    } else {
        1
    }
}

/// Orders property keys: `enabled` < all other keys < `nodeSelector`, `tolerations`, `affinity`,
/// `resources`. Keys in the same category are ordered alphabetically.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    category(a).cmp(&category(b)).then_with(|| a.cmp(b))
}

/// Returns the given properties sorted with [`compare_keys`]. The sort is stable.
pub fn sorted(properties: &[Prop]) -> Vec<&Prop> {
    let mut sorted: Vec<&Prop> = properties.iter().collect();
    sorted.sort_by(|a, b| compare_keys(&a.key, &b.key));
    sorted
}
