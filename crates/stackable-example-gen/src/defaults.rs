//! Synthesis of example values for leaf properties.
//!
//! Both normalizers classify their schema nodes into a [`LeafKind`] and call [`synthesize`],
//! which makes the literal a pure function of the field name, the node shape and the
//! [`Config`].
use crate::{config::Config, prop::Prop};

/// Field names of core Kubernetes types which are collapsed into `{}` when
/// [`Config::hide_core_types`] is enabled. Their schemas are huge and well documented elsewhere.
pub const CORE_TYPES: [&str; 4] = ["tolerations", "nodeAffinity", "podAffinity", "podAntiAffinity"];

/// The key of the single example entry of a map.
pub const MAP_KEY: &str = "\"key\"";

/// The name used in the `metadata` section of generated custom resources.
pub const METADATA_NAME: &str = "example";

pub const EMPTY_OBJECT: &str = "{}";
pub const SAMPLE_QUANTITY: &str = "\"0Gi\"";
pub const SAMPLE_TIMESTAMP: &str = "\"2006-01-02T15:04:05Z\"";
pub const SAMPLE_DURATION: &str = "\"0h\"";

const REQUESTS_DESCRIPTION: &str =
    "Requests describes the minimum amount of compute resources required.";
const LIMITS_DESCRIPTION: &str = "Limits describes the maximum amount of compute resources allowed.";

/// Node shapes which are rendered as a literal instead of being expanded.
///
/// The variants are listed in priority order. Normalizers must check for them in this order when
/// a node matches more than one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafKind {
    /// Resource quantities, like `x-kubernetes-int-or-string` or `Quantity`.
    Quantity,

    /// Points in time, like `format: date-time` or `Time`.
    Timestamp,

    Duration,

    /// Arbitrary JSON, like `x-kubernetes-preserve-unknown-fields` or `serde_json::Value`.
    Opaque,

    /// Maps from string to string. These are not expanded.
    StringMap,

    String,
    Boolean,
    Integer,
    Number,
}

impl LeafKind {
    pub fn literal(self) -> &'static str {
        match self {
            Self::Quantity => SAMPLE_QUANTITY,
            Self::Timestamp => SAMPLE_TIMESTAMP,
            Self::Duration => SAMPLE_DURATION,
            Self::Opaque | Self::StringMap => EMPTY_OBJECT,
            Self::String => "\"\"",
            Self::Boolean => "false",
            Self::Integer => "0",
            Self::Number => "0.0",
        }
    }
}

pub fn is_core_type(name: &str) -> bool {
    CORE_TYPES.contains(&name)
}

/// Returns the literal for a property, or [`None`] if its children have to be expanded instead.
///
/// `explicit` is a default value declared by the schema, already serialized.
pub fn synthesize(
    name: &str,
    explicit: Option<String>,
    kind: Option<LeafKind>,
    config: &Config,
) -> Option<String> {
    if explicit.is_some() {
        return explicit;
    }

    if config.hide_core_types && is_core_type(name) {
        return Some(EMPTY_OBJECT.to_owned());
    }

    kind.map(|kind| kind.literal().to_owned())
}

/// Well-known compute resource maps. Their schemas are untyped maps, so the example entries are
/// synthesized based on the description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourcePreset {
    Requests,
    Limits,
}

impl ResourcePreset {
    pub fn detect(description: &str) -> Option<Self> {
        if description.contains(REQUESTS_DESCRIPTION) {
            Some(Self::Requests)
        } else if description.contains(LIMITS_DESCRIPTION) {
            Some(Self::Limits)
        } else {
            None
        }
    }

    pub fn properties(self, comment: &[String]) -> Vec<Prop> {
        let (cpu, memory) = match self {
            Self::Requests => ("\"500m\"", "\"1Gi\""),
            Self::Limits => ("\"750m\"", "\"2Gi\""),
        };

        vec![
            Prop::scalar("cpu", cpu).with_comment(comment.to_vec()),
            Prop::scalar("memory", memory).with_comment(comment.to_vec()),
        ]
    }
}
