//! Builds example custom resources from a `CustomResourceDefinition`.
//!
//! The first version listed in the CRD is used. `apiVersion`, `kind` and `metadata` are not taken
//! from the schema, but filled with the real values of the CRD (and a placeholder name).
use std::{collections::BTreeMap, io::Read};

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::{
    config::Config,
    defaults::{self, LeafKind, ResourcePreset},
    prop::{Document, Prop, PropValue},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to read CRD input"))]
    ReadInput { source: std::io::Error },

    #[snafu(display("the input does not contain a YAML or JSON document"))]
    NoDocument,

    #[snafu(display("failed to deserialize CRD from YAML or JSON"))]
    DeserializeCrd { source: serde_yaml::Error },

    #[snafu(display("the CRD does not declare any versions"))]
    NoVersions,

    #[snafu(display("version {version:?} of the CRD has no OpenAPI v3 schema"))]
    MissingSchema { version: String },
}

/// Reads a CRD in YAML or JSON format from `reader` and builds the example document for it.
pub fn from_reader<R: Read>(mut reader: R, config: &Config) -> Result<Document> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context(ReadInputSnafu)?;

    from_str(&input, config)
}

/// Parses a CRD in YAML or JSON format and builds the example document for it.
///
/// Only the first document of a multi-document YAML stream is used.
pub fn from_str(input: &str, config: &Config) -> Result<Document> {
    let document = serde_yaml::Deserializer::from_str(input)
        .next()
        .context(NoDocumentSnafu)?;
    let crd = CustomResourceDefinition::deserialize(document).context(DeserializeCrdSnafu)?;

    build_document(crd, config)
}

pub fn build_document(crd: CustomResourceDefinition, config: &Config) -> Result<Document> {
    let spec = crd.spec;
    let version = spec.versions.into_iter().next().context(NoVersionsSnafu)?;
    let version_name = version.name;

    let mut schema = version
        .schema
        .and_then(|validation| validation.open_api_v3_schema)
        .with_context(|| MissingSchemaSnafu {
            version: version_name.clone(),
        })?;

    tracing::debug!(
        group = %spec.group,
        version = %version_name,
        kind = %spec.names.kind,
        "building example from CRD"
    );

    let mut properties = schema.properties.take().unwrap_or_default();
    let api_version_comment = take_description(&mut properties, "apiVersion");
    let kind_comment = take_description(&mut properties, "kind");
    properties.remove("metadata");
    schema.properties = Some(properties);

    let header = vec![
        Prop::scalar("apiVersion", format!("{}/{version_name}", spec.group))
            .with_comment(api_version_comment),
        Prop::scalar("kind", spec.names.kind).with_comment(kind_comment),
        Prop::properties("metadata", vec![Prop::scalar("name", defaults::METADATA_NAME)]),
    ];

    Ok(Document {
        header,
        body: Prop::new("", build_value(&schema, config)),
    })
}

/// Removes the property `name` and returns its description.
fn take_description(properties: &mut BTreeMap<String, JSONSchemaProps>, name: &str) -> Vec<String> {
    properties
        .remove(name)
        .map(|schema| description_lines(&schema))
        .unwrap_or_default()
}

/// Builds the property `name` described by `schema`.
fn build_prop(name: &str, schema: &JSONSchemaProps, config: &Config) -> Prop {
    let value = match defaults::synthesize(name, explicit_default(schema), leaf_kind(schema), config) {
        Some(literal) => PropValue::Scalar(literal),
        None => build_value(schema, config),
    };

    Prop {
        key: name.to_owned(),
        comment: description_lines(schema),
        value,
    }
}

/// Expands the children of a node which could not be rendered as a literal.
fn build_value(schema: &JSONSchemaProps, config: &Config) -> PropValue {
    match schema.type_.as_deref() {
        Some("object") => {
            let properties = schema
                .properties
                .as_ref()
                .filter(|properties| !properties.is_empty());

            if let Some(properties) = properties {
                PropValue::Properties(
                    properties
                        .iter()
                        .map(|(name, member)| build_prop(name, member, config))
                        .collect(),
                )
            } else if let Some(JSONSchemaPropsOrBool::Schema(value_schema)) =
                &schema.additional_properties
            {
                PropValue::Properties(build_map_entries(schema, value_schema, config))
            } else {
                PropValue::Properties(Vec::new())
            }
        }
        Some("array") => match item_schema(schema) {
            Some(item) => PropValue::ListItem(Box::new(build_prop("", item, config))),
            None => {
                tracing::debug!("array schema without items, leaving it empty");
                PropValue::Properties(Vec::new())
            }
        },
        _ => PropValue::Properties(Vec::new()),
    }
}

/// Builds the example entries of a map, i.e. an object with `additionalProperties`.
fn build_map_entries(
    schema: &JSONSchemaProps,
    value_schema: &JSONSchemaProps,
    config: &Config,
) -> Vec<Prop> {
    let value_comment = description_lines(value_schema);
    let description = schema.description.as_deref().unwrap_or_default();

    if let Some(preset) = ResourcePreset::detect(description) {
        return preset.properties(&value_comment);
    }

    let entry = match defaults::synthesize(
        "",
        explicit_default(value_schema),
        leaf_kind(value_schema),
        config,
    ) {
        Some(literal) => Prop::scalar(defaults::MAP_KEY, literal).with_comment(value_comment),
        None => Prop::new(defaults::MAP_KEY, build_value(value_schema, config)),
    };

    vec![entry]
}

/// Classifies nodes which are rendered as a literal, see [`LeafKind`] for the priority.
fn leaf_kind(schema: &JSONSchemaProps) -> Option<LeafKind> {
    let type_ = schema.type_.as_deref();

    if schema.x_kubernetes_int_or_string == Some(true) {
        return Some(LeafKind::Quantity);
    }
    if schema.format.as_deref() == Some("date-time") {
        return Some(LeafKind::Timestamp);
    }
    if schema.x_kubernetes_preserve_unknown_fields == Some(true) {
        return Some(LeafKind::Opaque);
    }
    if type_ == Some("object") && is_string_map(schema) {
        return Some(LeafKind::StringMap);
    }

    match type_? {
        "string" => Some(LeafKind::String),
        "boolean" => Some(LeafKind::Boolean),
        "integer" => Some(LeafKind::Integer),
        "number" => Some(LeafKind::Number),
        _ => None,
    }
}

fn is_string_map(schema: &JSONSchemaProps) -> bool {
    matches!(
        &schema.additional_properties,
        Some(JSONSchemaPropsOrBool::Schema(value_schema))
            if value_schema.type_.as_deref() == Some("string")
    )
}

fn explicit_default(schema: &JSONSchemaProps) -> Option<String> {
    schema.default.as_ref().map(|default| default.0.to_string())
}

fn item_schema(schema: &JSONSchemaProps) -> Option<&JSONSchemaProps> {
    match schema.items.as_ref()? {
        JSONSchemaPropsOrArray::Schema(item) => Some(item),
        JSONSchemaPropsOrArray::Schemas(items) => items.first(),
    }
}

fn description_lines(schema: &JSONSchemaProps) -> Vec<String> {
    schema
        .description
        .as_deref()
        .map(|description| description.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}
