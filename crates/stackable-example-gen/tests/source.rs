use std::fs;

use indoc::indoc;
use rstest::rstest;
use stackable_example_gen::{
    config::{Config, Format},
    render, source,
};

const WIDGET_SOURCE: &str = indoc! {r#"
    use std::collections::BTreeMap;

    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use serde::{Deserialize, Serialize};

    /// Spec of a widget.
    #[derive(Clone, Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WidgetSpec {
        /// Number of replicas.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub replicas: Option<u16>,

        pub resources: Resources,

        /// Whether the widget is enabled.
        pub enabled: bool,

        #[serde(flatten)]
        pub common: CommonConfig,

        #[serde(skip)]
        pub cache: Vec<u8>,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct CommonConfig {
        /// Labels added to every object.
        pub extra_labels: BTreeMap<String, String>,
    }
"#};

const RESOURCES_SOURCE: &str = indoc! {r#"
    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct Resources {
        /// Limits describes the maximum amount of compute resources allowed.
        ///
        /// +optional
        pub limits: BTreeMap<String, Quantity>,
    }
"#};

const ONELINE: &str = indoc! {r#"
    enabled: false                           # Whether the widget is enabled.
    extra_labels: {}                         # Labels added to every object.
    replicas: 0                              # Number of replicas.
    resources:
      limits:                                # Limits describes the maximum amount of compute resources allowed.
        cpu: "750m"
        memory: "2Gi"
"#};

const MULTILINE: &str = indoc! {r#"

    # Whether the widget is enabled.
    enabled: false

    # Labels added to every object.
    extra_labels: {}

    # Number of replicas.
    replicas: 0
    resources:

      # Limits describes the maximum amount of compute resources allowed.
      limits:
        cpu: "750m"
        memory: "2Gi"
"#};

#[rstest]
#[case(Format::Oneline, ONELINE)]
#[case(Format::Multiline, MULTILINE)]
fn widget(#[case] format: Format, #[case] expected: &str) {
    let package = tempfile::tempdir().expect("temporary directory must be created");
    fs::create_dir(package.path().join("crd")).expect("directory must be created");
    fs::write(package.path().join("lib.rs"), WIDGET_SOURCE).expect("source must be written");
    fs::write(package.path().join("crd/resources.rs"), RESOURCES_SOURCE)
        .expect("source must be written");

    let config = Config {
        format,
        ..Config::default()
    };
    let document =
        source::from_package(package.path(), "WidgetSpec", &config).expect("document must build");

    let output = render::render_to_string(&document, &config).expect("rendering must succeed");
    assert_eq!(output, expected);
}

#[test]
fn unknown_type() {
    let package = tempfile::tempdir().expect("temporary directory must be created");
    fs::write(package.path().join("lib.rs"), WIDGET_SOURCE).expect("source must be written");

    let error = source::from_package(package.path(), "GadgetSpec", &Config::default())
        .expect_err("unknown types must fail");
    assert_eq!(
        error.to_string(),
        format!(
            "type \"GadgetSpec\" is not declared in package {}",
            package.path().display()
        )
    );
}
