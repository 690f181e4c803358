use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::{ArgAction, Parser};
use snafu::{ResultExt, Snafu};
use stackable_example_gen::{
    config::{Config, DEFAULT_COMMENT_PADDING, Format, ParseFormatError},
    crd, logging,
    prop::Document,
    render, source,
};

const APP_NAME: &str = "example-gen";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to open CRD file {path}", path = path.display()))]
    OpenCrdFile { source: io::Error, path: PathBuf },

    #[snafu(display("failed to build example from CRD"))]
    Crd { source: crd::Error },

    #[snafu(display("failed to build example from Rust sources"))]
    Source { source: source::Error },

    #[snafu(display("failed to render example"))]
    Render { source: render::Error },

    #[snafu(display("failed to write to stdout"))]
    WriteStdout { source: io::Error },
}

/// Generates a commented YAML example for a custom resource.
///
/// The schema is read from a CustomResourceDefinition (given as file or on stdin), or from the
/// Rust type declarations of a package if both --pkg and --type are set.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about)]
struct Opts {
    /// CustomResourceDefinition in YAML or JSON format. Read from stdin if not set.
    crd_file: Option<PathBuf>,

    /// Directory of the Rust source files declaring the type given by --type.
    #[arg(long, env = "EXAMPLE_GEN_PKG")]
    pkg: Option<PathBuf>,

    /// Name of the type in the package given by --pkg.
    #[arg(long = "type", env = "EXAMPLE_GEN_TYPE")]
    type_name: Option<String>,

    /// Output format, either "oneline" or "multiline".
    #[arg(long, env = "EXAMPLE_GEN_FORMAT", default_value = "oneline")]
    format: String,

    /// The column comments are aligned at in the oneline format.
    #[arg(long, env = "EXAMPLE_GEN_PADDING", default_value_t = DEFAULT_COMMENT_PADDING)]
    padding: usize,

    /// Collapse tolerations and affinities into `{}`.
    #[arg(
        long,
        env = "EXAMPLE_GEN_HIDE_CORE_TYPES",
        default_value_t = true,
        action = ArgAction::Set
    )]
    hide_core_types: bool,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    logging::initialize_logging("EXAMPLE_GEN_LOG", APP_NAME);
    let opts = Opts::parse();

    let format = Format::from_str(&opts.format);
    let config = Config {
        format: format.as_ref().copied().unwrap_or_default(),
        comment_padding: opts.padding,
        hide_core_types: opts.hide_core_types,
    };

    let document = build_document(&opts, &config)?;
    let mut stdout = io::stdout().lock();

    write_output(&mut stdout, &document, format, &opts.format, &config)?;
    stdout.flush().context(WriteStdoutSnafu)
}

/// Writes the rendered example, or a notice naming the requested format if it is unknown.
fn write_output<W: Write>(
    writer: &mut W,
    document: &Document,
    format: Result<Format, ParseFormatError>,
    requested_format: &str,
    config: &Config,
) -> Result<(), Error> {
    if let Err(error) = format {
        tracing::debug!(%error, requested_format, "unknown output format");
        return writeln!(writer, "invalid format: {requested_format}").context(WriteStdoutSnafu);
    }

    render::write_document(writer, document, config).context(RenderSnafu)
}

fn build_document(opts: &Opts, config: &Config) -> Result<Document, Error> {
    if let (Some(pkg), Some(type_name)) = (&opts.pkg, &opts.type_name) {
        tracing::info!(package = %pkg.display(), %type_name, "reading Rust sources");
        return source::from_package(pkg, type_name, config).context(SourceSnafu);
    }

    if opts.pkg.is_some() || opts.type_name.is_some() {
        tracing::warn!("both --pkg and --type are required to read Rust sources, reading a CRD instead");
    }

    match &opts.crd_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading CRD file");
            let file = File::open(path).context(OpenCrdFileSnafu { path })?;
            crd::from_reader(BufReader::new(file), config)
        }
        None => {
            tracing::info!("reading CRD from stdin");
            crd::from_reader(io::stdin().lock(), config)
        }
    }
    .context(CrdSnafu)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rstest::rstest;
    use stackable_example_gen::prop::Prop;

    use super::*;

    #[test]
    fn verify_command() {
        Opts::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let opts = Opts::try_parse_from(["example-gen"]).expect("no arguments are required");

        assert_eq!(opts.crd_file, None);
        assert_eq!(opts.pkg, None);
        assert_eq!(opts.type_name, None);
        assert_eq!(opts.format, "oneline");
        assert_eq!(opts.padding, 40);
        assert!(opts.hide_core_types);
    }

    #[test]
    fn all_options() {
        let opts = Opts::try_parse_from([
            "example-gen",
            "--pkg",
            "src/crd",
            "--type",
            "ClusterSpec",
            "--format",
            "multiline",
            "--padding",
            "20",
            "--hide-core-types",
            "false",
        ])
        .expect("all options must parse");

        assert_eq!(opts.pkg, Some(PathBuf::from("src/crd")));
        assert_eq!(opts.type_name.as_deref(), Some("ClusterSpec"));
        assert_eq!(opts.format, "multiline");
        assert_eq!(opts.padding, 20);
        assert!(!opts.hide_core_types);
    }

    #[test]
    fn crd_file() {
        let opts = Opts::try_parse_from(["example-gen", "deploy/crds/widget.yaml"])
            .expect("the CRD file is positional");
        assert_eq!(opts.crd_file, Some(PathBuf::from("deploy/crds/widget.yaml")));
    }

    #[rstest]
    #[case(&["example-gen", "--padding", "wide"])]
    #[case(&["example-gen", "--padding", "-1"])]
    #[case(&["example-gen", "--hide-core-types"])]
    #[case(&["example-gen", "--hide-core-types", "maybe"])]
    #[case(&["example-gen", "a.yaml", "b.yaml"])]
    fn invalid_arguments(#[case] args: &[&str]) {
        assert!(Opts::try_parse_from(args).is_err());
    }

    #[test]
    fn unknown_format_is_accepted() {
        let opts = Opts::try_parse_from(["example-gen", "--format", "json"])
            .expect("the format is validated after parsing");
        assert!(Format::from_str(&opts.format).is_err());
    }

    fn document() -> Document {
        Document {
            header: Vec::new(),
            body: Prop::properties("", vec![Prop::scalar("size", "\"\"")]),
        }
    }

    #[rstest]
    #[case("json", "invalid format: json\n")]
    #[case("Oneline", "invalid format: Oneline\n")]
    #[case("oneline", "size: \"\"\n")]
    #[case("multiline", "size: \"\"\n")]
    fn output_for_requested_format(#[case] requested: &str, #[case] expected: &str) {
        let format = Format::from_str(requested);
        let config = Config {
            format: format.as_ref().copied().unwrap_or_default(),
            ..Config::default()
        };

        let mut output = Vec::new();
        write_output(&mut output, &document(), format, requested, &config)
            .expect("writing into a buffer must succeed");
        assert_eq!(String::from_utf8_lossy(&output), expected);
    }
}
