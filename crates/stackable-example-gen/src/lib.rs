//! Generates commented YAML examples for Kubernetes custom resources.
//!
//! Examples are produced in two steps. A normalizer reads a schema, either a
//! `CustomResourceDefinition` ([`crd`]) or Rust type declarations ([`source`]), and turns it into
//! a [`Document`](prop::Document), a tree of properties with synthesized example values. The
//! [`render`] module then writes the document as YAML, with the property descriptions as
//! comments.
//!
//! ```
//! use stackable_example_gen::{config::Config, crd, render};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = r#"
//! apiVersion: apiextensions.k8s.io/v1
//! kind: CustomResourceDefinition
//! metadata:
//!   name: widgets.example.com
//! spec:
//!   group: example.com
//!   names:
//!     kind: Widget
//!     plural: widgets
//!   scope: Namespaced
//!   versions:
//!   - name: v1
//!     served: true
//!     storage: true
//!     schema:
//!       openAPIV3Schema:
//!         type: object
//!         properties:
//!           size:
//!             type: string
//! "#;
//!
//! let config = Config::default();
//! let document = crd::from_str(input, &config)?;
//! let example = render::render_to_string(&document, &config)?;
//! assert_eq!(example, "apiVersion: example.com/v1\nkind: Widget\nmetadata:\n  name: example\nsize: \"\"\n");
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod crd;
pub mod defaults;
pub mod logging;
pub mod prop;
pub mod render;
pub mod source;
