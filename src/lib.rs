//! # Module Metadata Library
//!
//! This library provides an in-memory object model for software-module
//! metadata ("modulemd" documents) and a YAML codec that converts it to and
//! from the modulemd wire format without loss. It is used by the `modulemd`
//! command-line tool and can be embedded by package-build and repository
//! tools that need structured module descriptions.
//!
//! ## Quick Example
//!
//! ```
//! use modulemd::{emit_to_text, parse_from_text, Dependencies, ModuleDocument};
//!
//! let mut module = ModuleDocument::new(2);
//! module.set_name(Some("testmodule"));
//! module.set_stream(Some("master"));
//! module.set_summary(Some("Test"));
//! module.set_description(Some("A test module."));
//! module.module_licenses_mut().add("MIT");
//!
//! let mut deps = Dependencies::new();
//! deps.add_buildrequires("platform", ["f28"]);
//! module.add_dependencies(&deps);
//!
//! let yaml = emit_to_text(&[module.clone()]).unwrap();
//! assert!(yaml.starts_with("document: modulemd\nversion: 2\ndata:\n"));
//!
//! let parsed = parse_from_text(&yaml).unwrap();
//! assert_eq!(parsed, vec![module]);
//! ```
//!
//! ## Core Concepts
//!
//! - **String sets (`string_set`)**: deduplicated, lexicographically ordered
//!   sets used for licenses and stream names.
//! - **Dependencies (`dependencies`)**: module-to-streams maps with
//!   merge-on-insert, paired as `buildrequires` and `requires`.
//! - **Documents (`document`)**: the `ModuleDocument` record and its
//!   mandatory-field validation.
//! - **Codec (`yaml`)**: the emitter and parser for the YAML wire format,
//!   including multi-document streams.
//!
//! Every type owns its data. Copies are deep, so mutating one document never
//! affects another.

pub mod dependencies;
pub mod document;
pub mod error;
pub mod output;
pub mod string_set;
pub mod yaml;

#[cfg(test)]
mod codec_proptest;

pub use dependencies::{Dependencies, DependencyMap};
pub use document::{ModuleDocument, MD_VERSION_1, MD_VERSION_2, MD_VERSION_LATEST};
pub use error::{Error, ErrorKind, Result};
pub use string_set::StringSet;
pub use yaml::{emit_to_file, emit_to_text, parse_from_file, parse_from_text, Emitter};
