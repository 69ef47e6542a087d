//! # YAML Codec
//!
//! Converts batches of [`ModuleDocument`] values to and from the modulemd YAML
//! wire format.
//!
//! - [`emit_to_text`] / [`emit_to_file`] write one YAML document per module
//!   inside a single stream.
//! - [`parse_from_text`] / [`parse_from_file`] read every document of a stream
//!   back, in order.
//!
//! Emitting validates the whole batch before any output is produced, so a
//! document with a missing mandatory field never creates or truncates the
//! target file. Only a failure of the file itself while writing can leave
//! partial output behind; it is reported as an error and the file is left as
//! it is.
//!
//! ## Example
//!
//! ```
//! use modulemd::{emit_to_text, parse_from_text, ModuleDocument};
//!
//! let mut module = ModuleDocument::new(2);
//! module.set_name(Some("testmodule"));
//! module.set_stream(Some("master"));
//! module.set_summary(Some("Test"));
//! module.set_description(Some("A test module."));
//! module.module_licenses_mut().add("MIT");
//!
//! let yaml = emit_to_text(&[module.clone()]).unwrap();
//! let parsed = parse_from_text(&yaml).unwrap();
//! assert_eq!(parsed, vec![module]);
//! ```

pub mod emitter;
pub mod events;
pub mod parser;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::debug;

use crate::document::ModuleDocument;
use crate::error::{Error, Result};
pub use emitter::Emitter;

/// Check every document before any output is produced.
fn validate_batch(modules: &[ModuleDocument]) -> Result<()> {
    for module in modules {
        module.validate()?;
    }
    Ok(())
}

/// Emit `modules` as a YAML stream into the file at `path`.
///
/// The file is created or truncated only after the whole batch validates, and
/// is closed before this function returns on every path.
///
/// # Errors
///
/// - `Error::Validation` if any document lacks a mandatory field; the file is
///   not touched.
/// - `Error::Open` if the file cannot be created.
/// - `Error::Io` if writing fails part way; the file may hold partial output.
pub fn emit_to_file<P: AsRef<Path>>(modules: &[ModuleDocument], path: P) -> Result<()> {
    let path = path.as_ref();
    debug!(
        "Emitting {} module document(s) to {}",
        modules.len(),
        path.display()
    );

    validate_batch(modules)?;

    let file = File::create(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut emitter = Emitter::new(BufWriter::new(file));
    emitter.emit_all(modules)?;
    let writer = emitter.finish()?;
    writer.into_inner().map_err(|err| Error::Io(err.into_error()))?;

    Ok(())
}

/// Emit `modules` as a YAML stream and return the text.
///
/// # Errors
///
/// `Error::Validation` if any document lacks a mandatory field.
pub fn emit_to_text(modules: &[ModuleDocument]) -> Result<String> {
    debug!("Emitting {} module document(s) to text", modules.len());

    validate_batch(modules)?;

    let mut emitter = Emitter::new(Vec::new());
    emitter.emit_all(modules)?;
    let bytes = emitter.finish()?;

    String::from_utf8(bytes).map_err(|err| Error::emit(format!("Emitted YAML is not UTF-8: {}", err)))
}

/// Parse every module document in the file at `path`.
///
/// # Errors
///
/// `Error::Open` if the file cannot be read, `Error::Parse` if its contents
/// are not UTF-8, otherwise as [`parse_from_text`].
pub fn parse_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ModuleDocument>> {
    let path = path.as_ref();
    debug!("Parsing module documents from {}", path.display());

    let bytes = fs::read(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml = String::from_utf8(bytes).map_err(|err| {
        Error::parse(format!("{} is not valid UTF-8: {}", path.display(), err))
    })?;

    parser::parse_documents(&yaml)
}

/// Parse every module document in `yaml`, in stream order.
///
/// # Errors
///
/// `Error::Yaml` for malformed YAML, `Error::Parse` for documents that break
/// the modulemd schema or lack a mandatory field.
pub fn parse_from_text(yaml: &str) -> Result<Vec<ModuleDocument>> {
    debug!("Parsing module documents from text ({} bytes)", yaml.len());
    parser::parse_documents(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::Dependencies;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn sample(name: &str) -> ModuleDocument {
        let mut module = ModuleDocument::new(2);
        module.set_name(Some(name));
        module.set_stream(Some("master"));
        module.set_summary(Some("Test"));
        module.set_description(Some("A test module."));
        module.module_licenses_mut().add("MIT");
        module
    }

    #[test]
    fn test_testmodule_emits_exact_text() {
        let mut module = ModuleDocument::new(2);
        module.set_name(Some("testmodule"));
        module.set_stream(Some("master"));
        module.set_summary(Some("Test"));
        module.set_description(Some("A test module."));
        module.module_licenses_mut().add("MIT");

        let yaml = emit_to_text(&[module.clone()]).unwrap();
        insta::assert_snapshot!(&yaml, @r"
        document: modulemd
        version: 2
        data:
          name: testmodule
          stream: master
          summary: Test
          description: >
            A test module.
          license:
            module:
              - MIT
        ");

        assert_eq!(parse_from_text(&yaml).unwrap(), vec![module]);
    }

    #[test]
    fn test_round_trip_full_document() {
        let mut module = sample("perl");
        module.set_version(20180205135154);
        module.set_description(Some(
            "Perl is a high-level programming language.\nIt borrows features from C.\n\nMore text.",
        ));
        module.content_licenses_mut().union_from(["GPL+", "Artistic"]);

        let mut deps = Dependencies::new();
        deps.add_buildrequires("platform", ["f28"]);
        deps.add_requires("platform", ["f28", "f29"]);
        module.add_dependencies(&deps);

        let batch = vec![module];
        let yaml = emit_to_text(&batch).unwrap();
        assert_eq!(parse_from_text(&yaml).unwrap(), batch);
    }

    #[test]
    fn test_long_dependency_name_round_trips() {
        let long_name = "perl-".repeat(220);
        let mut deps = Dependencies::new();
        deps.add_requires(&long_name, ["5.26"]);

        let mut module = sample("perl");
        module.add_dependencies(&deps);

        let batch = vec![module];
        let yaml = emit_to_text(&batch).unwrap();
        assert!(yaml.contains(&format!("? {}\n", long_name)));
        assert_eq!(parse_from_text(&yaml).unwrap(), batch);
    }

    #[test]
    fn test_batch_order_is_preserved() {
        let batch = vec![sample("a"), sample("b"), sample("c")];
        let yaml = emit_to_text(&batch).unwrap();
        assert_eq!(yaml.matches("---\n").count(), 2);

        let parsed = parse_from_text(&yaml).unwrap();
        let names: Vec<_> = parsed.iter().map(|m| m.name().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(parsed, batch);
    }

    #[test]
    fn test_validation_failure_aborts_batch() {
        let mut bad = sample("b");
        bad.set_description(None);
        let err = emit_to_text(&[sample("a"), bad]).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.kind(), ErrorKind::Emit);
    }

    #[test]
    fn test_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modules.yaml");
        let batch = vec![sample("a"), sample("b")];

        emit_to_file(&batch, &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            emit_to_text(&batch).unwrap()
        );
        assert_eq!(parse_from_file(&path).unwrap(), batch);
    }

    #[test]
    fn test_validation_failure_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modules.yaml");
        fs::write(&path, "previous contents\n").unwrap();

        let mut bad = sample("b");
        bad.set_summary(None);
        assert!(emit_to_file(&[sample("a"), bad.clone()], &path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous contents\n");

        let fresh = temp.path().join("fresh.yaml");
        assert!(emit_to_file(&[bad], &fresh).is_err());
        assert!(!fresh.exists());
    }

    #[test]
    fn test_open_errors() {
        let temp = TempDir::new().unwrap();
        let missing_dir = temp.path().join("missing").join("out.yaml");

        let err = emit_to_file(&[sample("a")], &missing_dir).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Open);

        let err = parse_from_file(temp.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Open);
    }
}
