//! Module document emitter
//!
//! The [`Emitter`] walks [`ModuleDocument`] values and drives an
//! [`EventWriter`] through the fixed modulemd layout:
//!
//! ```text
//! document: modulemd
//! version: <mdversion>
//! data:
//!   name / stream / version     (only when set)
//!   summary                     (mandatory)
//!   description                 (mandatory, folded)
//!   license: module / content   (module mandatory)
//!   dependencies                (only when present)
//! ```
//!
//! The stream is opened by the first document and closed by
//! [`Emitter::finish`]. Any error leaves the emitter unusable; documents
//! already handed to the sink stay there, the failing one never does.

use std::io::Write;

use log::{debug, trace};

use super::events::{Event, EventWriter};
use crate::dependencies::{Dependencies, DependencyMap};
use crate::document::{is_supported_mdversion, ModuleDocument};
use crate::error::{Error, Result};
use crate::string_set::StringSet;

/// Writes module documents as one YAML stream
///
/// # Examples
///
/// ```
/// use modulemd::{Emitter, ModuleDocument};
///
/// let mut module = ModuleDocument::new(2);
/// module.set_summary(Some("Test"));
/// module.set_description(Some("A test module."));
/// module.module_licenses_mut().add("MIT");
///
/// let mut emitter = Emitter::new(Vec::new());
/// emitter.emit_document(&module)?;
/// let yaml = String::from_utf8(emitter.finish()?).unwrap();
///
/// assert!(yaml.starts_with("document: modulemd\nversion: 2\n"));
/// # Ok::<_, modulemd::Error>(())
/// ```
#[derive(Debug)]
pub struct Emitter<W: Write> {
    events: EventWriter<W>,
    failed: bool,
}

impl<W: Write> Emitter<W> {
    /// Create an emitter writing to `sink`
    pub fn new(sink: W) -> Self {
        Self {
            events: EventWriter::new(sink),
            failed: false,
        }
    }

    /// Emit every document of `modules` in order.
    pub fn emit_all(&mut self, modules: &[ModuleDocument]) -> Result<()> {
        for module in modules {
            self.emit_document(module)?;
        }
        Ok(())
    }

    /// Emit one document, opening the stream first if needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when a mandatory field is missing, or an
    /// emit/I/O error from the underlying writer.
    pub fn emit_document(&mut self, module: &ModuleDocument) -> Result<()> {
        if self.failed {
            return Err(Error::emit("Emitter is unusable after an earlier error"));
        }
        let result = self.write_document(module);
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    /// Close the stream and give back the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.failed {
            return Err(Error::emit("Emitter is unusable after an earlier error"));
        }
        if !self.events.in_stream() {
            self.events.emit(Event::StreamStart)?;
        }
        self.events.emit(Event::StreamEnd)?;
        Ok(self.events.into_inner())
    }

    fn write_document(&mut self, module: &ModuleDocument) -> Result<()> {
        if !self.events.in_stream() {
            self.events.emit(Event::StreamStart)?;
        }
        let index = self.events.documents_written();
        trace!("Emitting document {}", index + 1);

        if !is_supported_mdversion(module.mdversion()) {
            return Err(Error::validation("version"));
        }

        self.events.emit(Event::DocumentStart)?;
        self.emit_root(module)?;
        self.events.emit(Event::DocumentEnd)?;

        debug!(
            "Emitted document {} ({})",
            index + 1,
            module.name().unwrap_or("<unnamed>")
        );
        Ok(())
    }

    fn emit_root(&mut self, module: &ModuleDocument) -> Result<()> {
        self.events.emit(Event::MappingStart)?;

        self.emit_pair("document", Event::plain("modulemd"))?;

        let mdversion = module.mdversion().to_string();
        self.emit_pair("version", Event::plain(&mdversion))?;

        self.events.emit(Event::plain("data"))?;
        self.emit_data(module)?;

        self.events.emit(Event::MappingEnd)
    }

    fn emit_data(&mut self, module: &ModuleDocument) -> Result<()> {
        self.events.emit(Event::MappingStart)?;

        if let Some(name) = module.name() {
            self.emit_pair("name", Event::scalar(name))?;
        }

        if let Some(stream) = module.stream() {
            self.emit_pair("stream", Event::scalar(stream))?;
        }

        if module.version() != 0 {
            let version = module.version().to_string();
            self.emit_pair("version", Event::plain(&version))?;
        }

        let summary = module
            .summary()
            .ok_or_else(|| Error::validation("data.summary"))?;
        self.emit_pair("summary", Event::scalar(summary))?;

        let description = module
            .description()
            .ok_or_else(|| Error::validation("data.description"))?;
        self.emit_pair("description", Event::folded(description))?;

        self.emit_licenses(module)?;

        if !module.dependencies().is_empty() {
            self.emit_dependencies(module.dependencies())?;
        }

        self.events.emit(Event::MappingEnd)
    }

    fn emit_licenses(&mut self, module: &ModuleDocument) -> Result<()> {
        self.events.emit(Event::plain("license"))?;
        self.events.emit(Event::MappingStart)?;

        let module_licenses = module
            .module_licenses()
            .ok_or_else(|| Error::validation("data.license.module"))?;
        self.events.emit(Event::plain("module"))?;
        self.emit_string_set(module_licenses)?;

        if let Some(content_licenses) = module.content_licenses() {
            self.events.emit(Event::plain("content"))?;
            self.emit_string_set(content_licenses)?;
        }

        self.events.emit(Event::MappingEnd)
    }

    fn emit_dependencies(&mut self, dependencies: &[Dependencies]) -> Result<()> {
        self.events.emit(Event::plain("dependencies"))?;
        self.events.emit(Event::SequenceStart)?;

        for deps in dependencies {
            self.events.emit(Event::MappingStart)?;
            if !deps.buildrequires().is_empty() {
                self.events.emit(Event::plain("buildrequires"))?;
                self.emit_dependency_map(deps.buildrequires())?;
            }
            if !deps.requires().is_empty() {
                self.events.emit(Event::plain("requires"))?;
                self.emit_dependency_map(deps.requires())?;
            }
            self.events.emit(Event::MappingEnd)?;
        }

        self.events.emit(Event::SequenceEnd)
    }

    fn emit_dependency_map(&mut self, map: &DependencyMap) -> Result<()> {
        self.events.emit(Event::MappingStart)?;
        for (module, streams) in map {
            self.events.emit(Event::scalar(module))?;
            self.emit_string_set(streams)?;
        }
        self.events.emit(Event::MappingEnd)
    }

    fn emit_string_set(&mut self, set: &StringSet) -> Result<()> {
        self.events.emit(Event::SequenceStart)?;
        for value in set {
            self.events.emit(Event::scalar(value))?;
        }
        self.events.emit(Event::SequenceEnd)
    }

    fn emit_pair(&mut self, key: &str, value: Event<'_>) -> Result<()> {
        self.events.emit(Event::plain(key))?;
        self.events.emit(value)
    }
}
