//! # Module Documents
//!
//! [`ModuleDocument`] is the aggregate the codec reads and writes: one YAML
//! document describing a single module. It carries the schema version
//! (`mdversion`), the module's identity (`name`, `stream`, `version`), the
//! mandatory `summary` and `description`, its license sets, and any number of
//! [`Dependencies`] blocks.
//!
//! Fields are private and reached through typed accessors. The document owns
//! every set and dependency block it holds; setters take ownership or copy.
//!
//! ## Mandatory Fields
//!
//! A document can be built up incrementally, so mandatory fields may be absent
//! in memory. [`ModuleDocument::validate`] reports the first missing one; the
//! emitter refuses to write a document that does not validate.

use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use crate::string_set::StringSet;

/// First modulemd schema version
pub const MD_VERSION_1: u64 = 1;

/// Second modulemd schema version, sharing the `data` layout of version 1
pub const MD_VERSION_2: u64 = 2;

/// The newest schema version this crate reads and writes
pub const MD_VERSION_LATEST: u64 = MD_VERSION_2;

/// Whether `mdversion` is a schema version this crate understands
pub fn is_supported_mdversion(mdversion: u64) -> bool {
    (MD_VERSION_1..=MD_VERSION_LATEST).contains(&mdversion)
}

/// Metadata for a single module stream
///
/// # Examples
///
/// ```
/// use modulemd::{ModuleDocument, StringSet};
///
/// let mut module = ModuleDocument::new(2);
/// module.set_name(Some("testmodule"));
/// module.set_summary(Some("Test"));
/// module.set_description(Some("A test module."));
/// module.set_module_licenses(Some(["MIT"].into_iter().collect()));
///
/// assert!(module.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDocument {
    mdversion: u64,
    name: Option<String>,
    stream: Option<String>,
    version: u64,
    summary: Option<String>,
    description: Option<String>,
    module_licenses: Option<StringSet>,
    content_licenses: Option<StringSet>,
    dependencies: Vec<Dependencies>,
}

impl ModuleDocument {
    /// Create an empty document for schema version `mdversion`
    pub fn new(mdversion: u64) -> Self {
        Self {
            mdversion,
            ..Self::default()
        }
    }

    pub fn mdversion(&self) -> u64 {
        self.mdversion
    }

    pub fn set_mdversion(&mut self, mdversion: u64) {
        self.mdversion = mdversion;
    }

    /// The module name, if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(str::to_string);
    }

    /// The module stream, if set
    pub fn stream(&self) -> Option<&str> {
        self.stream.as_deref()
    }

    pub fn set_stream(&mut self, stream: Option<&str>) {
        self.stream = stream.map(str::to_string);
    }

    /// The module version; zero means unset
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// The short summary, if set
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn set_summary(&mut self, summary: Option<&str>) {
        self.summary = summary.map(str::to_string);
    }

    /// The long description, if set
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set the long description.
    ///
    /// Trailing line breaks are dropped: the folded YAML form does not keep
    /// them apart from a single final newline.
    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = description.map(|text| text.trim_end_matches(['\n', '\r']).to_string());
    }

    /// Licenses covering the module packaging itself
    pub fn module_licenses(&self) -> Option<&StringSet> {
        self.module_licenses.as_ref()
    }

    pub fn module_licenses_mut(&mut self) -> &mut StringSet {
        self.module_licenses.get_or_insert_with(StringSet::new)
    }

    pub fn set_module_licenses(&mut self, licenses: Option<StringSet>) {
        self.module_licenses = licenses;
    }

    /// Licenses covering the content shipped by the module
    pub fn content_licenses(&self) -> Option<&StringSet> {
        self.content_licenses.as_ref()
    }

    pub fn content_licenses_mut(&mut self) -> &mut StringSet {
        self.content_licenses.get_or_insert_with(StringSet::new)
    }

    pub fn set_content_licenses(&mut self, licenses: Option<StringSet>) {
        self.content_licenses = licenses;
    }

    /// Dependency blocks in document order
    pub fn dependencies(&self) -> &[Dependencies] {
        &self.dependencies
    }

    /// Append a copy of `dependencies`
    pub fn add_dependencies(&mut self, dependencies: &Dependencies) {
        let mut copy = None;
        dependencies.copy(&mut copy);
        self.dependencies.extend(copy);
    }

    /// Replace every dependency block with copies of `dependencies`
    pub fn set_dependencies(&mut self, dependencies: &[Dependencies]) {
        self.dependencies = dependencies.to_vec();
    }

    pub fn clear_dependencies(&mut self) {
        self.dependencies.clear();
    }

    /// Check that the document can be emitted.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` naming the first problem found: an
    /// unsupported `version`, or a missing `data.summary`,
    /// `data.description` or `data.license.module`.
    pub fn validate(&self) -> Result<()> {
        if !is_supported_mdversion(self.mdversion) {
            return Err(Error::validation("version"));
        }
        if self.summary.is_none() {
            return Err(Error::validation("data.summary"));
        }
        if self.description.is_none() {
            return Err(Error::validation("data.description"));
        }
        if self.module_licenses.is_none() {
            return Err(Error::validation("data.license.module"));
        }
        Ok(())
    }
}
