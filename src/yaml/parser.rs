//! Module document parser
//!
//! Reads a YAML stream with `serde_yaml` and turns each document into a
//! [`ModuleDocument`]. Mapping keys are dispatched by name, so any key order
//! is accepted. Mandatory fields are checked once a mapping has been read in
//! full.
//!
//! Every scalar the schema treats as text (including mapping keys and list
//! entries) is deserialized as a string, so `serde_yaml` hands over the text
//! exactly as written: `stream: 3.10` stays `"3.10"`.
//!
//! Unknown keys are skipped with a warning, which keeps documents written by
//! newer producers readable.

use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace, warn};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Deserializer;

use crate::dependencies::{Dependencies, DependencyMap};
use crate::document::{ModuleDocument, MD_VERSION_1, MD_VERSION_2};
use crate::error::{Error, Result};
use crate::string_set::StringSet;

/// Parse every module document in `yaml`, in stream order.
///
/// Empty documents are skipped.
///
/// # Errors
///
/// Returns `Error::Yaml` for malformed YAML or values of the wrong shape, and
/// `Error::Parse` for documents that do not follow the modulemd schema. The
/// error names the 1-based document it was found in.
pub fn parse_documents(yaml: &str) -> Result<Vec<ModuleDocument>> {
    let mut modules = Vec::new();

    for (index, document) in Deserializer::from_str(yaml).enumerate() {
        let Some(raw) = Option::<RawDocument>::deserialize(document)? else {
            debug!("Skipping empty document {}", index + 1);
            continue;
        };

        let module = build_document(raw).map_err(|err| match err {
            Error::Parse { message } => Error::parse(format!("document {}: {}", index + 1, message)),
            other => other,
        })?;
        trace!(
            "Parsed document {} ({})",
            index + 1,
            module.name().unwrap_or("<unnamed>")
        );
        modules.push(module);
    }

    Ok(modules)
}

/// A sequence of text entries; `null` entries are kept so they can be reported.
type RawList = Option<Vec<Option<String>>>;

#[derive(Debug, Default)]
struct RawDocument {
    document: Option<String>,
    version: Option<String>,
    data: Option<RawData>,
}

#[derive(Debug, Default)]
struct RawData {
    name: Option<String>,
    stream: Option<String>,
    version: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    license: Option<RawLicense>,
    dependencies: Option<Vec<Option<RawDependencies>>>,
}

/// The outer `Option` records whether the key was present at all.
#[derive(Debug, Default)]
struct RawLicense {
    module: Option<RawList>,
    content: Option<RawList>,
}

#[derive(Debug, Default)]
struct RawDependencies {
    buildrequires: Option<RawDependencyMap>,
    requires: Option<RawDependencyMap>,
}

/// Module name to streams, in document order
#[derive(Debug, Default)]
struct RawDependencyMap(Vec<(String, RawList)>);

/// A mapping with a fixed set of known keys
trait KnownKeys: Default {
    const EXPECTING: &'static str;
    const LOCATION: &'static str;

    /// Read the value for `key`, or return `false` if the key is unknown.
    fn read_value<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> std::result::Result<bool, A::Error>;
}

struct KnownKeysVisitor<T>(PhantomData<T>);

impl<'de, T: KnownKeys> Visitor<'de> for KnownKeysVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(T::EXPECTING)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<T, A::Error> {
        let mut raw = T::default();
        while let Some(key) = map.next_key::<String>()? {
            if !raw.read_value(&key, &mut map)? {
                warn!("Ignoring unknown key \"{}\" {}", key, T::LOCATION);
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(raw)
    }
}

macro_rules! deserialize_known_keys {
    ($($ty:ty),*) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
                where
                    D: de::Deserializer<'de>,
                {
                    deserializer.deserialize_map(KnownKeysVisitor::<Self>(PhantomData))
                }
            }
        )*
    };
}

deserialize_known_keys!(RawDocument, RawData, RawLicense, RawDependencies);

impl KnownKeys for RawDocument {
    const EXPECTING: &'static str = "a mapping for document root";
    const LOCATION: &'static str = "at document root";

    fn read_value<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> std::result::Result<bool, A::Error> {
        match key {
            "document" => self.document = map.next_value()?,
            "version" => self.version = map.next_value()?,
            "data" => self.data = map.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl KnownKeys for RawData {
    const EXPECTING: &'static str = "a mapping for data";
    const LOCATION: &'static str = "in data";

    fn read_value<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> std::result::Result<bool, A::Error> {
        match key {
            "name" => self.name = map.next_value()?,
            "stream" => self.stream = map.next_value()?,
            "version" => self.version = map.next_value()?,
            "summary" => self.summary = map.next_value()?,
            "description" => self.description = map.next_value()?,
            "license" => self.license = map.next_value()?,
            "dependencies" => self.dependencies = map.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl KnownKeys for RawLicense {
    const EXPECTING: &'static str = "a mapping for data.license";
    const LOCATION: &'static str = "in data.license";

    fn read_value<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> std::result::Result<bool, A::Error> {
        match key {
            "module" => self.module = Some(map.next_value()?),
            "content" => self.content = Some(map.next_value()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl KnownKeys for RawDependencies {
    const EXPECTING: &'static str = "a mapping for data.dependencies";
    const LOCATION: &'static str = "in data.dependencies";

    fn read_value<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> std::result::Result<bool, A::Error> {
        match key {
            "buildrequires" => self.buildrequires = map.next_value()?,
            "requires" => self.requires = map.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl<'de> Deserialize<'de> for RawDependencyMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawDependencyMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of module names to stream lists")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RawDependencyMap, A::Error> {
                let mut entries = Vec::new();
                while let Some(module) = map.next_key::<String>()? {
                    let streams: RawList = map.next_value()?;
                    entries.push((module, streams));
                }
                Ok(RawDependencyMap(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn build_document(raw: RawDocument) -> Result<ModuleDocument> {
    match raw.document.as_deref() {
        Some("modulemd") => {}
        Some(other) => {
            return Err(Error::parse(format!(
                "Unexpected document type \"{}\"",
                other
            )))
        }
        None => return Err(Error::parse("Missing required option document")),
    }

    let mdversion = unsigned(raw.version.as_deref(), "version")?
        .ok_or_else(|| Error::parse("Missing required option version"))?;
    let data = raw
        .data
        .ok_or_else(|| Error::parse("Missing required option data"))?;

    match mdversion {
        MD_VERSION_1 | MD_VERSION_2 => build_data(data, mdversion),
        other => Err(Error::parse(format!(
            "Unsupported modulemd version {}",
            other
        ))),
    }
}

fn build_data(data: RawData, mdversion: u64) -> Result<ModuleDocument> {
    let mut module = ModuleDocument::new(mdversion);

    module.set_name(data.name.as_deref());
    module.set_stream(data.stream.as_deref());
    module.set_version(unsigned(data.version.as_deref(), "data.version")?.unwrap_or(0));
    module.set_summary(data.summary.as_deref());
    module.set_description(data.description.as_deref());

    if let Some(license) = data.license {
        if let Some(list) = license.module {
            module.set_module_licenses(Some(string_set(list, "data.license.module")?));
        }
        if let Some(list) = license.content {
            module.set_content_licenses(Some(string_set(list, "data.license.content")?));
        }
    }

    if let Some(blocks) = data.dependencies {
        let mut dependencies = Vec::with_capacity(blocks.len());
        for block in blocks {
            let deps = match block {
                Some(block) => build_dependencies(block)?,
                None => Dependencies::new(),
            };
            dependencies.push(deps);
        }
        module.set_dependencies(&dependencies);
    }

    if module.summary().is_none() {
        return Err(Error::parse("Missing required option data.summary"));
    }
    if module.description().is_none() {
        return Err(Error::parse("Missing required option data.description"));
    }
    if module.module_licenses().is_none() {
        return Err(Error::parse("Missing required option data.license.module"));
    }

    Ok(module)
}

fn build_dependencies(block: RawDependencies) -> Result<Dependencies> {
    let mut deps = Dependencies::new();
    if let Some(map) = block.buildrequires {
        deps.set_buildrequires(&dependency_map(map, "data.dependencies.buildrequires")?);
    }
    if let Some(map) = block.requires {
        deps.set_requires(&dependency_map(map, "data.dependencies.requires")?);
    }
    Ok(deps)
}

fn dependency_map(raw: RawDependencyMap, field: &str) -> Result<DependencyMap> {
    let mut map = DependencyMap::new();
    for (module, streams) in raw.0 {
        let streams = string_set(streams, &format!("{}.{}", field, module))?;
        map.insert(module, streams);
    }
    Ok(map)
}

/// A `null` list reads as an empty set.
fn string_set(list: RawList, field: &str) -> Result<StringSet> {
    let mut set = StringSet::new();
    for entry in list.unwrap_or_default() {
        let entry = entry.ok_or_else(|| Error::parse(format!("Null entry in {}", field)))?;
        set.add(entry);
    }
    Ok(set)
}

/// An unsigned integer, written with or without quotes.
fn unsigned(text: Option<&str>, field: &str) -> Result<Option<u64>> {
    text.map(|text| {
        text.trim()
            .parse::<u64>()
            .map_err(|_| Error::parse(format!("Expected an unsigned integer for {}", field)))
    })
    .transpose()
}
