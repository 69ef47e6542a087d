//! Module dependency maps
//!
//! A [`DependencyMap`] maps a module name to the set of streams of that module
//! which are acceptable. [`Dependencies`] pairs two of them: `buildrequires`
//! (modules needed to build this module) and `requires` (modules needed at
//! runtime).
//!
//! Both types own their data outright. Assigning a whole map copies every
//! stream set, so two `Dependencies` values never share mutable state.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::string_set::StringSet;

/// Module name to acceptable streams, with merge-on-insert semantics
///
/// # Examples
///
/// ```
/// use modulemd::DependencyMap;
///
/// let mut deps = DependencyMap::new();
/// deps.add_streams("platform", ["f28", "f29"]);
/// deps.add_streams("platform", ["f29", "f30"]);
///
/// let streams = deps.get("platform").unwrap();
/// assert_eq!(streams.to_ordered_sequence(), vec!["f28", "f29", "f30"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    modules: BTreeMap<String, StringSet>,
}

impl DependencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `streams` into the set for `module`, creating the entry if needed.
    ///
    /// Existing streams for the module are kept; this never replaces the set.
    pub fn add_streams<I, S>(&mut self, module: &str, streams: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules
            .entry(module.to_string())
            .or_default()
            .union_from(streams);
    }

    /// Add a single stream for `module`
    pub fn add_stream(&mut self, module: &str, stream: &str) {
        self.add_streams(module, [stream]);
    }

    /// Insert `module` with an explicit set, merging with any existing entry.
    pub fn insert(&mut self, module: impl Into<String>, streams: StringSet) {
        match self.modules.entry(module.into()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(streams);
            }
            btree_map::Entry::Occupied(mut entry) => {
                entry.get_mut().union_from(streams.iter());
            }
        }
    }

    /// Discard every entry and copy all entries of `source`.
    pub fn replace_all(&mut self, source: &DependencyMap) {
        self.modules.clear();
        for (module, streams) in &source.modules {
            self.modules.insert(module.clone(), streams.clone());
        }
    }

    /// Return an independent copy with its own keys and stream sets
    pub fn duplicate(&self) -> DependencyMap {
        let mut copy = DependencyMap::new();
        copy.replace_all(self);
        copy
    }

    /// Streams listed for `module`, if any
    pub fn get(&self, module: &str) -> Option<&StringSet> {
        self.modules.get(module)
    }

    /// Remove `module` and return its streams
    pub fn remove(&mut self, module: &str) -> Option<StringSet> {
        self.modules.remove(module)
    }

    /// Module names in lexicographic order
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Iterate over `(module, streams)` pairs in module-name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, StringSet> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencyMap {
    type Item = (&'a String, &'a StringSet);
    type IntoIter = btree_map::Iter<'a, String, StringSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build-time and run-time dependencies of a module
///
/// `Clone` is a deep copy: the clone gets new maps and new stream sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    buildrequires: DependencyMap,
    requires: DependencyMap,
}

impl Dependencies {
    /// Create a block with empty `buildrequires` and `requires`
    pub fn new() -> Self {
        Self::default()
    }

    /// Add build-time streams for `module`, merging with existing ones
    pub fn add_buildrequires<I, S>(&mut self, module: &str, streams: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buildrequires.add_streams(module, streams);
    }

    pub fn add_buildrequires_single(&mut self, module: &str, stream: &str) {
        self.buildrequires.add_stream(module, stream);
    }

    /// Replace all build-time dependencies with copies from `buildrequires`
    pub fn set_buildrequires(&mut self, buildrequires: &DependencyMap) {
        self.buildrequires.replace_all(buildrequires);
    }

    /// Borrow the build-time dependencies
    pub fn buildrequires(&self) -> &DependencyMap {
        &self.buildrequires
    }

    /// Deep copy of the build-time dependencies
    pub fn dup_buildrequires(&self) -> DependencyMap {
        self.buildrequires.duplicate()
    }

    /// Add run-time streams for `module`, merging with existing ones
    pub fn add_requires<I, S>(&mut self, module: &str, streams: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.add_streams(module, streams);
    }

    pub fn add_requires_single(&mut self, module: &str, stream: &str) {
        self.requires.add_stream(module, stream);
    }

    /// Replace all run-time dependencies with copies from `requires`
    pub fn set_requires(&mut self, requires: &DependencyMap) {
        self.requires.replace_all(requires);
    }

    /// Borrow the run-time dependencies
    pub fn requires(&self) -> &DependencyMap {
        &self.requires
    }

    /// Deep copy of the run-time dependencies
    pub fn dup_requires(&self) -> DependencyMap {
        self.requires.duplicate()
    }

    /// Copy this block into `dest`, allocating a new block when `dest` is empty.
    ///
    /// An existing destination is reused: both of its maps are replaced with
    /// copies of this block's maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use modulemd::Dependencies;
    ///
    /// let mut src = Dependencies::new();
    /// src.add_buildrequires_single("platform", "f28");
    ///
    /// let mut dest = None;
    /// src.copy(&mut dest);
    /// src.add_buildrequires_single("platform", "f29");
    ///
    /// let dest = dest.unwrap();
    /// assert_eq!(dest.buildrequires().get("platform").unwrap().len(), 1);
    /// ```
    pub fn copy(&self, dest: &mut Option<Dependencies>) {
        let dest = dest.get_or_insert_with(Dependencies::new);
        dest.set_buildrequires(&self.buildrequires);
        dest.set_requires(&self.requires);
    }

    /// Whether both maps are empty
    pub fn is_empty(&self) -> bool {
        self.buildrequires.is_empty() && self.requires.is_empty()
    }
}
