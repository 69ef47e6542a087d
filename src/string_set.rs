//! Deduplicated string sets
//!
//! [`StringSet`] is the leaf container used wherever modulemd needs a set of
//! names: module and content licenses, and the streams listed for each
//! dependency. Values are unique, and iteration is always in lexicographic
//! order so that emitting an unchanged set is byte-identical every time.

use std::collections::btree_set;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An ordered set of unique strings
///
/// # Examples
///
/// ```
/// use modulemd::StringSet;
///
/// let mut licenses = StringSet::new();
/// licenses.add("MIT");
/// licenses.add("GPLv2+");
/// licenses.add("MIT");
///
/// assert_eq!(licenses.len(), 2);
/// assert_eq!(licenses.to_ordered_sequence(), vec!["GPLv2+", "MIT"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringSet {
    values: BTreeSet<String>,
}

impl StringSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Adding a value that is already present is a no-op.
    ///
    /// Returns `true` if the value was not present before.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Insert every value from `values`, skipping ones already present
    pub fn union_from<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Remove a value, returning whether it was present
    pub fn remove(&mut self, value: &str) -> bool {
        self.values.remove(value)
    }

    /// Check whether a value is in the set
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Number of values in the set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the values in canonical order
    pub fn iter(&self) -> StringSetIter<'_> {
        StringSetIter {
            inner: self.values.iter(),
        }
    }

    /// The values in the canonical order used for serialization.
    pub fn to_ordered_sequence(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }
}

/// Borrowing iterator over a [`StringSet`]
#[derive(Debug, Clone)]
pub struct StringSetIter<'a> {
    inner: btree_set::Iter<'a, String>,
}

impl<'a> Iterator for StringSetIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a str;
    type IntoIter = StringSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StringSet::new();
        set.union_from(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for StringSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.union_from(iter);
    }
}
