//! Pages on which each person is referenced.

use std::collections::{BTreeMap, BTreeSet};

/// Person identifier → set of page numbers.
///
/// Filled by the walker, read by the index emitter. Entries are only ever
/// added. Identifiers are kept as written in the reference (after stripping
/// the leading `#`), including ones that match no declared person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceMap {
    pages: BTreeMap<String, BTreeSet<u32>>,
}

impl OccurrenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` is referenced on `page`.
    pub fn record(&mut self, id: &str, page: u32) {
        self.pages.entry(id.to_string()).or_default().insert(page);
    }

    /// Pages for `id` in ascending order, if it was ever referenced.
    pub fn pages(&self, id: &str) -> Option<&BTreeSet<u32>> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<u32>)> {
        self.pages.iter().map(|(id, pages)| (id.as_str(), pages))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
