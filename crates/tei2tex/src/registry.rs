//! Persons declared in the document's `<listPerson>` elements.

use crate::TEI_NS;
use indexmap::IndexMap;
use tei_xml::{XML_NS, XmlElement};
use tracing::debug;

/// Person identifier → display name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRegistry {
    persons: IndexMap<String, String>,
}

impl PersonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `person` that is a direct child of a `listPerson`
    /// anywhere below `root`.
    ///
    /// A person is kept only if it has a non-empty `xml:id` and a direct
    /// `persName` child; the name is that element's text, trimmed. Other
    /// entries are skipped without complaint.
    pub fn from_document(root: &XmlElement) -> Self {
        let mut registry = Self::new();

        let lists = root.descendants().filter(|e| e.is(Some(TEI_NS), "listPerson"));
        for person in lists.flat_map(|list| list.children_named(Some(TEI_NS), "person")) {
            let id = person.attribute_ns(Some(XML_NS), "id").unwrap_or_default();
            let Some(name) = person.child(Some(TEI_NS), "persName") else {
                debug!(id, "person without persName skipped");
                continue;
            };
            if id.is_empty() {
                debug!("person without xml:id skipped");
                continue;
            }
            registry.insert(id, name.text_content().trim());
        }

        registry
    }

    /// Add or rename a person. A repeated identifier keeps its original
    /// position.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.persons.insert(id.into(), name.into());
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.persons.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.persons.contains_key(id)
    }

    /// `(id, name)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.persons
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
