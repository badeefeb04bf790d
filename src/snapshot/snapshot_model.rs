use std::collections::HashMap;

use crate::snapshot::element::{Element, ElementId};
use crate::snapshot::fingerprint::fingerprint;

/// Immutable, indexed view of one parsed document.
///
/// The by-id and by-tag indices are derived from `elements` when the snapshot
/// is constructed and are never touched afterwards. Everything handed out is
/// borrowed from the snapshot, so no element outlives it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    url: String,
    elements: Vec<Element>,
    by_id: HashMap<ElementId, usize>,
    by_tag: HashMap<String, Vec<usize>>,
}

impl Snapshot {
    /// Index an already-normalized element sequence, keeping its order.
    pub fn new(url: impl Into<String>, elements: Vec<Element>) -> Self {
        let mut by_id = HashMap::with_capacity(elements.len());
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, el) in elements.iter().enumerate() {
            by_id.entry(el.id).or_insert(pos);
            by_tag.entry(el.tag.to_lowercase()).or_default().push(pos);
        }

        Self {
            url: url.into(),
            elements,
            by_id,
            by_tag,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn by_id(&self, id: ElementId) -> Option<&Element> {
        self.by_id.get(&id).map(|&pos| &self.elements[pos])
    }

    /// Elements with the given tag, in document order. Tag match ignores case.
    pub fn by_tag(&self, tag: &str) -> Vec<&Element> {
        self.by_tag
            .get(&tag.to_lowercase())
            .map(|positions| positions.iter().map(|&pos| &self.elements[pos]).collect())
            .unwrap_or_default()
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<&Element> {
        self.by_tag
            .get(&tag.to_lowercase())
            .and_then(|positions| positions.first())
            .map(|&pos| &self.elements[pos])
    }

    pub fn visible_elements(&self) -> Vec<&Element> {
        self.elements.iter().filter(|el| el.visible).collect()
    }

    pub fn interactive_elements(&self) -> Vec<&Element> {
        self.elements.iter().filter(|el| el.is_interactive()).collect()
    }

    /// Elements whose text contains `needle`.
    pub fn find_by_text(&self, needle: &str, case_sensitive: bool) -> Vec<&Element> {
        if case_sensitive {
            return self
                .elements
                .iter()
                .filter(|el| el.text.contains(needle))
                .collect();
        }

        let needle = needle.to_lowercase();
        self.elements
            .iter()
            .filter(|el| el.text.to_lowercase().contains(&needle))
            .collect()
    }

    /// First `input` whose name selector or name attribute equals `name` exactly.
    pub fn find_input_by_name(&self, name: &str) -> Option<&Element> {
        self.by_tag("input").into_iter().find(|el| {
            el.selectors.name.as_deref() == Some(name) || el.attr("name") == Some(name)
        })
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for el in &self.elements {
            if !seen.contains(&el.tag.as_str()) {
                seen.push(el.tag.as_str());
            }
        }
        seen
    }

    /// Content hash of the element records (url excluded).
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.elements)
    }
}
