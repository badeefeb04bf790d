use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::snapshot::element::{Element, ElementId, Selectors};
use crate::snapshot::error::WireError;
use crate::snapshot::snapshot_model::Snapshot;

// ============================================================================
// Serialized element list exchanged across a request/response boundary
// ============================================================================

/// One element as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Layout box reported by a live browser. Carried, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<Value>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(default)]
    pub url: String,
    pub elements: Vec<ElementRecord>,
}

impl From<&Element> for ElementRecord {
    fn from(el: &Element) -> Self {
        Self {
            id: el.id,
            tag: el.tag.clone(),
            text: el.text.clone(),
            attributes: el.attributes.clone(),
            selectors: el.selectors.clone(),
            visible: el.visible,
            bounding_rect: None,
        }
    }
}

impl ElementRecord {
    fn into_element(self) -> Result<Element, WireError> {
        if self.tag.trim().is_empty() {
            return Err(WireError::EmptyTag { id: self.id });
        }

        Ok(Element {
            id: self.id,
            tag: self.tag.to_lowercase(),
            text: self.text,
            attributes: self.attributes,
            selectors: self.selectors,
            visible: self.visible,
        })
    }
}

impl SnapshotRecord {
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild an equivalent snapshot. Ids must be unique and tags non-empty.
    pub fn into_snapshot(self) -> Result<Snapshot, WireError> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        let mut elements = Vec::with_capacity(self.elements.len());

        for record in self.elements {
            if !seen.insert(record.id) {
                return Err(WireError::DuplicateId(record.id));
            }
            elements.push(record.into_element()?);
        }

        Ok(Snapshot::new(self.url, elements))
    }
}

impl Snapshot {
    pub fn to_record(&self) -> SnapshotRecord {
        SnapshotRecord {
            url: self.url().to_string(),
            elements: self.elements().iter().map(ElementRecord::from).collect(),
        }
    }
}
