use serde::{Deserialize, Serialize};

use crate::selector::engine::SelectorEngine;
use crate::snapshot::element::{Element, ElementId};
use crate::snapshot::error::WireError;
use crate::snapshot::wire::SnapshotRecord;

/// A serialized snapshot plus the goal to resolve against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub snapshot: SnapshotRecord,
    pub goal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Click,
    Type,
}

/// What a live driver should do with the resolved element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub action: ActionKind,
    pub confidence: f64,
    pub element_id: ElementId,
    pub tag: String,
    pub text: String,
    pub css: String,
}

/// Zero or one suggested action; empty when the goal matched nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub actions: Vec<SuggestedAction>,
}

impl SuggestedAction {
    pub fn for_element(el: &Element, confidence: f64) -> Self {
        let action = if el.is_text_entry() {
            ActionKind::Type
        } else {
            ActionKind::Click
        };

        Self {
            action,
            confidence,
            element_id: el.id,
            tag: el.tag.clone(),
            text: el.text.clone(),
            css: el.css_hint(),
        }
    }
}

/// Rebuild the posted snapshot and resolve the goal against it.
pub fn analyze(engine: &SelectorEngine, request: AnalyzeRequest) -> Result<AnalyzeResponse, WireError> {
    let snapshot = request.snapshot.into_snapshot()?;
    let (element, confidence) = engine.find_element(&request.goal, &snapshot);

    Ok(AnalyzeResponse {
        actions: element
            .map(|el| SuggestedAction::for_element(el, confidence))
            .into_iter()
            .collect(),
    })
}

/// `analyze` over raw JSON, for callers that only hold the request body.
pub fn analyze_json(engine: &SelectorEngine, body: &str) -> Result<AnalyzeResponse, WireError> {
    let request: AnalyzeRequest = serde_json::from_str(body)?;
    analyze(engine, request)
}
