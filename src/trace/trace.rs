use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::selector::engine::{Candidate, Resolution};
use crate::snapshot::element::ElementId;
use crate::snapshot::snapshot_model::Snapshot;

/// One resolve call, as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct ResolutionTrace {
    pub timestamp_ms: u128,
    pub url: String,
    pub fingerprint: String,
    pub goal: String,
    pub target: String,

    pub element_id: Option<ElementId>,
    pub tag: Option<String>,
    pub strategy: Option<String>,
    pub confidence: f64,

    pub candidates: Vec<Candidate>,
}

impl ResolutionTrace {
    pub fn now(snapshot: &Snapshot, goal: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            url: snapshot.url().to_string(),
            fingerprint: snapshot.fingerprint(),
            goal: goal.to_string(),
            target: String::new(),
            element_id: None,
            tag: None,
            strategy: None,
            confidence: 0.0,
            candidates: vec![],
        }
    }

    pub fn with_resolution(mut self, resolution: &Resolution<'_>) -> Self {
        self.target = resolution.target.clone();
        self.element_id = resolution.element.map(|el| el.id);
        self.tag = resolution.element.map(|el| el.tag.clone());
        self.strategy = resolution.strategy.map(|s| s.name().to_string());
        self.confidence = resolution.confidence;
        self.candidates = resolution.candidates.clone();
        self
    }

    /// Keep the winning candidate plus the next `count`.
    pub fn with_runners_up(mut self, count: usize) -> Self {
        self.candidates.truncate(count.saturating_add(1));
        self
    }
}
