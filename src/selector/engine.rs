use std::cmp::Ordering;

use serde::Serialize;

use crate::selector::config::ScoringConfig;
use crate::selector::goal::normalize_goal;
use crate::selector::strategy::{STRATEGY_TABLE, Strategy};
use crate::snapshot::element::{Element, ElementId};
use crate::snapshot::snapshot_model::Snapshot;

/// Goal keywords that steer the structural fallback towards buttons.
const BUTTON_KEYWORDS: [&str; 2] = ["submit", "button"];

/// One scored match produced by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub element_id: ElementId,
    pub strategy: Strategy,
    pub score: f64,
}

/// Full outcome of resolving one goal against one snapshot.
#[derive(Debug, Clone)]
pub struct Resolution<'s> {
    pub element: Option<&'s Element>,
    pub confidence: f64,
    /// Strategy that produced the winner; `None` when nothing matched.
    pub strategy: Option<Strategy>,
    /// The goal after normalization.
    pub target: String,
    /// Every candidate, best first. Empty when the fallback decided.
    pub candidates: Vec<Candidate>,
}

impl<'s> Resolution<'s> {
    fn no_match(target: String) -> Self {
        Self {
            element: None,
            confidence: 0.0,
            strategy: None,
            target,
            candidates: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.element.is_some()
    }
}

/// Resolves natural-language goals to elements of a snapshot.
///
/// Holds only its scoring constants; every call is a pure function of
/// `(goal, snapshot)`, so one engine can serve any number of snapshots.
#[derive(Debug, Clone, Default)]
pub struct SelectorEngine {
    config: ScoringConfig,
}

impl SelectorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Best element for `goal` and its confidence; `(None, 0.0)` when nothing fits.
    pub fn find_element<'s>(&self, goal: &str, snapshot: &'s Snapshot) -> (Option<&'s Element>, f64) {
        let resolution = self.resolve(goal, snapshot);
        (resolution.element, resolution.confidence)
    }

    pub fn resolve<'s>(&self, goal: &str, snapshot: &'s Snapshot) -> Resolution<'s> {
        let target = normalize_goal(goal, &self.config.stop_words);
        let mut candidates = self.collect_candidates(&target, snapshot);

        if candidates.is_empty() {
            return self.structural_fallback(target, snapshot);
        }

        candidates.sort_by(rank_candidates);
        let best = candidates[0];

        Resolution {
            element: snapshot.by_id(best.element_id),
            confidence: self.cap(best.score),
            strategy: Some(best.strategy),
            target,
            candidates,
        }
    }

    fn collect_candidates(&self, target: &str, snapshot: &Snapshot) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for entry in &STRATEGY_TABLE {
            let params = self.config.params(entry.strategy);
            for el in snapshot.elements() {
                if let Some(score) = (entry.score)(target, el, &params) {
                    candidates.push(Candidate {
                        element_id: el.id,
                        strategy: entry.strategy,
                        score,
                    });
                }
            }
        }

        candidates
    }

    /// First button when the target asks for one, otherwise first input.
    fn structural_fallback<'s>(&self, target: String, snapshot: &'s Snapshot) -> Resolution<'s> {
        let wants_button = BUTTON_KEYWORDS.iter().any(|k| target.contains(k));

        let element = wants_button
            .then(|| snapshot.first_by_tag("button"))
            .flatten()
            .or_else(|| snapshot.first_by_tag("input"));

        match element {
            Some(el) => Resolution {
                element: Some(el),
                confidence: self.cap(self.config.fallback_confidence),
                strategy: Some(Strategy::Structural),
                target,
                candidates: Vec::new(),
            },
            None => Resolution::no_match(target),
        }
    }

    fn cap(&self, score: f64) -> f64 {
        score.min(self.config.max_confidence).max(0.0)
    }
}

/// Higher score first, then earlier strategy, then lower element id.
fn rank_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.strategy.rank().cmp(&b.strategy.rank()))
        .then(a.element_id.cmp(&b.element_id))
}
