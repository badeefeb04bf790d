use serde::{Deserialize, Serialize};

use crate::selector::config::StrategyParams;
use crate::selector::similarity::similarity;
use crate::snapshot::element::{Element, SelectorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    ById,
    ByAccessibility,
    BySemantic,
    ByText,
    ByClass,
    /// Tag-based fallback used only when no other strategy produced a candidate.
    Structural,
}

impl Strategy {
    /// Candidate-generating strategies, in tie-break order.
    pub const RANKED: [Strategy; 5] = [
        Strategy::ById,
        Strategy::ByAccessibility,
        Strategy::BySemantic,
        Strategy::ByText,
        Strategy::ByClass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ById => "by_id",
            Strategy::ByAccessibility => "by_accessibility",
            Strategy::BySemantic => "by_semantic",
            Strategy::ByText => "by_text",
            Strategy::ByClass => "by_class",
            Strategy::Structural => "structural",
        }
    }

    /// Position in the tie-break order; lower wins.
    pub fn rank(self) -> usize {
        Strategy::RANKED
            .iter()
            .position(|s| *s == self)
            .unwrap_or(Strategy::RANKED.len())
    }
}

/// Scores one element against a normalized target, or `None` when it does not match.
pub type ScoreFn = fn(target: &str, el: &Element, params: &StrategyParams) -> Option<f64>;

pub struct StrategyEntry {
    pub strategy: Strategy,
    pub score: ScoreFn,
}

/// Strategies run over every element, in this order.
pub const STRATEGY_TABLE: [StrategyEntry; 5] = [
    StrategyEntry { strategy: Strategy::ById, score: score_by_id },
    StrategyEntry { strategy: Strategy::ByAccessibility, score: score_by_accessibility },
    StrategyEntry { strategy: Strategy::BySemantic, score: score_by_semantic },
    StrategyEntry { strategy: Strategy::ByText, score: score_by_text },
    StrategyEntry { strategy: Strategy::ByClass, score: score_by_class },
];

fn graded(target: &str, value: &str, params: &StrategyParams) -> Option<f64> {
    let sim = similarity(target, value);
    if sim > params.threshold {
        Some(params.base + params.bonus * sim)
    } else {
        None
    }
}

pub fn score_by_id(target: &str, el: &Element, params: &StrategyParams) -> Option<f64> {
    if target.is_empty() {
        return None;
    }
    let id = el.id_value()?;
    if id.to_lowercase().contains(&target.to_lowercase()) {
        Some(params.base)
    } else {
        None
    }
}

pub fn score_by_accessibility(target: &str, el: &Element, params: &StrategyParams) -> Option<f64> {
    let label = el.selector(SelectorKind::AriaLabel).filter(|l| !l.is_empty())?;
    graded(target, label, params)
}

pub fn score_by_semantic(target: &str, el: &Element, params: &StrategyParams) -> Option<f64> {
    let name = el.name_value()?;
    graded(target, name, params)
}

pub fn score_by_text(target: &str, el: &Element, params: &StrategyParams) -> Option<f64> {
    if el.text.is_empty() {
        return None;
    }
    graded(target, &el.text, params)
}

pub fn score_by_class(target: &str, el: &Element, params: &StrategyParams) -> Option<f64> {
    let class = el.selector(SelectorKind::Class).filter(|c| !c.is_empty())?;
    graded(target, class, params)
}
