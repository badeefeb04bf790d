use crate::{
    selector::engine::SelectorEngine,
    snapshot::{element::Element, error::ParseError, snapshot_model::Snapshot},
};

pub mod bridge;
pub mod cli;
pub mod selector;
pub mod snapshot;
pub mod source;
pub mod trace;

/// One-shot helper: index `document` and resolve a single `goal` with default scoring.
///
/// Callers resolving several goals against the same document should build the
/// `Snapshot` once and reuse a `SelectorEngine` instead.
pub fn resolve_document(
    document: &str,
    url: &str,
    goal: &str,
) -> Result<(Option<Element>, f64), ParseError> {
    let snapshot = Snapshot::build(document, url)?;
    let engine = SelectorEngine::new();
    let (element, confidence) = engine.find_element(goal, &snapshot);
    Ok((element.cloned(), confidence))
}
