use serde::Serialize;
use tracing::{debug, info};

use crate::bridge::analyze::{AnalyzeResponse, analyze_json};
use crate::cli::config::AppConfig;
use crate::selector::engine::{Candidate, Resolution, SelectorEngine};
use crate::selector::strategy::Strategy;
use crate::snapshot::element::{Element, SelectorKind};
use crate::snapshot::snapshot_model::Snapshot;
use crate::snapshot::wire::ElementRecord;
use crate::source::loader::{DocumentSource, load_document};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::ResolutionTrace;

// ============================================================================
// resolve subcommand
// ============================================================================

/// JSON shape of one resolved goal.
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub goal: String,
    pub target: String,
    pub element: Option<ElementRecord>,
    pub confidence: f64,
    pub strategy: Option<Strategy>,
    pub candidates: Vec<Candidate>,
}

impl ResolveOutput {
    /// `top` counts runners-up; the winner is always listed first.
    pub fn new(goal: &str, resolution: &Resolution<'_>, top: usize) -> Self {
        Self {
            goal: goal.to_string(),
            target: resolution.target.clone(),
            element: resolution.element.map(ElementRecord::from),
            confidence: resolution.confidence,
            strategy: resolution.strategy,
            candidates: resolution
                .candidates
                .iter()
                .take(top.saturating_add(1))
                .copied()
                .collect(),
        }
    }
}

/// Resolve every goal and return whether all of them matched an element.
pub fn cmd_resolve(
    input: &str,
    goals: &[String],
    format: &str,
    trace: Option<&str>,
    top: usize,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(input, config)?;
    let engine = SelectorEngine::with_config(config.scoring.clone());
    let tracer = match trace {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let mut all_matched = true;
    let mut outputs = Vec::new();

    for goal in goals {
        let resolution = engine.resolve(goal, &snapshot);
        debug!(
            goal = goal.as_str(),
            target = resolution.target.as_str(),
            candidates = resolution.candidates.len(),
            "resolved goal"
        );

        if tracer.is_enabled() {
            tracer.log(
                &ResolutionTrace::now(&snapshot, goal)
                    .with_resolution(&resolution)
                    .with_runners_up(top),
            );
        }

        all_matched &= resolution.is_match();

        match format {
            "json" => outputs.push(ResolveOutput::new(goal, &resolution, top)),
            _ => print!("{}", format_resolution(goal, &resolution, &snapshot, top)),
        }
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    }

    Ok(all_matched)
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(
    input: &str,
    format: &str,
    all: bool,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(input, config)?;

    match format {
        "json" => println!("{}", snapshot.to_record().to_json_pretty()?),
        _ => print!("{}", format_inspect(&snapshot, all)),
    }

    Ok(())
}

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(request: &str, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = DocumentSource::parse(request);
    let body = load_document(&source, &config.fetch)?;

    let engine = SelectorEngine::with_config(config.scoring.clone());
    let response: AnalyzeResponse = analyze_json(&engine, &body)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Load and index the document named by `input`.
pub fn load_snapshot(input: &str, config: &AppConfig) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let source = DocumentSource::parse(input);
    let document = load_document(&source, &config.fetch)?;
    let snapshot = Snapshot::build_with(&document, &source.location(), &config.snapshot)?;

    let fingerprint = snapshot.fingerprint();
    info!(
        url = snapshot.url(),
        elements = snapshot.len(),
        fingerprint = fingerprint.as_str(),
        "indexed document"
    );

    Ok(snapshot)
}

/// Human-readable block for one resolved goal.
pub fn format_resolution(goal: &str, resolution: &Resolution<'_>, snapshot: &Snapshot, top: usize) -> String {
    let mut out = String::new();

    match (resolution.element, resolution.strategy) {
        (Some(el), Some(strategy)) => out.push_str(&format!(
            "{:?} -> {} (confidence {:.3}, {})\n",
            goal,
            format_element(el),
            resolution.confidence,
            strategy.name()
        )),
        _ => out.push_str(&format!("{:?} -> no match\n", goal)),
    }

    for candidate in resolution.candidates.iter().skip(1).take(top) {
        let label = snapshot
            .by_id(candidate.element_id)
            .map(format_element)
            .unwrap_or_else(|| format!("#{}", candidate.element_id));
        out.push_str(&format!(
            "    {:.3} {:<16} {}\n",
            candidate.score,
            candidate.strategy.name(),
            label
        ));
    }

    out
}

/// One-line summary: `#id <tag> key=value... "text"`.
pub fn format_element(el: &Element) -> String {
    let mut line = format!("#{} <{}>", el.id, el.tag);

    for kind in SelectorKind::ALL {
        if let Some(value) = el.selector(kind) {
            line.push_str(&format!(" {}={:?}", kind.key(), value));
        }
    }

    if !el.text.is_empty() {
        line.push_str(&format!(" {:?}", truncate_label(&el.text, 40)));
    }

    line
}

fn format_inspect(snapshot: &Snapshot, all: bool) -> String {
    let listed = if all {
        snapshot.elements().iter().collect::<Vec<_>>()
    } else {
        snapshot.interactive_elements()
    };

    let mut out = format!(
        "{} ({} elements, {} listed)\n",
        snapshot.url(),
        snapshot.len(),
        listed.len()
    );
    for el in listed {
        out.push_str("  ");
        out.push_str(&format_element(el));
        out.push('\n');
    }
    out
}

fn truncate_label(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
