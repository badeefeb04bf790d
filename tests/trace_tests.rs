mod common;

use common::utils::{fixture_snapshot, snapshot_of};
use goal_resolver::selector::SelectorEngine;
use goal_resolver::trace::{ResolutionTrace, TraceLogger};
use serde_json::Value;

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn trace_records_the_winner() {
    let snapshot = fixture_snapshot("sample_page.html");
    let resolution = SelectorEngine::new().resolve("Click Submit", &snapshot);

    let trace = ResolutionTrace::now(&snapshot, "Click Submit").with_resolution(&resolution);
    assert_eq!(trace.goal, "Click Submit");
    assert_eq!(trace.target, "submit");
    assert_eq!(trace.tag.as_deref(), Some("button"));
    assert_eq!(trace.strategy.as_deref(), Some("by_text"));
    assert_eq!(trace.fingerprint, snapshot.fingerprint());
    assert!(trace.timestamp_ms > 0);
}

#[test]
fn runners_up_follow_the_winner() {
    let snapshot = fixture_snapshot("sample_page.html");
    let resolution = SelectorEngine::new().resolve("enter password", &snapshot);
    assert!(resolution.candidates.len() > 1);

    let trace = ResolutionTrace::now(&snapshot, "enter password")
        .with_resolution(&resolution)
        .with_runners_up(1);
    assert_eq!(trace.candidates.len(), 2);
    assert_eq!(trace.candidates[0], resolution.candidates[0]);
    assert_eq!(trace.candidates[1], resolution.candidates[1]);

    let trace = ResolutionTrace::now(&snapshot, "enter password")
        .with_resolution(&resolution)
        .with_runners_up(0);
    assert_eq!(trace.candidates.len(), 1);
}

#[test]
fn logger_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let logger = TraceLogger::new(&path);
    assert!(logger.is_enabled());

    let snapshot = snapshot_of(r#"<input name="username"><button>Submit</button>"#);
    let engine = SelectorEngine::new();

    for goal in ["enter username", "click submit", "click anything"] {
        let resolution = engine.resolve(goal, &snapshot);
        logger.log(&ResolutionTrace::now(&snapshot, goal).with_resolution(&resolution));
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["element_id"], 1);
    assert_eq!(lines[0]["strategy"], "by_semantic");
    assert_eq!(lines[1]["element_id"], 2);
    assert_eq!(lines[1]["candidates"][0]["strategy"], "by_text");
    assert_eq!(lines[2]["strategy"], "structural");
    assert_eq!(lines[2]["tag"], "input");
}

#[test]
fn unwritable_path_disables_logger() {
    let dir = tempfile::tempdir().unwrap();
    let logger = TraceLogger::new(dir.path().join("missing").join("trace.jsonl"));
    assert!(!logger.is_enabled());

    // logging into a disabled sink is a no-op
    let snapshot = snapshot_of("<p>x</p>");
    let resolution = SelectorEngine::new().resolve("x", &snapshot);
    logger.log(&ResolutionTrace::now(&snapshot, "x").with_resolution(&resolution));
}
