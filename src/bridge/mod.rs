pub mod analyze;

pub use analyze::{ActionKind, AnalyzeRequest, AnalyzeResponse, SuggestedAction, analyze, analyze_json};
