/// Action verbs dropped from a goal before matching.
pub const DEFAULT_STOP_WORDS: [&str; 6] = ["click", "enter", "input", "type", "select", "find"];

pub fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Lower-case the goal, strip every stop word as a plain substring, and trim.
///
/// Removal is substring based, so "inputs" loses its "input" and leaves "s".
/// An empty result is a valid target.
pub fn normalize_goal(goal: &str, stop_words: &[String]) -> String {
    let mut target = goal.to_lowercase();
    for word in stop_words {
        let word = word.to_lowercase();
        if !word.is_empty() {
            target = target.replace(&word, "");
        }
    }
    target.trim().to_string()
}
