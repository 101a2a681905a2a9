//! Advisory format checks for model output.
//!
//! Each predicate inspects one convention of the house comment style. The
//! generator surfaces failures as warnings; nothing here blocks a run.

use crate::prompt::{function_title, parameter_names};

/// Response begins and ends with block-comment markers.
pub fn has_comment_markers(response: &str) -> bool {
    let text = response.trim();
    text.starts_with("/*") && text.ends_with("*/")
}

/// The comment's title segment names the documented function. The title is
/// the first `*`-separated segment carrying a `-` separator.
pub fn title_matches(response: &str, function: &str) -> bool {
    let name = function_title(function);
    if name.is_empty() {
        return false;
    }
    response
        .split('*')
        .find(|segment| segment.contains('-'))
        .is_some_and(|title| title.contains(&name))
}

/// Every parameter is referenced as `@<name>` somewhere in the comment.
pub fn arguments_covered(response: &str, function: &str) -> bool {
    parameter_names(function)
        .iter()
        .all(|arg| response.contains(&format!("@{arg}")))
}

/// Expectation-count heuristic: at least as many `-` markers as parameters.
pub fn expectation_count_ok(response: &str, function: &str) -> bool {
    response.matches('-').count() >= parameter_names(function).len()
}

/// Run every check, returning human-readable failure notes. Empty means the
/// response passed.
pub fn validate_response(response: &str, function: &str) -> Vec<String> {
    let mut failures = Vec::new();
    if !has_comment_markers(response) {
        failures.push("comment is missing its /* or */ marker".to_string());
    }
    if !title_matches(response, function) {
        failures.push("comment title does not name the function".to_string());
    }
    if !arguments_covered(response, function) {
        failures.push("not every argument is described with an @name line".to_string());
    }
    if !expectation_count_ok(response, function) {
        failures.push("fewer expectation bullets than arguments".to_string());
    }
    failures
}
