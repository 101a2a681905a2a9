//! Prompt construction for one function.
//!
//! The scaffold mirrors the house comment format: a title line, one `@arg`
//! line per parameter, and a fixed block of expectation bullets the model is
//! asked to fill in, followed by the operator-supplied instruction text.

/// Leading markers stripped from identifiers pulled out of declarations.
const MARKERS: [char; 3] = ['*', '&', '@'];

/// Expectation bullets the model is expected to fill in.
const EXPECTATION_LINES: usize = 10;

/// Build the scaffold comment plus instructions for one function.
pub fn build_prompt(function: &str, instructions: &str) -> String {
    let mut prompt = String::from("/**\n");
    prompt.push_str(&format!(
        "* {} - description of the function\n",
        function_title(function)
    ));
    for arg in parameter_names(function) {
        prompt.push_str(&format!("* @{arg}: description of the argument\n"));
    }
    prompt.push_str("*\n* Functions Expectations:\n");
    for _ in 0..EXPECTATION_LINES {
        prompt.push_str("* -\n");
    }
    prompt.push_str("*/\n");
    prompt.push_str(instructions);
    prompt
}

/// Function name as it should appear in the comment title: the token before
/// the parameter list, pointer/reference markers stripped.
pub fn function_title(function: &str) -> String {
    let header = function.split(['(', ')']).next().unwrap_or(function);
    let name = header.split_whitespace().last().unwrap_or("");
    name.trim_start_matches(MARKERS).to_string()
}

/// Trailing identifiers of the comma-separated parameter list. `void` and
/// empty entries are skipped; they describe the absence of parameters.
pub fn parameter_names(function: &str) -> Vec<String> {
    let Some(params) = function.split(['(', ')']).nth(1) else {
        return Vec::new();
    };
    params
        .split(',')
        .filter_map(|param| param.split_whitespace().last())
        .map(|name| name.trim_start_matches(MARKERS).to_string())
        .filter(|name| !name.is_empty() && name != "void")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FUNCTION: &str =
        "static const char *ftrace_call_replace(unsigned long ip, unsigned long addr)\n{\n\treturn 0;\n}";

    #[test]
    fn title_strips_storage_and_pointer() {
        assert_eq!(function_title(FUNCTION), "ftrace_call_replace");
    }

    #[test]
    fn parameters_are_trailing_identifiers() {
        assert_eq!(parameter_names(FUNCTION), vec!["ip", "addr"]);
    }

    #[test]
    fn pointer_parameters_lose_their_marker() {
        let names = parameter_names("int read(struct file *filp, char *buf)\n{\n}");
        assert_eq!(names, vec!["filp", "buf"]);
    }

    #[test]
    fn void_parameter_list_is_empty() {
        assert!(parameter_names("void f(void)\n{\n}").is_empty());
    }

    #[test]
    fn scaffold_contains_title_args_and_bullets() {
        let prompt = build_prompt(FUNCTION, "Fill in the comment.");
        assert!(prompt.starts_with("/**\n* ftrace_call_replace - description of the function\n"));
        assert!(prompt.contains("* @ip: description of the argument\n"));
        assert!(prompt.contains("* @addr: description of the argument\n"));
        assert_eq!(prompt.matches("* -\n").count(), 10);
        assert!(prompt.ends_with("*/\nFill in the comment."));
    }
}
