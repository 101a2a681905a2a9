//! Comment stripping and round-trip verification.
//!
//! The verifier is the pipeline's correctness oracle: once comments and
//! whitespace are removed, the annotated file must be identical to the
//! original, proving the splice inserted documentation and nothing else.

use regex::Regex;
use std::sync::LazyLock;

/// C comments, line and block style. Block comments span lines, so the
/// pattern is non-greedy with dot-matches-newline and multi-line anchors.
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)//.*?$|/\*.*?\*/").unwrap());

/// Remove every comment from C source text.
pub fn remove_comments(code: &str) -> String {
    RE_COMMENT.replace_all(code, "").into_owned()
}

/// Collapse text to its non-whitespace characters.
fn squeeze(code: &str) -> String {
    code.split_whitespace().collect()
}

/// True iff `original` and `generated` are identical once comments and all
/// whitespace are stripped from both.
pub fn round_trip(original: &str, generated: &str) -> bool {
    squeeze(&remove_comments(original)) == squeeze(&remove_comments(generated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_line_comments() {
        assert_eq!(remove_comments("int x; // note\nint y;"), "int x; \nint y;");
    }

    #[test]
    fn removes_inline_block_comments() {
        assert_eq!(remove_comments("int x = 0; /* inline */ int y;"), "int x = 0;  int y;");
    }

    #[test]
    fn removes_multiline_block_comments() {
        let code = "/*\n * spans\n * lines\n */\nint y = 1;\n";
        assert_eq!(remove_comments(code), "\nint y = 1;\n");
    }

    #[test]
    fn block_comment_match_is_non_greedy() {
        let code = "/* a */ int x; /* b */ int y;";
        assert_eq!(remove_comments(code), " int x;  int y;");
    }

    #[test]
    fn round_trip_ignores_added_comments() {
        let original = "void f(void)\n{\n    return;\n}\n";
        let generated = "/**\n* f - does nothing\n*/\nvoid f(void)\n{\n    return;\n}\n";
        assert!(round_trip(original, generated));
    }

    #[test]
    fn round_trip_ignores_whitespace_changes() {
        assert!(round_trip("int  x =\t1;\n", "int x = 1;"));
    }

    #[test]
    fn round_trip_catches_dropped_code() {
        let original = "int x = 1;\nint y = 2;\n";
        let generated = "int x = 1;\n";
        assert!(!round_trip(original, generated));
    }

    #[test]
    fn round_trip_catches_text_outside_comments() {
        let original = "int x = 1;\n";
        let generated = "/* ok */ stray int x = 1;\n";
        assert!(!round_trip(original, generated));
    }
}
