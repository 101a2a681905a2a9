//! Comment block normalization.
//!
//! Model output arrives in whatever shape the model chose. Normalization
//! keeps only the block-comment lines, left-aligns them, and guarantees the
//! block opens with `/**` and closes with a `*/` line.

/// Normalize raw comment text into a well-formed block comment.
///
/// Retains lines whose trimmed form starts with `*` or contains the opening
/// marker, trims each, and repairs a missing opening or closing marker.
/// The result always ends with a newline. Input with no usable lines yields
/// the degenerate single-line block `*/`.
pub fn normalize(raw: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.starts_with('*') || line.contains("/**") {
            kept.push(line);
        }
    }
    if kept.is_empty() {
        return "*/\n".to_string();
    }

    let terminated = kept[kept.len() - 1].contains("*/");
    let mut block = String::new();
    if !kept[0].contains("/**") {
        block.push_str("/**\n");
    }
    block.push_str(&kept.join("\n"));
    if !terminated {
        block.push_str("\n*/");
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_missing_opening_marker() {
        assert_eq!(normalize("* f - does nothing\n*/"), "/**\n* f - does nothing\n*/\n");
    }

    #[test]
    fn adds_missing_terminator() {
        assert_eq!(normalize("/**\n* f - does nothing"), "/**\n* f - does nothing\n*/\n");
    }

    #[test]
    fn well_formed_block_unchanged() {
        let block = "/**\n* f - does nothing\n*/\n";
        assert_eq!(normalize(block), block);
    }

    #[test]
    fn left_aligns_indented_lines() {
        let raw = "  /**\n   * a - thing\n   */\n";
        assert_eq!(normalize(raw), "/**\n* a - thing\n*/\n");
    }

    #[test]
    fn drops_non_comment_lines() {
        let raw = "Sure, here is the comment:\n/**\n* f - frobs\n*/\nHope that helps!\n";
        assert_eq!(normalize(raw), "/**\n* f - frobs\n*/\n");
    }

    #[test]
    fn terminator_line_is_exact() {
        let out = normalize("* one\n* two");
        assert_eq!(out.lines().last(), Some("*/"));
    }

    #[test]
    fn empty_input_degenerates() {
        assert_eq!(normalize(""), "*/\n");
        assert_eq!(normalize("nothing usable here\n"), "*/\n");
    }
}
