//! Grammar-based function extraction for C source.
//!
//! tree-sitter provides the authoritative list of function definitions; the
//! boundary scanner only consumes their first lines as signatures. Walking
//! is iterative to stay safe on deeply nested code.

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use tree_sitter::{Node, Parser};

fn c_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c::LANGUAGE.into())
        .map_err(|e| anyhow!("failed to load C grammar: {e}"))?;
    Ok(parser)
}

/// Extract the literal text of every function definition, in source order.
pub fn function_spans(source: &str) -> Result<Vec<String>> {
    let mut parser = c_parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("C parse failed"))?;
    let bytes = source.as_bytes();

    let mut spans = Vec::new();
    let mut cursor = tree.root_node().walk();
    loop {
        let node = cursor.node();
        if node.kind() == "function_definition" {
            if let Ok(text) = node.utf8_text(bytes) {
                spans.push(text.to_string());
            }
        }
        if cursor.goto_first_child() {
            continue;
        }
        if cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return Ok(spans);
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

/// The declared name of one function definition's text, if the grammar can
/// find its declarator. Pointer-returning functions nest the declarator, so
/// the search descends.
pub fn function_name(function: &str) -> Option<String> {
    let mut parser = c_parser().ok()?;
    let tree = parser.parse(function, None)?;
    let bytes = function.as_bytes();

    let declarator = find_kind(tree.root_node(), "function_declarator")?;
    let identifier = find_kind(declarator, "identifier")?;
    identifier.utf8_text(bytes).ok().map(str::to_string)
}

/// Trimmed first line of each span: the signature set the scanner matches
/// against.
pub fn signatures(spans: &[String]) -> HashSet<String> {
    spans
        .iter()
        .filter_map(|span| span.lines().next())
        .map(|line| line.trim().to_string())
        .collect()
}

/// First node of `kind` under `node`, depth-first.
fn find_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_kind(child, kind) {
            return Some(found);
        }
    }
    None
}
