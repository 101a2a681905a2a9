//! Line-oriented function-boundary detection.
//!
//! The grammar-based extractor knows *which* text is a function; the scanner
//! re-discovers *where* each function sits in the raw line stream. A line
//! matching a known signature opens a buffer; the buffer closes once as many
//! of its lines contain `}` as contain `{`. Everything outside an open
//! buffer passes through untouched.

use std::collections::HashSet;

/// One scanner emission. Every input line appears in exactly one event, in
/// input order.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// A line outside any function body, to be copied through verbatim.
    Line(String),
    /// A complete function body, signature line through balanced `}`.
    Function(Vec<String>),
}

/// Streaming state machine over one file's lines.
pub struct BoundaryScanner {
    signatures: HashSet<String>,
    buffer: Vec<String>,
    caching: bool,
}

impl BoundaryScanner {
    pub fn new(signatures: HashSet<String>) -> Self {
        BoundaryScanner {
            signatures,
            buffer: Vec::new(),
            caching: false,
        }
    }

    /// Feed one line; returns an event when the line completes one.
    ///
    /// The close-brace check runs first so a `}` can never re-open a buffer.
    /// A signature match only opens a buffer when none is in progress, which
    /// keeps a signature-shaped line inside a body as body text.
    pub fn push(&mut self, line: String) -> Option<ScanEvent> {
        if self.caching && line.contains('}') {
            self.buffer.push(line);
            if lines_containing(&self.buffer, '{') == lines_containing(&self.buffer, '}') {
                self.caching = false;
                return Some(ScanEvent::Function(std::mem::take(&mut self.buffer)));
            }
            return None;
        }

        if !self.caching && self.buffer.is_empty() && self.signatures.contains(line.trim()) {
            self.buffer.push(line);
            self.caching = true;
            return None;
        }

        if self.caching {
            self.buffer.push(line);
            return None;
        }

        Some(ScanEvent::Line(line))
    }

    /// End of input. A non-empty buffer means a function body never closed;
    /// its lines are handed back for diagnostics and do not reach the
    /// output.
    pub fn finish(&mut self) -> Option<Vec<String>> {
        self.caching = false;
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Brace balance counts lines containing the brace, not brace characters;
/// a line with several `{` still counts once.
fn lines_containing(lines: &[String], brace: char) -> usize {
    lines.iter().filter(|line| line.contains(brace)).count()
}
