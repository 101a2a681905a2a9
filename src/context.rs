//! Per-run pipeline context.

use std::path::PathBuf;

/// Everything the pipeline stages need to know about the current run.
/// Passed explicitly so no stage reaches for global state.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Project tag mixed into every store key.
    pub project: String,
    /// Bare name of the file being processed, as used in store keys.
    pub file_name: String,
    /// Directory holding `<key>-ai.c` comment files.
    pub comments_dir: PathBuf,
    /// Chatty progress output on stdout.
    pub verbose: bool,
}
