//! Word-budget chunking for whole-file prompting.

/// Split text into chunks of at most `max_words` whitespace-separated words.
///
/// Blind splitter for the `--dumb` path: no awareness of function or
/// statement boundaries.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        used += 1;
        if used <= max_words {
            current.push(word);
        } else {
            chunks.push(current.join(" "));
            current = vec![word];
            used = 1;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}
