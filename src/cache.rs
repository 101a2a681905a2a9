//! Content-addressed comment store.
//!
//! Comments are keyed by a sha256 digest of (project tag, file name,
//! normalized function text) so the same function in the same file always
//! resolves to the same stored comment, wherever it was generated. Lookups
//! never fail: anything unreadable is a miss.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Derive the store key for one function instance.
///
/// The function text is normalized before hashing (every line trimmed, line
/// breaks dropped) so indentation and wrapping changes don't move a function
/// to a new key.
pub fn function_key(project: &str, file_name: &str, function_text: &str) -> String {
    let mut normalized = String::with_capacity(function_text.len());
    for line in function_text.lines() {
        normalized.push_str(line.trim());
    }
    let mut hasher = Sha256::new();
    hasher.update(project.as_bytes());
    hasher.update(file_name.as_bytes());
    hasher.update(normalized.as_bytes());
    to_lower_hex(&hasher.finalize())
}

/// Store file name for a key's generated comment.
pub fn comment_file_name(key: &str) -> String {
    format!("{key}-ai.c")
}

/// Look up the stored comment for a key. Any read failure is a miss.
pub fn resolve(dir: &Path, key: &str) -> Option<String> {
    fs::read_to_string(dir.join(comment_file_name(key))).ok()
}

/// Write one store entry, creating the directory on first use.
pub fn store(dir: &Path, name: &str, text: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create comment store {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }
    out
}
