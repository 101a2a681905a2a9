//! cdoc — generate and splice LLM-written documentation comments for C.
//!
//! Two binaries share this library:
//!
//! - **cdoc-gen** extracts function definitions from a C file, prompts a
//!   local Ollama model for a block comment per function, and stores the
//!   results in a content-addressed comment store.
//! - **cdoc-splice** replays a source file line by line, inserts each
//!   function's stored comment directly above it, and verifies the annotated
//!   copy differs from the original only in comments and whitespace.

pub mod cache;
pub mod chunk;
pub mod comment;
pub mod context;
pub mod extract;
pub mod ollama;
pub mod prompt;
pub mod scanner;
pub mod splice;
pub mod validate;
pub mod verify;
