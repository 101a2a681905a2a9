//! cdoc-gen — generate documentation comments for C functions with a local
//! Ollama model and store them in the content-addressed comment store.

use anyhow::{Context, Result};
use cdoc::cache;
use cdoc::chunk;
use cdoc::extract;
use cdoc::ollama::{self, ChatMessage, ModelConfig};
use cdoc::prompt;
use cdoc::validate;
use cdoc::verify;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cdoc-gen",
    about = "Generate C documentation comments with a local LLM"
)]
struct Cli {
    /// C source file to document
    source: PathBuf,

    /// File with the instruction text appended to every prompt
    prompt: PathBuf,

    /// Word budget per chunk in dumb mode
    #[arg(short = 'c', long, default_value_t = 2000)]
    chunk_size: usize,

    /// Chunk by word count instead of extracting functions
    #[arg(short = 'd', long)]
    dumb: bool,

    /// Print everything we are doing
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Write original and generated text into the comment store
    #[arg(short = 'w', long)]
    write: bool,

    /// Keep comments in the source before prompting
    #[arg(short = 'k', long)]
    keep_comments: bool,

    /// Comment store directory
    #[arg(long, default_value = "functions")]
    comments_dir: PathBuf,

    /// Ollama server
    #[arg(long, default_value = "http://localhost:11434")]
    host: String,

    /// Model name
    #[arg(long, default_value = "devstral")]
    model: String,

    /// Project tag mixed into store keys
    #[arg(long, default_value = "Linux")]
    project: String,

    /// Few-shot context file (JSON with "prompts" and "responses")
    #[arg(long)]
    context: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("failed to read {}", cli.source.display()))?;
    let instructions = fs::read_to_string(&cli.prompt)
        .with_context(|| format!("failed to read {}", cli.prompt.display()))?;

    let file_name = cli
        .source
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| cli.source.display().to_string());

    // Strip comments before prompting (default)
    let code = if cli.keep_comments {
        source
    } else {
        verify::remove_comments(&source)
    };

    let config = ModelConfig {
        host: cli.host.clone(),
        model: cli.model.clone(),
        ..ModelConfig::default()
    };
    let few_shot = match &cli.context {
        Some(path) => ollama::context_messages(path)?,
        None => Vec::new(),
    };

    if cli.dumb {
        println!("Using dumb chunking, chunk size: {}", cli.chunk_size);
        let chunks = chunk::chunk_words(&code, cli.chunk_size);
        println!("Total chunks: {}", chunks.len());
        prompt_chunks(&cli, &config, &few_shot, &instructions, &chunks)
    } else {
        println!("Using function extraction.");
        let functions = extract::function_spans(&code)?;
        println!("{} function(s) extracted", functions.len());
        prompt_functions(&cli, &config, &few_shot, &instructions, &file_name, &functions)
    }
}

/// Prompt the model once per extracted function; store originals and
/// responses under their content-addressed keys.
fn prompt_functions(
    cli: &Cli,
    config: &ModelConfig,
    few_shot: &[ChatMessage],
    instructions: &str,
    file_name: &str,
    functions: &[String],
) -> Result<()> {
    for (index, function) in functions.iter().enumerate() {
        let number = index + 1;
        let key = cache::function_key(&cli.project, file_name, function);
        if cli.verbose {
            println!("prompting function {number} of {}", functions.len());
        }
        if cli.write {
            cache::store(&cli.comments_dir, &format!("{key}-orig.c"), function)?;
        }

        let request = prompt::build_prompt(function, instructions);
        if cli.verbose {
            println!("using prompt:\n{request}");
        }
        let content = format!("{request}\n{function}");
        let response = match ollama::chat(config, &ollama::conversation(few_shot, content)) {
            Ok(response) => response,
            Err(e) => {
                eprintln!("warning: prompt for function {number} failed: {e:#}");
                continue;
            }
        };

        for failure in validate::validate_response(&response, function) {
            eprintln!("warning: function {number}: {failure}");
        }
        if cli.verbose {
            println!("response:\n{response}");
        }
        if cli.write {
            cache::store(&cli.comments_dir, &cache::comment_file_name(&key), &response)?;
        }
    }
    Ok(())
}

/// Prompt the model once per word chunk; chunks are numbered, not hashed,
/// since there is nothing stable to key them by.
fn prompt_chunks(
    cli: &Cli,
    config: &ModelConfig,
    few_shot: &[ChatMessage],
    instructions: &str,
    chunks: &[String],
) -> Result<()> {
    for (index, chunk_text) in chunks.iter().enumerate() {
        let number = index + 1;
        if cli.verbose {
            println!("prompting chunk {number} of {}", chunks.len());
        }
        if cli.write {
            cache::store(&cli.comments_dir, &format!("{number}-orig.c"), chunk_text)?;
        }

        let request = prompt::build_prompt(chunk_text, instructions);
        let content = format!("{request}\n{chunk_text}");
        match ollama::chat(config, &ollama::conversation(few_shot, content)) {
            Ok(response) => {
                if cli.verbose {
                    println!("response:\n{response}");
                }
                if cli.write {
                    cache::store(&cli.comments_dir, &format!("{number}-ai.c"), &response)?;
                }
            }
            Err(e) => eprintln!("warning: prompt for chunk {number} failed: {e:#}"),
        }
    }
    Ok(())
}
