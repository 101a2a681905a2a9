//! Blocking Ollama chat client.
//!
//! One request per function, synchronous by design: the pipeline processes
//! a single file at a time and blocks until the model answers or the retry
//! budget is spent.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// System message fixed for every conversation.
const SYSTEM_PROMPT: &str = "You are a computer programmer who makes comments, \
write in a c block comment style. Format instructions are very important, always \
produce a complete comment block beginning with a /** and ending with */ on their \
own lines";

/// Connection and sampling settings for one run.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub host: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            host: "http://localhost:11434".to_string(),
            model: "devstral".to_string(),
            temperature: 0.4,
            timeout: Duration::from_secs(60),
            retries: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Few-shot context file layout: example prompts and the responses we want
/// the model to imitate.
#[derive(Deserialize)]
struct FewShotContext {
    #[serde(default)]
    prompts: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

/// Build the message list for one request: system prompt, optional few-shot
/// turns, then the user content.
pub fn conversation(few_shot: &[ChatMessage], content: String) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new("system", SYSTEM_PROMPT)];
    messages.extend_from_slice(few_shot);
    messages.push(ChatMessage::new("user", content));
    messages
}

/// Load few-shot turns from a JSON context file.
pub fn context_messages(path: &Path) -> Result<Vec<ChatMessage>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read context file {}", path.display()))?;
    let parsed: FewShotContext = serde_json::from_str(&text)
        .with_context(|| format!("malformed context file {}", path.display()))?;
    let mut messages = Vec::new();
    for prompt in parsed.prompts {
        messages.push(ChatMessage::new("user", prompt));
    }
    for response in parsed.responses {
        messages.push(ChatMessage::new("assistant", response));
    }
    Ok(messages)
}

/// Send one chat request, retrying failed attempts up to the configured
/// budget, and return the assistant's message content.
pub fn chat(config: &ModelConfig, messages: &[ChatMessage]) -> Result<String> {
    let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
    let url = format!("{}/api/chat", config.host);
    let request = ChatRequest {
        model: &config.model,
        messages,
        stream: false,
        options: ChatOptions {
            temperature: config.temperature,
        },
    };

    let mut last_error = None;
    for _ in 0..=config.retries {
        match agent.post(&url).send_json(&request) {
            Ok(response) => {
                let parsed: ChatResponse = response
                    .into_json()
                    .with_context(|| format!("malformed response from {url}"))?;
                return Ok(parsed.message.content);
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error
        .map(anyhow::Error::from)
        .unwrap_or_else(|| anyhow!("no request attempted"))
        .context(format!("chat request to {url} failed")))
}
