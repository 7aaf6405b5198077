//! Completion service client, the single point of entry for all language
//! model calls.
//!
//! The orchestrator only sees the `Completer` trait; when no API key is
//! configured, `NullCompleter` stands in and every call signals
//! `Unavailable`, which the caller degrades from gracefully.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "gpt-4o-mini";
const SUGGEST_MAX_TOKENS: u32 = 100;
const ANSWER_MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum CompleterError {
    #[error("completion service is not configured")]
    Unavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion service returned empty content")]
    EmptyContent,
}

/// The completion service seam. Carried in `AppState` as `Arc<dyn Completer>`.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Suggests what the user might search for when nothing matched.
    async fn suggest(&self, question: &str) -> Result<String, CompleterError>;

    /// Answers the question using only the provided resume context.
    async fn answer(&self, context: &str, question: &str) -> Result<String, CompleterError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-backed completer. Single-shot: a slow or failing call surfaces to
/// the orchestrator, which falls back to verbatim matches. No retries.
pub struct OpenAiCompleter {
    client: Client,
    api_key: String,
}

impl OpenAiCompleter {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn complete(
        &self,
        system: &'static str,
        user: String,
        max_tokens: u32,
    ) -> Result<String, CompleterError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompleterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(CompleterError::EmptyContent)?;

        debug!("completion succeeded ({} chars)", text.len());
        Ok(text)
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn suggest(&self, question: &str) -> Result<String, CompleterError> {
        let prompt = prompts::SUGGEST_PROMPT.replace("{question}", question);
        self.complete(prompts::SUGGEST_SYSTEM, prompt, SUGGEST_MAX_TOKENS)
            .await
    }

    async fn answer(&self, context: &str, question: &str) -> Result<String, CompleterError> {
        let prompt = prompts::ANSWER_PROMPT
            .replace("{context}", context)
            .replace("{question}", question);
        self.complete(prompts::ANSWER_SYSTEM, prompt, ANSWER_MAX_TOKENS)
            .await
    }
}

/// Null object selected when OPENAI_API_KEY is unset.
pub struct NullCompleter;

#[async_trait]
impl Completer for NullCompleter {
    async fn suggest(&self, _question: &str) -> Result<String, CompleterError> {
        Err(CompleterError::Unavailable)
    }

    async fn answer(&self, _context: &str, _question: &str) -> Result<String, CompleterError> {
        Err(CompleterError::Unavailable)
    }
}
