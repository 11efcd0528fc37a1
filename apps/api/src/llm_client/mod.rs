/// LLM Client — the single point of entry for all Anthropic API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All text generation MUST go through the `TextProvider` trait below.
///
/// Credentials are per call: every BYOK request carries the end user's own key,
/// so the client itself holds no secret.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used for BYOK copywriting. Small and cheap since the user pays.
pub const MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A success status whose body is not a Messages response.
    #[error("Response body is not a Messages response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LlmError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One block of a Messages API response. Only `"text"` blocks carry `text`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    #[cfg(test)]
    pub fn text_block(text: &str) -> Self {
        Self {
            content: vec![ContentBlock {
                block_type: "text".to_string(),
                text: Some(text.to_string()),
            }],
            usage: None,
        }
    }

    /// The first block, which is the only one the generator reads.
    pub fn first_block(&self) -> Option<&ContentBlock> {
        self.content.first()
    }
}

impl ContentBlock {
    /// Text payload if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        if self.block_type == "text" {
            self.text.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anything that can turn a prompt into a Messages API style response.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<LlmResponse, LlmError>;
}

/// Anthropic Messages API client. One request per call: no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }
}

#[async_trait]
impl TextProvider for LlmClient {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
