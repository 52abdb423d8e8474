//! Chat assistant: an OpenRouter-compatible client, the fallback chain
//! across endpoints, and the chat/focus-assist sessions built on it.

pub mod chain;
pub mod openrouter;
pub mod prompts;
pub mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use chain::{ChainReply, FallbackChain, ReplySource, Worker};
pub use openrouter::OpenRouterClient;
pub use prompts::{parse_breakdown, AssistPrompt};
pub use session::{AiRequest, AssistPanel, ChatSession, SendResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("No response content")]
    EmptyResponse,
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// One model plus the sampling parameters used with it
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Something that can turn a conversation into a reply
pub trait ChatBackend: Send + Sync {
    fn complete(&self, endpoint: &Endpoint, messages: &[ChatMessage]) -> Result<String, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
