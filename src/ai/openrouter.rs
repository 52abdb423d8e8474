use super::{AiError, ChatBackend, ChatMessage, Endpoint};
use crate::config::AiConfig;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Chat completions over the OpenRouter HTTP API (or anything speaking it)
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    site_url: String,
    site_name: String,
}

impl OpenRouterClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// `choices[0].message.content`, if present and non-blank
fn reply_content(body: &Value) -> Option<String> {
    body["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string)
}

impl ChatBackend for OpenRouterClient {
    fn complete(&self, endpoint: &Endpoint, messages: &[ChatMessage]) -> Result<String, AiError> {
        let key = endpoint
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let body = json!({
            "model": endpoint.model,
            "messages": messages,
            "temperature": endpoint.temperature,
            "max_tokens": endpoint.max_tokens,
        });

        debug!(model = %endpoint.model, messages = messages.len(), "chat completion request");
        let resp = self
            .client
            .post(self.url())
            .bearer_auth(key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.site_name)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp
            .json()
            .map_err(|e| AiError::Decode(e.to_string()))?;
        reply_content(&value).ok_or(AiError::EmptyResponse)
    }
}
