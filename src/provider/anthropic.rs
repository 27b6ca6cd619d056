//! Anthropic Messages API backend.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::DialecticError;
use crate::models::AnthropicModel;
use crate::session::DEFAULT_MAX_TOKENS;
use crate::types::{Message, Role};

use super::http::{anthropic_headers, shared_client, status_to_error};
use super::{BackendKind, ChatBackend};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    model: AnthropicModel,
    api_key: Option<String>,
    base_url: String,
    max_tokens: u32,
}

impl AnthropicBackend {
    pub fn new(model: AnthropicModel, api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Cap on reply tokens sent with each request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Encode history for the Messages API.
    ///
    /// System messages move to the top-level `system` field. The API rejects a
    /// conversation that opens with an assistant turn, which FIFO eviction can
    /// produce, so assistant messages before the first user message are left out
    /// of the request.
    fn build_request_body(&self, history: &[Message]) -> serde_json::Value {
        let mut system_parts = Vec::new();
        let mut messages = Vec::new();
        let mut seen_user = false;

        for msg in history {
            match msg.role {
                Role::System => system_parts.push(msg.content.as_str()),
                Role::User => {
                    seen_user = true;
                    messages.push(serde_json::json!({
                        "role": "user",
                        "content": msg.content,
                    }));
                }
                Role::Assistant => {
                    if seen_user {
                        messages.push(serde_json::json!({
                            "role": "assistant",
                            "content": msg.content,
                        }));
                    }
                }
            }
        }

        let mut body = serde_json::json!({
            "model": self.model.as_str(),
            "messages": messages,
            "max_tokens": self.max_tokens,
        });

        if !system_parts.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("system".into(), system_parts.join("\n").into());
            }
        }

        body
    }
}

#[async_trait]
impl ChatBackend for AnthropicBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Claude
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn send(&self, history: &[Message]) -> Result<String, DialecticError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DialecticError::Authentication(
                "Missing CLAUDE_API_KEY (or ANTHROPIC_API_KEY)".into(),
            ))?;
        let body = self.build_request_body(history);
        let url = format!("{}/messages", self.base_url);

        debug!(
            model = self.model.as_str(),
            messages = history.len(),
            "Anthropic messages request"
        );

        let resp = shared_client()
            .post(&url)
            .headers(anthropic_headers(api_key, API_VERSION))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: AnthropicResponse = resp.json().await?;
        let texts: Vec<String> = data
            .content
            .into_iter()
            .filter(|block| block.r#type == "text")
            .filter_map(|block| block.text)
            .collect();

        if texts.is_empty() {
            return Err(DialecticError::malformed(
                "anthropic",
                "no text block in response content",
            ));
        }

        Ok(texts.concat())
    }
}

// Anthropic API response types (internal)

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    r#type: String,
    text: Option<String>,
}
