//! OpenAI Chat Completions backend.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::DialecticError;
use crate::models::OpenAiModel;
use crate::session::DEFAULT_MAX_TOKENS;
use crate::types::Message;

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{BackendKind, ChatBackend};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiBackend {
    model: OpenAiModel,
    api_key: Option<String>,
    base_url: String,
    max_tokens: u32,
}

impl OpenAiBackend {
    pub fn new(model: OpenAiModel, api_key: Option<String>, base_url: Option<String>) -> Self {
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

    fn build_request_body(&self, history: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model.as_str(),
            "messages": history,
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpt
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn send(&self, history: &[Message]) -> Result<String, DialecticError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DialecticError::Authentication("Missing OPENAI_API_KEY".into()))?;
        let body = self.build_request_body(history);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = self.model.as_str(),
            messages = history.len(),
            "OpenAI chat completion"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DialecticError::malformed("openai", "no choices in response"))?;

        choice
            .message
            .content
            .ok_or_else(|| DialecticError::malformed("openai", "choice has no text content"))
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}
