//! Chat backend trait and implementations.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "anthropic")]
pub mod anthropic;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::{self, DialecticConfig};
use crate::error::DialecticError;
use crate::session::SessionSettings;
use crate::types::Message;

/// The two chat services a dialogue alternates between.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// OpenAI Chat Completions.
    Gpt,
    /// Anthropic Messages.
    Claude,
}

impl BackendKind {
    /// The backend that answers this one.
    pub fn other(self) -> Self {
        match self {
            Self::Gpt => Self::Claude,
            Self::Claude => Self::Gpt,
        }
    }

    /// Upper-case tag printed in front of each reply.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gpt => "GPT",
            Self::Claude => "CLAUDE",
        }
    }

    /// Key under which [`DialecticConfig`] stores this backend's credentials.
    pub fn provider_key(self) -> &'static str {
        match self {
            Self::Gpt => config::OPENAI,
            Self::Claude => config::ANTHROPIC,
        }
    }

    /// Environment variable the CLI reads this backend's API key from.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::Gpt => "OPENAI_API_KEY",
            Self::Claude => "CLAUDE_API_KEY",
        }
    }
}

/// One exchange with a chat service: the whole history goes out, one reply comes back.
///
/// Implementations report transport, authentication, status and parsing failures as
/// [`DialecticError`]; callers only rely on the error's `Display` text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Which service this backend talks to.
    fn kind(&self) -> BackendKind;

    /// The model ID sent with each request.
    fn model_id(&self) -> &str;

    /// Send the conversation so far and return the assistant reply text.
    async fn send(&self, history: &[Message]) -> Result<String, DialecticError>;
}

/// Create the backend for `kind`, using the credentials in `config`.
///
/// A missing API key is not an error here; the backend reports it on its first
/// exchange.
#[allow(unused_variables)]
pub fn create_backend(
    kind: BackendKind,
    settings: &SessionSettings,
    config: &DialecticConfig,
) -> Result<Box<dyn ChatBackend>, DialecticError> {
    let api_key = config.get_api_key(kind.provider_key());
    let base_url = config.get_base_url(kind.provider_key());

    match kind {
        #[cfg(feature = "openai")]
        BackendKind::Gpt => {
            let model = match settings.model.as_deref() {
                Some(id) => id
                    .parse()
                    .unwrap_or_else(|_| crate::models::OpenAiModel::Custom(id.to_string())),
                None => crate::models::OpenAiModel::default(),
            };
            Ok(Box::new(
                openai::OpenAiBackend::new(model, api_key, base_url)
                    .with_max_tokens(settings.max_tokens),
            ))
        }
        #[cfg(feature = "anthropic")]
        BackendKind::Claude => {
            let model = match settings.model.as_deref() {
                Some(id) => id
                    .parse()
                    .unwrap_or_else(|_| crate::models::AnthropicModel::Custom(id.to_string())),
                None => crate::models::AnthropicModel::default(),
            };
            Ok(Box::new(
                anthropic::AnthropicBackend::new(model, api_key, base_url)
                    .with_max_tokens(settings.max_tokens),
            ))
        }
        #[allow(unreachable_patterns)]
        _ => Err(DialecticError::Configuration(format!(
            "Backend '{kind}' not enabled via feature flags"
        ))),
    }
}
