//! One backend's rolling dialogue context.

use bon::Builder;
use tracing::{debug, warn};

use crate::provider::{BackendKind, ChatBackend};
use crate::types::Role;

use super::conversation::Conversation;

/// Default bound on the summed content length of a session's history.
pub const DEFAULT_HISTORY_BOUND: usize = 4000;
/// Default cap on reply tokens per request.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Per-backend settings used to build a session.
#[derive(Debug, Clone, Builder)]
pub struct SessionSettings {
    /// Model ID override; the backend's default model when `None`.
    pub model: Option<String>,
    #[builder(default = DEFAULT_HISTORY_BOUND)]
    pub history_bound: usize,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: None,
            history_bound: DEFAULT_HISTORY_BOUND,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// `true` when `text` is a diagnostic standing in for a failed exchange.
    pub failed: bool,
}

/// A backend plus the history it has seen.
///
/// Each session owns its history; two sessions never share messages, they only
/// see each other's replies as their own user input.
pub struct ConversationSession {
    backend: Box<dyn ChatBackend>,
    history_bound: usize,
    history: Conversation,
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("backend", &self.backend.kind())
            .field("model", &self.backend.model_id())
            .field("history_bound", &self.history_bound)
            .field("history", &self.history.len())
            .finish()
    }
}

impl ConversationSession {
    pub fn new(backend: Box<dyn ChatBackend>, history_bound: usize) -> Self {
        Self {
            backend,
            history_bound,
            history: Conversation::new(),
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    pub fn history_bound(&self) -> usize {
        self.history_bound
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    /// Append a message to the history without talking to the backend.
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(role, content);
    }

    /// Evict the oldest messages while the history exceeds its bound.
    pub fn trim_history(&mut self) -> usize {
        let evicted = self.history.trim_to(self.history_bound);
        if evicted > 0 {
            debug!(
                backend = %self.kind(),
                evicted,
                remaining = self.history.len(),
                chars = self.history.total_chars(),
                "Trimmed conversation history"
            );
        }
        evicted
    }

    /// Send `input` and return the reply text.
    ///
    /// Never fails: a backend error comes back as a diagnostic reply that is
    /// recorded in the history like any other answer.
    pub async fn send(&mut self, input: impl Into<String>) -> String {
        self.send_reply(input).await.text
    }

    /// Like [`send`](Self::send), but reports whether the exchange failed.
    pub async fn send_reply(&mut self, input: impl Into<String>) -> Reply {
        self.history.add_user_message(input);
        self.trim_history();

        let reply = match self.backend.send(self.history.messages()).await {
            Ok(text) => Reply {
                text,
                failed: false,
            },
            Err(err) => {
                warn!(
                    backend = %self.kind(),
                    model = self.model_id(),
                    error = %err,
                    "Exchange failed; continuing with diagnostic reply"
                );
                Reply {
                    text: err.diagnostic_reply(),
                    failed: true,
                }
            }
        };

        self.history.add_assistant_message(reply.text.clone());
        reply
    }

    /// Drop the whole history. Never called by [`send`](Self::send).
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
