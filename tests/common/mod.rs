//! Shared test helpers and scripted backend.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dialectic::error::DialecticError;
use dialectic::provider::{BackendKind, ChatBackend};
use dialectic::session::ConversationSession;
use dialectic::types::Message;

/// Every exchange seen by a set of scripted backends, in call order.
pub type Calls = Arc<Mutex<Vec<Call>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub backend: BackendKind,
    pub history: Vec<Message>,
}

impl Call {
    /// The payload this exchange answered.
    pub fn input(&self) -> &str {
        self.history
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// A backend that replays queued replies and records what it was sent.
pub struct ScriptedBackend {
    kind: BackendKind,
    replies: Mutex<VecDeque<Result<String, DialecticError>>>,
    calls: Calls,
}

impl ScriptedBackend {
    pub fn new(kind: BackendKind, calls: &Calls) -> Self {
        Self {
            kind,
            replies: Mutex::new(VecDeque::new()),
            calls: Arc::clone(calls),
        }
    }

    /// Queue a text reply.
    pub fn reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a failed exchange.
    pub fn fail(self, error: DialecticError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn into_session(self, history_bound: usize) -> ConversationSession {
        ConversationSession::new(Box::new(self), history_bound)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn send(&self, history: &[Message]) -> Result<String, DialecticError> {
        self.calls.lock().unwrap().push(Call {
            backend: self.kind,
            history: history.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("{} has nothing more to say", self.kind.label())))
    }
}

pub fn new_calls() -> Calls {
    Arc::new(Mutex::new(Vec::new()))
}
