//! Turn records produced by a dialogue run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::provider::BackendKind;
use crate::session::Reply;

/// Callback invoked with each turn as soon as it completes.
pub type TurnSink = Arc<dyn Fn(&Turn) + Send + Sync>;

/// One backend's reply within a round.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Turn {
    /// 1-based round number.
    pub round: u32,
    pub backend: BackendKind,
    pub reply: String,
    /// The reply is a diagnostic for a failed exchange.
    pub failed: bool,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(round: u32, backend: BackendKind, reply: Reply) -> Self {
        Self {
            round,
            backend,
            reply: reply.text,
            failed: reply.failed,
            at: Utc::now(),
        }
    }
}

/// Every turn of a finished run, in the order they happened.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub dialogue_id: Uuid,
    pub turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(dialogue_id: Uuid) -> Self {
        Self {
            dialogue_id,
            turns: Vec::new(),
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The reply that ended the dialogue.
    pub fn last_reply(&self) -> Option<&str> {
        self.turns.last().map(|t| t.reply.as_str())
    }

    pub fn failed_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.failed)
    }
}
