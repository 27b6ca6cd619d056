//! Turn orchestration: two sessions answering each other for a fixed number of rounds.
//!
//! A [`Dialogue`] moves `Idle → Running → Done`. Each round the first backend
//! answers the current payload, then the second backend answers that reply; the
//! second reply becomes the payload for the next round. A run of `N` rounds makes
//! exactly `2 × N` exchanges and nothing ends it early: failed exchanges come back
//! from the session as diagnostic replies and are relayed like any other text.

pub mod turn;

pub use turn::{Transcript, Turn, TurnSink};

use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::DialecticConfig;
use crate::error::{DialecticError, Result};
use crate::provider::BackendKind;
use crate::session::{self, ConversationSession, SessionSettings};

/// Which backend speaks first in every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    pub first: BackendKind,
    pub second: BackendKind,
}

impl TurnOrder {
    pub fn starting_with(first: BackendKind) -> Self {
        Self {
            first,
            second: first.other(),
        }
    }
}

impl FromStr for TurnOrder {
    type Err = DialecticError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<BackendKind>()
            .map(Self::starting_with)
            .map_err(|_| {
                DialecticError::Configuration(format!(
                    "Unknown starting backend '{s}' (expected 'gpt' or 'claude')"
                ))
            })
    }
}

/// Inputs that start a dialogue, as given on the command line.
#[derive(Debug, Clone)]
pub struct DialogueSettings {
    /// Identifier of the backend that speaks first (`gpt` or `claude`).
    pub starting_backend: String,
    /// Number of rounds; each round is one turn per backend.
    pub iterations: u32,
    /// First payload, sent to the starting backend.
    pub seed: String,
}

impl DialogueSettings {
    /// Check the settings before any session is created.
    pub fn validate(&self) -> Result<TurnOrder> {
        let order = self.starting_backend.parse()?;
        if self.iterations == 0 {
            return Err(DialecticError::Configuration(
                "Iteration count must be a positive integer".into(),
            ));
        }
        Ok(order)
    }
}

/// Lifecycle of a [`Dialogue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    Idle,
    Running { remaining: u32 },
    Done,
}

/// Alternates two conversation sessions for a bounded number of rounds.
pub struct Dialogue {
    id: Uuid,
    order: TurnOrder,
    /// Sessions in turn order: `[first, second]`.
    sessions: [ConversationSession; 2],
    iterations: u32,
    seed: String,
    state: DialogueState,
    sink: Option<TurnSink>,
}

impl std::fmt::Debug for Dialogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialogue")
            .field("id", &self.id)
            .field("order", &self.order)
            .field("sessions", &self.sessions)
            .field("iterations", &self.iterations)
            .field("state", &self.state)
            .finish()
    }
}

impl Dialogue {
    /// Arrange `sessions` according to `settings`.
    ///
    /// Fails with a configuration error if the settings are invalid or the two
    /// sessions do not cover both backends.
    pub fn from_settings(
        settings: &DialogueSettings,
        sessions: [ConversationSession; 2],
    ) -> Result<Self> {
        let order = settings.validate()?;
        let [a, b] = sessions;
        let sessions = if a.kind() == order.first {
            [a, b]
        } else if b.kind() == order.first {
            [b, a]
        } else {
            return Err(DialecticError::Configuration(format!(
                "No session for starting backend '{}'",
                order.first
            )));
        };
        if sessions[1].kind() != order.second {
            return Err(DialecticError::Configuration(format!(
                "No session for second backend '{}'",
                order.second
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            order,
            sessions,
            iterations: settings.iterations,
            seed: settings.seed.clone(),
            state: DialogueState::Idle,
            sink: None,
        })
    }

    /// Validate `settings`, then open one session per backend.
    pub fn open(
        settings: &DialogueSettings,
        gpt: &SessionSettings,
        claude: &SessionSettings,
        config: &DialecticConfig,
    ) -> Result<Self> {
        settings.validate()?;
        let sessions = [
            session::open_session(BackendKind::Gpt, gpt, config)?,
            session::open_session(BackendKind::Claude, claude, config)?,
        ];
        Self::from_settings(settings, sessions)
    }

    /// Call `sink` with every turn as soon as it is produced.
    pub fn with_turn_sink(mut self, sink: TurnSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn order(&self) -> TurnOrder {
        self.order
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// The session that talks to `kind`, if any.
    pub fn session(&self, kind: BackendKind) -> Option<&ConversationSession> {
        self.sessions.iter().find(|s| s.kind() == kind)
    }

    /// Run every round and return the transcript.
    ///
    /// Only an `Idle` dialogue can run; a second call is an error.
    pub async fn run(&mut self) -> Result<Transcript> {
        if self.state != DialogueState::Idle {
            return Err(DialecticError::InvalidState(format!(
                "Dialogue {} already started ({:?})",
                self.id, self.state
            )));
        }

        let span = info_span!(
            "dialogue",
            id = %self.id,
            first = %self.order.first,
            iterations = self.iterations,
        );
        self.run_rounds().instrument(span).await
    }

    async fn run_rounds(&mut self) -> Result<Transcript> {
        let mut transcript = Transcript::new(self.id);
        let mut payload = self.seed.clone();
        let mut remaining = self.iterations;
        let mut round = 0;
        self.state = DialogueState::Running { remaining };

        while remaining > 0 {
            round += 1;
            info!(round, remaining, "Starting round");

            for session in self.sessions.iter_mut() {
                let reply = session.send_reply(payload).await;
                let turn = Turn::new(round, session.kind(), reply);

                info!(
                    round,
                    backend = %turn.backend,
                    failed = turn.failed,
                    chars = turn.reply.chars().count(),
                    "Turn complete"
                );
                if let Some(sink) = &self.sink {
                    sink(&turn);
                }

                payload = turn.reply.clone();
                transcript.push(turn);
            }

            remaining -= 1;
            self.state = DialogueState::Running { remaining };
        }

        self.state = DialogueState::Done;
        info!(turns = transcript.len(), "Dialogue finished");
        Ok(transcript)
    }
}

/// Sink that forwards turns to a plain closure.
pub fn turn_sink(f: impl Fn(&Turn) + Send + Sync + 'static) -> TurnSink {
    Arc::new(f)
}
