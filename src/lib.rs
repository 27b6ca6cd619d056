//! Dialectic: relay a conversation between two chat models.
//!
//! Two [`session::ConversationSession`]s, one per backend, each keep their own
//! bounded history. A [`dialogue::Dialogue`] feeds every reply to the other
//! backend for a fixed number of rounds.
//!
//! # Quick Start
//!
//! ```no_run
//! use dialectic::config::DialecticConfig;
//! use dialectic::dialogue::{Dialogue, DialogueSettings};
//! use dialectic::session::SessionSettings;
//!
//! # async fn example() -> dialectic::error::Result<()> {
//! let settings = DialogueSettings {
//!     starting_backend: "gpt".into(),
//!     iterations: 2,
//!     seed: "Is free will compatible with determinism?".into(),
//! };
//! let config = DialecticConfig::from_env();
//! let defaults = SessionSettings::default();
//! let mut dialogue = Dialogue::open(&settings, &defaults, &defaults, &config)?;
//! for turn in dialogue.run().await?.turns {
//!     println!("{}: {}", turn.backend.label(), turn.reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dialogue;
pub mod error;
pub mod models;
pub mod provider;
pub mod session;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
