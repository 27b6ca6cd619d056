//! Per-backend conversation sessions.

pub mod conversation;
pub mod session;

pub use conversation::Conversation;
pub use session::{
    ConversationSession, Reply, SessionSettings, DEFAULT_HISTORY_BOUND, DEFAULT_MAX_TOKENS,
};

use crate::config::DialecticConfig;
use crate::error::Result;
use crate::provider::{self, BackendKind};

/// Build the session for `kind` from its settings and the shared config.
pub fn open_session(
    kind: BackendKind,
    settings: &SessionSettings,
    config: &DialecticConfig,
) -> Result<ConversationSession> {
    let backend = provider::create_backend(kind, settings, config)?;
    Ok(ConversationSession::new(backend, settings.history_bound))
}
