//! Command-line surface for the `dialectic` binary.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::dialogue::{DialogueSettings, Turn};
use crate::models::{AnthropicModel, OpenAiModel};
use crate::provider::BackendKind;
use crate::session::{SessionSettings, DEFAULT_HISTORY_BOUND, DEFAULT_MAX_TOKENS};

/// Dialogue between claude and chatgpt for n number of iterations
#[derive(Parser, Debug)]
#[command(name = "dialectic", version)]
pub struct Cli {
    /// The model that speaks first: claude or gpt
    #[arg(short, long)]
    pub model: String,

    /// The number of iterations between the two models
    #[arg(short, long)]
    pub iterations: u32,

    /// The starting message of the conversation
    #[arg(short, long)]
    pub start: String,

    /// OpenAI model ID
    #[arg(long)]
    pub gpt_model: Option<String>,

    /// Anthropic model ID
    #[arg(long)]
    pub claude_model: Option<String>,

    /// Max summed characters of GPT's history before the oldest messages are dropped
    #[arg(long, default_value_t = DEFAULT_HISTORY_BOUND)]
    pub gpt_history_bound: usize,

    /// Max summed characters of Claude's history before the oldest messages are dropped
    #[arg(long, default_value_t = DEFAULT_HISTORY_BOUND)]
    pub claude_history_bound: usize,

    /// Max tokens per reply
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl Cli {
    pub fn dialogue_settings(&self) -> DialogueSettings {
        DialogueSettings {
            starting_backend: self.model.clone(),
            iterations: self.iterations,
            seed: self.start.clone(),
        }
    }

    pub fn session_settings(&self, kind: BackendKind) -> SessionSettings {
        let (model, history_bound) = match kind {
            BackendKind::Gpt => (
                self.gpt_model
                    .clone()
                    .unwrap_or_else(|| OpenAiModel::default().to_string()),
                self.gpt_history_bound,
            ),
            BackendKind::Claude => (
                self.claude_model
                    .clone()
                    .unwrap_or_else(|| AnthropicModel::default().to_string()),
                self.claude_history_bound,
            ),
        };
        SessionSettings::builder()
            .model(model)
            .history_bound(history_bound)
            .max_tokens(self.max_tokens)
            .build()
    }
}

/// Console rendering of one turn: the backend label, a blank line, the reply.
pub fn format_turn(turn: &Turn) -> String {
    format!("{}:\n\n{}\n", turn.backend.label(), turn.reply)
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`), keeping stdout for the dialogue.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
