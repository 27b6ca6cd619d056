//! Anthropic model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Anthropic models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AnthropicModel {
    #[strum(serialize = "claude-3-haiku-20240307")]
    Claude3Haiku,
    #[strum(serialize = "claude-3-sonnet-20240229")]
    Claude3Sonnet,
    #[strum(serialize = "claude-3-opus-20240229")]
    Claude3Opus,
    #[strum(serialize = "claude-3-5-haiku-20241022")]
    ClaudeHaiku35,
    #[strum(serialize = "claude-sonnet-4-20250514")]
    ClaudeSonnet4,
    /// Custom/unknown Anthropic model by ID.
    #[strum(default)]
    Custom(String),
}

impl Default for AnthropicModel {
    fn default() -> Self {
        Self::Claude3Haiku
    }
}

impl AnthropicModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Claude3Haiku => "claude-3-haiku-20240307",
            Self::Claude3Sonnet => "claude-3-sonnet-20240229",
            Self::Claude3Opus => "claude-3-opus-20240229",
            Self::ClaudeHaiku35 => "claude-3-5-haiku-20241022",
            Self::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            Self::Custom(s) => s,
        }
    }
}
