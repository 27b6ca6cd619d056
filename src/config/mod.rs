//! Configuration: provider credentials and endpoints (code > env).

use std::collections::HashMap;
use std::fmt;

/// Provider key for the OpenAI backend.
pub const OPENAI: &str = "openai";
/// Provider key for the Anthropic backend.
pub const ANTHROPIC: &str = "anthropic";

/// Credentials and endpoint overrides for both backends.
///
/// Built once in `main` (usually via [`DialecticConfig::from_env`]) and handed to
/// [`crate::provider::create_backend`], which passes each backend its own key.
/// Nothing in the library reads the process environment after that.
#[derive(Clone, Default)]
pub struct DialecticConfig {
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
}

impl fmt::Debug for DialecticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<&str> = self.api_keys.keys().map(String::as_str).collect();
        providers.sort_unstable();
        f.debug_struct("DialecticConfig")
            .field("api_keys", &providers)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl DialecticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (OPENAI_API_KEY, CLAUDE_API_KEY, ...).
    ///
    /// When several variables map to the same provider, the first one listed wins.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        let env_mappings = [
            ("OPENAI_API_KEY", OPENAI),
            ("CLAUDE_API_KEY", ANTHROPIC),
            ("ANTHROPIC_API_KEY", ANTHROPIC),
        ];

        for (env_var, provider) in &env_mappings {
            if config.api_keys.contains_key(*provider) {
                continue;
            }
            if let Ok(key) = std::env::var(env_var) {
                if !key.is_empty() {
                    config.set_api_key(provider, key);
                }
            }
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", OPENAI),
            ("ANTHROPIC_BASE_URL", ANTHROPIC),
        ];

        for (env_var, provider) in &url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(provider, url);
            }
        }

        config
    }

    pub fn set_api_key(&mut self, provider: &str, key: String) {
        self.api_keys.insert(provider.to_string(), key);
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.get(provider).cloned()
    }

    pub fn set_base_url(&mut self, provider: &str, url: String) {
        self.base_urls.insert(provider.to_string(), url);
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.get(provider).cloned()
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.api_keys.contains_key(provider)
    }
}
