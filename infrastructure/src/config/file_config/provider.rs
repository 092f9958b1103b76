//! Completion service configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Anthropic Messages API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the completion service; `/v1/messages` is appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on generated tokens per reply.
    pub max_tokens: u32,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// Environment variable the CLI reads the credential from.
    pub api_key_env: String,
    /// Per-request client timeout. Unset means no client-side timeout.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 8192,
            api_version: "2023-06-01".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            timeout_seconds: None,
        }
    }
}

impl FileProviderConfig {
    /// Full URL of the messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}
