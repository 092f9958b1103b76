//! HTTP boundary configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address for `polyglot serve`
    pub bind: String,
    /// Overall deadline for one translation request
    pub request_timeout_seconds: u64,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            request_timeout_seconds: 300,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl FileServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
