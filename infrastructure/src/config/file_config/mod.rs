//! Raw configuration structures deserialized from TOML
//!
//! Every section uses `#[serde(default)]`, so a file only needs the keys it
//! overrides.

mod provider;
mod retry;
mod server;

pub use provider::FileProviderConfig;
pub use retry::FileRetryConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("provider.timeout_seconds cannot be 0")]
    InvalidProviderTimeout,

    #[error("retry.max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("server.request_timeout_seconds cannot be 0")]
    InvalidRequestTimeout,

    #[error(
        "provider.timeout_seconds ({provider}) must not be shorter than server.request_timeout_seconds ({server})"
    )]
    ProviderTimeoutBelowRequestTimeout { provider: u64, server: u64 },
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion service settings
    pub provider: FileProviderConfig,
    /// Retry settings for the completion call
    pub retry: FileRetryConfig,
    /// HTTP boundary settings
    pub server: FileServerConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if let Some(0) = self.provider.timeout_seconds {
            return Err(ConfigValidationError::InvalidProviderTimeout);
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidRequestTimeout);
        }
        if let Some(provider) = self.provider.timeout_seconds {
            let server = self.server.request_timeout_seconds;
            if provider < server {
                return Err(ConfigValidationError::ProviderTimeoutBelowRequestTimeout {
                    provider,
                    server,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:9000"
model = "claude-opus-4-20250514"
max_tokens = 4096
api_key_env = "POLYGLOT_TEST_KEY"
timeout_seconds = 180

[retry]
max_attempts = 3
backoff_base_ms = 100

[server]
bind = "0.0.0.0:8080"
request_timeout_seconds = 120
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:9000");
        assert_eq!(config.provider.model, "claude-opus-4-20250514");
        assert_eq!(config.provider.max_tokens, 4096);
        assert_eq!(config.provider.api_version, "2023-06-01");
        assert_eq!(config.provider.api_key_env, "POLYGLOT_TEST_KEY");
        assert_eq!(config.provider.timeout_seconds, Some(180));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_base_ms, 100);
        assert_eq!(config.retry.backoff_max_ms, 8_000);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout_seconds, 120);
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[provider]
model = "claude-3-5-haiku-20241022"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, "claude-3-5-haiku-20241022");
        // Defaults should apply
        assert_eq!(config.provider.base_url, "https://api.anthropic.com");
        assert_eq!(config.retry, FileRetryConfig::default());
        assert_eq!(config.server, FileServerConfig::default());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
        assert_eq!(config.provider.max_tokens, 8192);
        assert_eq!(config.provider.timeout_seconds, None);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.request_timeout_seconds, 300);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let mut config = FileConfig::default();
        config.provider.max_tokens = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxTokens)
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let mut config = FileConfig::default();
        config.provider.model = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        );
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = FileConfig::default();
        config.provider.base_url = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidProviderTimeout)
        );

        let mut config = FileConfig::default();
        config.server.request_timeout_seconds = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidRequestTimeout)
        );
    }

    #[test]
    fn test_validate_provider_timeout_shorter_than_request_timeout() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = Some(1);
        config.server.request_timeout_seconds = 300;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ProviderTimeoutBelowRequestTimeout {
                provider: 1,
                server: 300,
            })
        );

        config.provider.timeout_seconds = Some(300);
        assert!(config.validate().is_ok());

        config.provider.timeout_seconds = Some(600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_attempts() {
        let toml_str = "[retry]\nmax_attempts = 0\n";
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxAttempts)
        );
    }
}
