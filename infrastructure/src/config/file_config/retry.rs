//! Retry configuration from TOML (`[retry]` section)

use polyglot_application::RetryPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Total attempts per translation, including the first (default: 1)
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            backoff_base_ms: policy.backoff_base_ms,
            backoff_max_ms: policy.backoff_max_ms,
        }
    }
}

impl FileRetryConfig {
    /// Convert to the application-layer policy
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_backoff_base_ms(self.backoff_base_ms)
            .with_backoff_max_ms(self.backoff_max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy_default() {
        assert_eq!(
            FileRetryConfig::default().to_retry_policy(),
            RetryPolicy::default()
        );
    }

    #[test]
    fn test_to_retry_policy() {
        let config = FileRetryConfig {
            max_attempts: 4,
            backoff_base_ms: 250,
            backoff_max_ms: 2_000,
        };
        let policy = config.to_retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.backoff_base_ms, 250);
        assert_eq!(policy.backoff_max_ms, 2_000);
    }
}
