//! Error types for the Anthropic adapter

use thiserror::Error;

/// Errors raised while setting up the adapter.
///
/// Request-time failures are reported as `CompletionOutcome::Failure`
/// instead, so they keep their HTTP status.
#[derive(Error, Debug)]
pub enum AnthropicError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
