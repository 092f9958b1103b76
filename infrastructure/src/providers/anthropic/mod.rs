//! Anthropic Messages API provider
//!
//! Implements the `CompletionGateway` port over `reqwest`: one `POST
//! /v1/messages` per call, credential in the `x-api-key` header.

mod error;
mod gateway;
mod types;

pub use error::AnthropicError;
pub use gateway::AnthropicCompletionGateway;
