//! Completion gateway port
//!
//! Defines the interface for calling the external text-completion service.

use async_trait::async_trait;
use polyglot_domain::{CompletionOutcome, ComposedPrompt, Credential};

/// Gateway for single-turn completions
///
/// This port defines how the application layer reaches the completion
/// service. Implementations (adapters) live in the infrastructure layer.
///
/// One call is exactly one outbound request. Transport and HTTP failures are
/// returned as [`CompletionOutcome::Failure`], never as a Rust error, so the
/// caller sees the upstream status unchanged. Implementations must put the
/// credential in a request header only and must never log it.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &ComposedPrompt, credential: &Credential) -> CompletionOutcome;
}
