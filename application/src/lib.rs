//! Application layer for polyglot
//!
//! This crate contains the translation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RetryPolicy;
pub use ports::{
    completion_gateway::CompletionGateway,
    progress::{NoProgress, TranslationProgressNotifier, TranslationStage},
};
pub use use_cases::translate_code::{TranslateCodeUseCase, TranslateError};
