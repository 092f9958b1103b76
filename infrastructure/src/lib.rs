//! Infrastructure layer for polyglot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileProviderConfig, FileRetryConfig,
    FileServerConfig,
};
pub use providers::anthropic::{AnthropicCompletionGateway, AnthropicError};
