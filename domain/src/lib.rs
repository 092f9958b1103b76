//! Domain layer for polyglot
//!
//! This crate contains the core translation logic: request validation, the
//! response protocol, prompt composition and reply parsing. It performs no
//! I/O and has no dependencies on infrastructure or presentation concerns.
//!
//! # Pipeline
//!
//! 1. [`TranslationRequest::from_value`] validates the inbound record
//! 2. [`TranslationPromptTemplate::compose`] builds the prompt
//! 3. the completion service answers (outside this crate) with a
//!    [`CompletionOutcome`]
//! 4. [`ResponseParser::parse`] turns the reply into a [`ParsedTranslation`]

pub mod core;
pub mod prompt;
pub mod protocol;
pub mod translation;

// Re-export commonly used types
pub use core::error::DomainError;
pub use prompt::{ComposedPrompt, TranslationPromptTemplate};
pub use protocol::{Marker, ResponseParser, ResponseProtocol, parse_translation_response};
pub use translation::{
    outcome::CompletionOutcome,
    request::{Credential, TranslationRequest},
    result::{ParseFailure, ParsedTranslation, ProtocolViolation, SynthesisPoint, TradeOffs},
};
