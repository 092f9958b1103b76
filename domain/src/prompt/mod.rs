//! Prompt domain
//!
//! Builds the translation prompt, including the rendered response protocol
//! and the fenced source snippet.

mod template;

pub use template::{ComposedPrompt, TranslationPromptTemplate, fence_for};
