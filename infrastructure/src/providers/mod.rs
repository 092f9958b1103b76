//! Completion service adapters

pub mod anthropic;
