//! Presentation layer for polyglot
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP boundary.

pub mod cli;
pub mod demo;
pub mod http;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, ServeArgs, TranslateArgs};
pub use http::{HttpSettings, ServeError, build_router, serve};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
