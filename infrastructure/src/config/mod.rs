//! Configuration file loading for polyglot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `POLYGLOT_` (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./polyglot.toml` or `./.polyglot.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/polyglot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileProviderConfig, FileRetryConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
