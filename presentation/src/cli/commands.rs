//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for translation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Translated code, synthesis points, key insight and trade-offs
    #[default]
    Full,
    /// Only the translated code
    Code,
    /// JSON output
    Json,
}

/// CLI arguments for polyglot
#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(author, version, about = "Translate code between languages, idiom for idiom")]
#[command(long_about = r#"
Polyglot translates a code snippet into idiomatic code in another language
using the "Cultural Grammar Synthesis" method: the model identifies the
structural invariants of the source, then expresses them the way the target
language natively would.

Every translation comes back with the synthesis points that map source
patterns to target patterns, a key insight, and the trade-offs involved.

Configuration files are loaded from (in priority order):
1. POLYGLOT_* environment variables (e.g. POLYGLOT_PROVIDER__MODEL)
2. --config <path>     Explicit config file
3. ./polyglot.toml     Project-level config
4. ~/.config/polyglot/config.toml   Global config

Example:
  polyglot translate --from JavaScript --to Haskell repository.js
  cat main.py | polyglot translate --from Python --to Rust --output code
  polyglot serve --bind 0.0.0.0:3000
  polyglot demo
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a source file (or stdin) into another language
    Translate(TranslateArgs),
    /// Serve the translation endpoint over HTTP
    Serve(ServeArgs),
    /// Print a canned JavaScript to Haskell translation (no network)
    Demo,
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Language of the input code
    #[arg(long = "from", value_name = "LANG")]
    pub source_language: String,

    /// Language to translate into
    #[arg(long = "to", value_name = "LANG")]
    pub target_language: String,

    /// File to translate; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// API key (defaults to the variable named by provider.api_key_env)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_translate() {
        let cli = Cli::try_parse_from([
            "polyglot",
            "-vv",
            "translate",
            "--from",
            "JavaScript",
            "--to",
            "Haskell",
            "repo.js",
            "--output",
            "code",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Translate(args)) => {
                assert_eq!(args.source_language, "JavaScript");
                assert_eq!(args.target_language, "Haskell");
                assert_eq!(args.file, Some(PathBuf::from("repo.js")));
                assert_eq!(args.output, OutputFormat::Code);
                assert!(args.api_key.is_none());
                assert!(!args.quiet);
            }
            other => panic!("expected translate, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_requires_languages() {
        assert!(Cli::try_parse_from(["polyglot", "translate", "--from", "Python"]).is_err());
    }

    #[test]
    fn test_parse_serve_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "polyglot",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["polyglot", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
