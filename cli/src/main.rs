//! CLI entrypoint for polyglot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use polyglot_application::{TranslateCodeUseCase, TranslateError};
use polyglot_domain::{ParsedTranslation, TranslationRequest};
use polyglot_infrastructure::{AnthropicCompletionGateway, ConfigLoader, FileConfig};
use polyglot_presentation::{
    Cli, Command, ConsoleFormatter, HttpSettings, OutputFormat, ProgressReporter, ServeArgs,
    SimpleProgress, TranslateArgs, build_router, demo, serve,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit code when the model reply did not follow the response protocol
const EXIT_PROTOCOL_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;
    debug!(
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        "Configuration loaded"
    );

    match cli.command {
        Some(Command::Translate(args)) => run_translate(&config, args).await,
        Some(Command::Serve(args)) => run_serve(&config, args).await,
        Some(Command::Demo) => {
            print!("{}", demo::render_demo()?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// === Dependency Injection ===
fn build_use_case(config: &FileConfig) -> Result<TranslateCodeUseCase> {
    let gateway = AnthropicCompletionGateway::new(&config.provider)?;
    info!(endpoint = %gateway.endpoint(), model = %gateway.model(), "Completion gateway ready");

    Ok(TranslateCodeUseCase::new(Arc::new(gateway))
        .with_retry_policy(config.retry.to_retry_policy()))
}

async fn run_translate(config: &FileConfig, args: TranslateArgs) -> Result<ExitCode> {
    let source_code = read_source(args.file.as_deref()).await?;

    let credential = match args.api_key {
        Some(key) => key,
        None => std::env::var(&config.provider.api_key_env).with_context(|| {
            format!(
                "No API key: pass --api-key or set {}",
                config.provider.api_key_env
            )
        })?,
    };

    let request = TranslationRequest::new(
        credential,
        &args.source_language,
        &args.target_language,
        source_code,
    )?;
    let use_case = build_use_case(config)?;

    let result = if args.quiet {
        use_case.execute(&request).await
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new(&args.source_language, &args.target_language);
        use_case.execute_with_progress(&request, &progress).await
    } else {
        use_case.execute_with_progress(&request, &SimpleProgress).await
    };

    match result {
        Ok(parsed) => {
            print!("{}", render(&parsed, args.output, request.target_language()));
            Ok(ExitCode::SUCCESS)
        }
        Err(TranslateError::Protocol(failure)) => {
            let output = match args.output {
                OutputFormat::Json => ConsoleFormatter::format_protocol_failure_json(&failure),
                OutputFormat::Full | OutputFormat::Code => {
                    ConsoleFormatter::format_protocol_failure(&failure)
                }
            };
            println!("{}", output);
            Ok(ExitCode::from(EXIT_PROTOCOL_ERROR))
        }
        Err(e) => Err(e.into()),
    }
}

fn render(parsed: &ParsedTranslation, format: OutputFormat, target_language: &str) -> String {
    match format {
        OutputFormat::Full => ConsoleFormatter::format(parsed, target_language),
        OutputFormat::Code => ConsoleFormatter::format_code_only(parsed),
        OutputFormat::Json => format!("{}\n", ConsoleFormatter::format_json(parsed)),
    }
}

/// Read the snippet from `path`, or stdin when it is absent or `-`
async fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read source code from stdin")?;
            Ok(source)
        }
    }
}

async fn run_serve(config: &FileConfig, args: ServeArgs) -> Result<ExitCode> {
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        max_body_bytes: config.server.max_body_bytes,
    };

    info!(addr = %bind, "Starting polyglot server");
    let router = build_router(build_use_case(config)?, settings);
    serve(router, &bind).await?;

    Ok(ExitCode::SUCCESS)
}
