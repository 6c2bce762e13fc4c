//! ai-showcase: HTTP front end for a local Ollama server
//!
//! Serves chat, health, model listing and informational endpoints, relaying
//! chat to Ollama's `/api/generate`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ai_showcase::{
    config::{AppConfig, CliOverrides},
    ollama::{build_http_client, OllamaClient},
    run_server,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Parser)]
#[command(name = "ai-showcase")]
#[command(version)]
#[command(about = "HTTP front end for a local Ollama server")]
#[command(long_about = "
ai-showcase exposes a small JSON API on top of a local Ollama server:
  GET  /         API information
  GET  /health   Ollama connectivity
  GET  /models   Installed models
  POST /chat     Ask a question, optionally with context lines
  GET  /demo     Feature overview
  GET  /docs     Swagger UI (OpenAPI document at /openapi.json)

Configuration comes from an optional config.yaml, then OLLAMA_BASE_URL and
DEFAULT_MODEL, then command-line flags.

Example usage:
  ai-showcase run --port 8000
  OLLAMA_BASE_URL=http://gpu-box:11434 ai-showcase test-backend
")]
struct Cli {
    /// Path to config file (defaults to config.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Run {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override listen host
        #[arg(long)]
        host: Option<String>,
        /// Override Ollama URL (e.g., "http://localhost:11434")
        #[arg(long)]
        ollama_url: Option<String>,
        /// Override default model
        #[arg(long)]
        default_model: Option<String>,
    },

    /// Validate and print the resolved configuration
    CheckConfig,

    /// Test connection to the Ollama server
    TestBackend,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.log_level, cli.log_format);

    match cli.command {
        Commands::Run {
            port,
            host,
            ollama_url,
            default_model,
        } => {
            let mut config = load_config_or_exit(cli.config.as_deref());
            config.apply_cli_overrides(CliOverrides {
                port,
                host,
                ollama_url,
                default_model,
            });
            validate_or_exit(&config);

            run_server(config).await?;
        }
        Commands::CheckConfig => {
            check_config(cli.config.as_deref());
        }
        Commands::TestBackend => {
            test_backend(cli.config.as_deref()).await?;
        }
    }

    Ok(())
}

fn init_logging(level: Option<LogLevel>, format: LogFormat) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level.to_string()),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Validate configuration file and environment
fn check_config(config_path: Option<&Path>) {
    let config = load_config_or_exit(config_path);
    validate_or_exit(&config);

    println!("✓ Configuration is valid\n");
    println!("Server:");
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  Max body: {} bytes", config.server.max_body_bytes);
    println!("\nOllama:");
    println!("  URL: {}", config.ollama.base_url());
    println!("  Default model: {}", config.ollama.default_model);
    println!("  Timeouts:");
    println!("    health: {}s", config.ollama.health_timeout_seconds);
    println!("    models: {}s", config.ollama.models_timeout_seconds);
    println!("    chat:   {}s", config.ollama.chat_timeout_seconds);
}

/// Test connection to Ollama
async fn test_backend(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_exit(config_path);
    validate_or_exit(&config);

    let client = OllamaClient::new(build_http_client()?, config.ollama.base_url());
    println!("Testing connection to Ollama: {}/api/tags", client.base_url());

    let timeout = Duration::from_secs(config.ollama.health_timeout_seconds);
    match client.tags(timeout).await {
        Ok(tags) => {
            println!("✓ Ollama is reachable");
            println!("  Installed models: {}", tags.models.len());
            for name in tags.names().iter().take(5) {
                println!("    - {}", name);
            }
            let default_installed = tags
                .names()
                .iter()
                .any(|n| n == &config.ollama.default_model);
            if !default_installed {
                println!(
                    "\n  Default model '{}' is not installed. Try: ollama pull {}",
                    config.ollama.default_model, config.ollama.default_model
                );
            }
        }
        Err(e) => {
            println!("✗ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load configuration (file, then environment) or exit with error
fn load_config_or_exit(config_path: Option<&Path>) -> AppConfig {
    match AppConfig::load_or_default(config_path) {
        Ok(mut config) => {
            config.apply_env_overrides();
            config
        }
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

fn validate_or_exit(config: &AppConfig) {
    if let Err(e) = config.validate() {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
