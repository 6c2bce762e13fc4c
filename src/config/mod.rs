mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Environment variable overriding `ollama.url`
pub const ENV_OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";
/// Environment variable overriding `ollama.default_model`
pub const ENV_DEFAULT_MODEL: &str = "DEFAULT_MODEL";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// Listen address of the showcase API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Largest accepted request body; bigger chat bodies get 413
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Upstream Ollama server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaConfig {
    /// Full Ollama URL (e.g., "http://localhost:11434")
    #[serde(default = "default_ollama_url")]
    pub url: String,
    /// Model used when a chat request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_seconds: u64,
    #[serde(default = "default_models_timeout")]
    pub models_timeout_seconds: u64,
    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_seconds: u64,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "gemma3:1b".to_string()
}

fn default_health_timeout() -> u64 {
    5
}

fn default_models_timeout() -> u64 {
    10
}

fn default_chat_timeout() -> u64 {
    60
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            default_model: default_model(),
            health_timeout_seconds: default_health_timeout(),
            models_timeout_seconds: default_models_timeout(),
            chat_timeout_seconds: default_chat_timeout(),
        }
    }
}

impl OllamaConfig {
    /// Returns the base URL with trailing slash stripped
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Values given on the command line; `None` keeps the loaded value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub ollama_url: Option<String>,
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration with fallback to default locations, then built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["config.yaml", "config.yml", "./config/config.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                tracing::debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply `OLLAMA_BASE_URL` and `DEFAULT_MODEL` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_OLLAMA_BASE_URL) {
            tracing::debug!(url = %url, "Ollama URL taken from {}", ENV_OLLAMA_BASE_URL);
            self.ollama.url = url;
        }
        if let Some(model) = non_empty(ENV_DEFAULT_MODEL) {
            tracing::debug!(model = %model, "Default model taken from {}", ENV_DEFAULT_MODEL);
            self.ollama.default_model = model;
        }
    }

    /// Apply command-line flags; they take precedence over file and environment
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(url) = overrides.ollama_url {
            self.ollama.url = url;
        }
        if let Some(model) = overrides.default_model {
            self.ollama.default_model = model;
        }
    }

    /// Check the values that cannot be expressed through serde alone
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.ollama.url)
            .map_err(|e| ConfigError::Validation(format!("invalid Ollama URL '{}': {}", self.ollama.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "Ollama URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation("max_body_bytes must be greater than zero".to_string()));
        }

        if self.ollama.default_model.trim().is_empty() {
            return Err(ConfigError::Validation("default model must not be empty".to_string()));
        }

        let timeouts = [
            ("health_timeout_seconds", self.ollama.health_timeout_seconds),
            ("models_timeout_seconds", self.ollama.models_timeout_seconds),
            ("chat_timeout_seconds", self.ollama.chat_timeout_seconds),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Validation(format!("{} must be greater than zero", name)));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
