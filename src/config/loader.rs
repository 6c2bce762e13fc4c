use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file deserializes to null, which means "all defaults"
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/config.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let file = write_temp("invalid: yaml: content: [");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let file = write_temp(
            r#"
server:
  port: 9000
  host: "127.0.0.1"

ollama:
  url: "http://gpu-box:11434"
  default_model: "llama3.2"
  health_timeout_seconds: 2
  models_timeout_seconds: 4
  chat_timeout_seconds: 120
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ollama.url, "http://gpu-box:11434");
        assert_eq!(config.ollama.default_model, "llama3.2");
        assert_eq!(config.ollama.health_timeout_seconds, 2);
        assert_eq!(config.ollama.models_timeout_seconds, 4);
        assert_eq!(config.ollama.chat_timeout_seconds, 120);
    }

    #[test]
    fn test_load_config_partial() {
        let file = write_temp(
            r#"
ollama:
  default_model: "qwen2.5"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert_eq!(config.ollama.default_model, "qwen2.5");
        assert_eq!(config.ollama.chat_timeout_seconds, 60);
    }

    #[test]
    fn test_load_config_empty_file() {
        let file = write_temp("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.ollama.default_model, "gemma3:1b");
    }

    #[test]
    fn test_config_from_file() {
        let result = AppConfig::from_file("/nonexistent/path.yaml");
        assert!(result.is_err());
    }
}
