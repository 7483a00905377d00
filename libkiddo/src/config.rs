//! Configuration management for Kiddolearn

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Production content endpoint, used when no config file overrides it
pub const DEFAULT_API_URL: &str = "https://kiddo-learning-backend.onrender.com/api/v1/content";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Items requested per page
    pub page_size: u32,
    /// Overall request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Correct answers per day before play is gated
    pub daily_limit: u32,
    /// Problems per generated arithmetic batch
    pub batch_size: usize,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Load configuration if a config file exists, otherwise fall back to
    /// the built-in defaults. The tools work out of the box this way; a
    /// config file is only needed to change the endpoint or paths.
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                page_size: 10,
                timeout_secs: 30,
            },
            database: DatabaseConfig {
                path: "~/.local/share/kiddolearn/content.db".to_string(),
            },
            quiz: QuizConfig {
                daily_limit: 10,
                batch_size: 8,
            },
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("KIDDOLEARN_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("kiddolearn").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default_config();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.quiz.daily_limit, 10);
        assert_eq!(config.quiz.batch_size, 8);
        assert!(config.database.path.ends_with("content.db"));
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[api]
base_url = "http://localhost:3000/api/v1/content"
page_size = 5
timeout_secs = 10

[database]
path = "/tmp/kiddo-test.db"

[quiz]
daily_limit = 3
batch_size = 4
"#,
        );

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api/v1/content");
        assert_eq!(config.api.page_size, 5);
        assert_eq!(config.database.path, "/tmp/kiddo-test.db");
        assert_eq!(config.quiz.daily_limit, 3);
        assert_eq!(config.quiz.batch_size, 4);
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let result = Config::load_from_path(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api\nbase_url = ");
        let result = Config::load_from_path(&path);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_env_override() {
        std::env::set_var("KIDDOLEARN_CONFIG", "/tmp/custom-kiddo.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("KIDDOLEARN_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/custom-kiddo.toml"));
    }

    #[test]
    #[serial]
    fn test_load_or_default_without_file() {
        // Point the env override at a path that does not exist
        std::env::set_var("KIDDOLEARN_CONFIG", "/tmp/kiddo-definitely-missing.toml");
        let config = Config::load_or_default().unwrap();
        std::env::remove_var("KIDDOLEARN_CONFIG");

        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = Config::default_config();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.quiz.daily_limit, config.quiz.daily_limit);
    }
}
