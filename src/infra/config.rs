// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Adds `Secure` to issued session cookies. Enable behind HTTPS.
    pub secure_cookies: bool,
    pub cookie_max_age_secs: u64,
    pub cors_origins: Vec<String>,
    /// Bearer token guarding the admin listing.
    pub admin_token: Option<String>,
    /// Serve the admin listing without a token. Ignored when a token is set.
    pub admin_open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            secure_cookies: false,
            cookie_max_age_secs: 24 * 60 * 60,
            cors_origins: vec![
                "http://localhost:3000".into(),
                "http://127.0.0.1:3000".into(),
            ],
            admin_token: None,
            admin_open: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            temperature: 0.0,
            max_tokens: 848,
            max_retries: 1,
            retry_delay_ms: 0,
            timeout_secs: 60,
        }
    }
}

impl CompletionConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file. Defaults to the data directory.
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn db_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(paths::db_path)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.server.port, 3000);
        assert_eq!(c.server.cookie_max_age_secs, 86_400);
        assert!(!c.server.secure_cookies);
        assert!(c.server.admin_token.is_none());
        assert_eq!(c.completion.model, "gpt-4o");
        assert_eq!(c.completion.max_tokens, 848);
        assert_eq!(c.completion.max_retries, 1);
        assert_eq!(c.completion.retry_delay_ms, 0);
        assert!(c.completion.temperature.abs() < f32::EPSILON);
        assert!(c.store.path.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.completion.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_parse_partial_section_keeps_defaults() {
        let toml_str = r#"
[server]
port = 8080
secure_cookies = true

[completion]
model = "gpt-4o-mini"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.secure_cookies);
        assert_eq!(config.server.cookie_max_age_secs, 86_400);
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.max_tokens, 848);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9000
cors_origins = ["https://colors.example.com"]
admin_token = "s3cret"

[completion]
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"
temperature = 0.2
max_tokens = 256
max_retries = 2
retry_delay_ms = 250
timeout_secs = 10

[store]
path = "/tmp/tincture.db"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins.len(), 1);
        assert_eq!(config.server.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(config.completion.base_url, "http://localhost:11434/v1");
        assert_eq!(config.completion.max_retries, 2);
        assert_eq!(config.completion.retry_delay_ms, 250);
        assert_eq!(
            config.store.db_path(),
            PathBuf::from("/tmp/tincture.db")
        );
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.server.port, config.server.port);
        assert_eq!(deserialized.completion.model, config.completion.model);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 4242\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 4242);
    }

    #[test]
    fn test_api_key_missing_env() {
        let c = CompletionConfig {
            api_key_env: "TINCTURE_TEST_UNSET_KEY_VAR".into(),
            ..CompletionConfig::default()
        };
        assert!(c.api_key().is_none());
    }
}
