//! Client configuration
//!
//! Values are resolved in this order: command-line flag, `CLAUSESCAN_SERVER`
//! environment variable (both handled by clap), TOML config file, built-in
//! defaults.
//!
//! ```toml
//! [server]
//! base_url = "http://127.0.0.1:5000"
//! upload_path = "/api/upload"
//! health_path = "/api/health"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload";
pub const DEFAULT_HEALTH_PATH: &str = "/api/health";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Server URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
}

/// Where the analysis service lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub health_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn parse_toml(s: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL when an override is given
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.server.base_url = base_url;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.server.base_url, &self.server.upload_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.server.base_url, &self.server.health_path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.server.base_url;
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidUrl(url.clone()))
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url(), "http://127.0.0.1:5000/api/upload");
        assert_eq!(config.health_url(), "http://127.0.0.1:5000/api/health");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ClientConfig::parse_toml(
            r#"
            [server]
            base_url = "https://analyzer.example.com/"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.upload_url(),
            "https://analyzer.example.com/api/upload"
        );
        assert_eq!(config.server.health_path, DEFAULT_HEALTH_PATH);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ClientConfig::parse_toml("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_custom_paths() {
        let config = ClientConfig::parse_toml(
            r#"
            [server]
            upload_path = "v2/analyze"
            "#,
        )
        .unwrap();
        assert_eq!(config.upload_url(), "http://127.0.0.1:5000/v2/analyze");
    }

    #[test]
    fn test_override_wins() {
        let config = ClientConfig::default()
            .with_base_url(Some("http://10.0.0.5:8080".to_string()))
            .unwrap();
        assert_eq!(config.upload_url(), "http://10.0.0.5:8080/api/upload");

        let unchanged = ClientConfig::default().with_base_url(None).unwrap();
        assert_eq!(unchanged, ClientConfig::default());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = ClientConfig::default()
            .with_base_url(Some("ftp://files".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ClientConfig::parse_toml("[server"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
