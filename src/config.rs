//! Configuration management for Compilo
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Upstream credentials are optional at startup; a request that
//! needs a missing credential fails with a configuration error instead.

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::net::SocketAddr;
use std::str::FromStr;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default JDoodle REST endpoint
pub const DEFAULT_JDOODLE_BASE_URL: &str = "https://api.jdoodle.com";

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub bind: String,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {}:{}: {}", self.bind, self.port, e)))
    }
}

/// Gemini (generative language API) configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; reviews are refused while this is unset
    pub api_key: Option<SecretString>,
    /// Model tried first when the caller names none
    pub default_model: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}

/// JDoodle (remote execution API) configuration
#[derive(Debug, Clone)]
pub struct JDoodleConfig {
    /// Client ID
    pub client_id: Option<String>,
    /// Client secret
    pub client_secret: Option<SecretString>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl JDoodleConfig {
    /// Whether both credentials are present
    pub fn has_credentials(&self) -> bool {
        let id = self.client_id.as_deref().is_some_and(|id| !id.is_empty());
        let secret = self
            .client_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        id && secret
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter
    pub level: String,
    /// Log format (pretty, json)
    pub format: String,
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server settings
    pub server: ServerConfig,
    /// Gemini settings
    pub gemini: GeminiConfig,
    /// JDoodle settings
    pub jdoodle: JDoodleConfig,
    /// Logging settings
    pub log: LogConfig,
}

/// Read an env var, treating empty values as unset
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an env var, falling back to `default` when unset.
/// A value that does not parse is a configuration error.
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match non_empty_var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid {}: {}", key, value))),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                bind: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 5000)?,
            },
            gemini: GeminiConfig {
                api_key: non_empty_var("GEMINI_API_KEY").map(SecretString::from),
                default_model: non_empty_var("GEMINI_MODEL"),
                base_url: std::env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout_secs: parse_var("GEMINI_TIMEOUT", 120)?,
            },
            jdoodle: JDoodleConfig {
                client_id: non_empty_var("JDOODLE_CLIENT_ID"),
                client_secret: non_empty_var("JDOODLE_CLIENT_SECRET").map(SecretString::from),
                base_url: std::env::var("JDOODLE_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_JDOODLE_BASE_URL.to_string()),
                timeout_secs: parse_var("JDOODLE_TIMEOUT", 60)?,
            },
            log: LogConfig {
                level: std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| "info,compilo=debug".to_string()),
                format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
        })
    }

    /// Create a minimal config for testing or offline commands
    pub fn minimal() -> Self {
        Config {
            server: ServerConfig {
                bind: "127.0.0.1".to_string(),
                port: 5000,
            },
            gemini: GeminiConfig {
                api_key: None,
                default_model: None,
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                timeout_secs: 120,
            },
            jdoodle: JDoodleConfig {
                client_id: None,
                client_secret: None,
                base_url: DEFAULT_JDOODLE_BASE_URL.to_string(),
                timeout_secs: 60,
            },
            log: LogConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = Config::minimal();
        assert!(!config.gemini.has_api_key());
        assert!(!config.jdoodle.has_credentials());
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "127.0.0.1:5000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_empty_secrets_count_as_missing() {
        let mut config = Config::minimal();
        config.gemini.api_key = Some(SecretString::from(""));
        assert!(!config.gemini.has_api_key());

        config.jdoodle.client_id = Some("id".to_string());
        assert!(!config.jdoodle.has_credentials());
        config.jdoodle.client_secret = Some(SecretString::from("secret"));
        assert!(config.jdoodle.has_credentials());
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = Config::minimal();
        config.server.bind = "not an address".to_string();
        assert!(matches!(config.server.socket_addr(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        std::env::set_var("COMPILO_TEST_TIMEOUT_VALID", " 30 ");
        std::env::set_var("COMPILO_TEST_TIMEOUT_INVALID", "two minutes");

        assert_eq!(parse_var::<u64>("COMPILO_TEST_TIMEOUT_VALID", 120).unwrap(), 30);
        assert_eq!(parse_var::<u64>("COMPILO_TEST_TIMEOUT_UNSET", 120).unwrap(), 120);
        match parse_var::<u64>("COMPILO_TEST_TIMEOUT_INVALID", 120) {
            Err(Error::Config(msg)) => {
                assert_eq!(msg, "Invalid COMPILO_TEST_TIMEOUT_INVALID: two minutes")
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
