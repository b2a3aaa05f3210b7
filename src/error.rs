//! Error types for Compilo

use thiserror::Error;

/// Result type alias using Compilo's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Compilo
#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing or malformed
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Required credential or setting absent
    #[error("Configuration error: {0}")]
    Config(String),

    /// No generation-capable model could be selected
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Execution or generation API failure
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Generated text is not a review verdict
    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Check if error is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether the failure reads like a missing model.
    ///
    /// Matches on the rendered message: a `404` status or "not found" text.
    pub fn is_not_found(&self) -> bool {
        let message = self.to_string();
        message.contains("404") || message.to_lowercase().contains("not found")
    }

    /// Message suitable for the outbound `{status: "error"}` body
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg)
            | Error::Config(msg)
            | Error::ModelUnavailable(msg)
            | Error::Upstream(msg)
            | Error::Parse(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
