//! Generative backend trait - Abstract interface for the model API
//!
//! The resolver only needs two calls from the upstream: list the models and
//! generate text with one of them. Keeping them behind a trait lets the
//! server hold an injected client and lets tests substitute fakes.

use async_trait::async_trait;

use crate::error::Result;

/// Generation method a model must support to be usable for reviews
pub const GENERATE_CONTENT: &str = "generateContent";

/// A model as reported by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Model identifier, e.g. `models/gemini-1.5-flash`
    pub name: String,
    /// Whether the model supports `generateContent`
    pub supports_generation: bool,
}

impl ModelDescriptor {
    /// Build a descriptor from the upstream's supported-method list
    pub fn from_methods<S: AsRef<str>>(name: impl Into<String>, methods: &[S]) -> Self {
        ModelDescriptor {
            name: name.into(),
            supports_generation: methods.iter().any(|m| m.as_ref() == GENERATE_CONTENT),
        }
    }
}

/// Upstream generative-language API
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// List models known to the upstream
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>>;

    /// Generate a text reply for `prompt` using `model`
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_methods() {
        let model = ModelDescriptor::from_methods(
            "models/gemini-1.5-flash",
            &["countTokens", "generateContent"],
        );
        assert!(model.supports_generation);

        let embed = ModelDescriptor::from_methods("models/embedding-001", &["embedContent"]);
        assert!(!embed.supports_generation);

        let empty: [&str; 0] = [];
        assert!(!ModelDescriptor::from_methods("models/x", &empty).supports_generation);
    }
}
