//! Review resolver - model selection, invocation and fallback

use std::sync::Arc;
use tracing::{error, info, warn};

use super::backend::GenerativeBackend;
use super::prompt::ReviewRequest;
use super::verdict::{parse_review_text, ReviewOutcome};
use crate::error::{Error, Result};

/// Message for a failed discovery
pub const NO_SUPPORTED_MODEL: &str = "No supported models available for generateContent";

/// Result of a review, with the model that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewReport {
    /// Model that generated the reply
    pub model: String,
    /// Whether the reply came from the fallback model
    pub fell_back: bool,
    /// Parsed or raw reply
    pub outcome: ReviewOutcome,
}

/// Resolves a [`ReviewRequest`] into a [`ReviewReport`].
///
/// Holds no per-request state; one resolver serves all requests.
#[derive(Clone)]
pub struct ReviewResolver {
    backend: Arc<dyn GenerativeBackend>,
}

impl ReviewResolver {
    /// Create a resolver over an injected backend
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        ReviewResolver { backend }
    }

    /// Name of the first listed model that supports generation.
    ///
    /// A failed listing counts as "nothing found"; it is logged, not
    /// propagated.
    pub async fn discover_model(&self) -> Option<String> {
        match self.backend.list_models().await {
            Ok(models) => models
                .into_iter()
                .find(|m| m.supports_generation)
                .map(|m| m.name),
            Err(e) => {
                error!("Error listing models: {}", e);
                None
            }
        }
    }

    /// Review the request's code.
    ///
    /// At most two generation attempts are made: the first model, and one
    /// discovered fallback when a requested model is reported missing.
    pub async fn resolve(&self, request: &ReviewRequest) -> Result<ReviewReport> {
        let requested = request.requested_model();
        let model = match requested {
            Some(name) => name.to_string(),
            None => self
                .discover_model()
                .await
                .ok_or_else(|| Error::ModelUnavailable(NO_SUPPORTED_MODEL.to_string()))?,
        };

        let prompt = request.prompt();

        let (model, fell_back, text) = match self.backend.generate(&model, &prompt).await {
            Ok(text) => (model, false, text),
            Err(e) if requested.is_some() && e.is_not_found() => {
                let Some(fallback) = self.discover_model().await else {
                    return Err(e);
                };
                warn!(
                    "Requested model {} not supported, falling back to {}",
                    model, fallback
                );
                let text = self.backend.generate(&fallback, &prompt).await?;
                (fallback, true, text)
            }
            Err(e) => return Err(e),
        };

        info!("Review generated: model={}, fallback={}", model, fell_back);

        Ok(ReviewReport {
            model,
            fell_back,
            outcome: parse_review_text(text),
        })
    }
}
