//! HTTP server - playground UI, execution proxy and AI review endpoints
//!
//! Routes:
//! - `GET /` embedded playground page
//! - `GET /health` liveness probe
//! - `GET /languages` selector entries
//! - `POST /compile` remote execution
//! - `POST /ask-ai` AI code review

mod handlers;
mod response;

pub use handlers::{AskAiBody, CompileBody};
pub use response::{AppError, CompileResponse, ErrorResponse, ReviewResponse, Status};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::execution::{CodeExecutor, JDoodleExecutor};
use crate::review::{GeminiClient, ReviewResolver};

/// Shared handler state. Clients are injected; nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Remote execution backend
    pub executor: Arc<dyn CodeExecutor>,
    /// Review pipeline; `None` when no Gemini API key is configured
    pub reviewer: Option<ReviewResolver>,
    /// Model tried first when a request names none
    pub default_model: Option<String>,
}

impl AppState {
    /// Create state from explicit collaborators
    pub fn new(
        executor: Arc<dyn CodeExecutor>,
        reviewer: Option<ReviewResolver>,
        default_model: Option<String>,
    ) -> Self {
        AppState {
            executor,
            reviewer,
            default_model,
        }
    }

    /// Build the production clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.jdoodle.has_credentials() {
            warn!("JDoodle credentials not configured, /compile will fail");
        }
        let executor = Arc::new(JDoodleExecutor::new(config.jdoodle.clone())?);

        let reviewer = if config.gemini.has_api_key() {
            let client = GeminiClient::new(&config.gemini)?;
            Some(ReviewResolver::new(Arc::new(client)))
        } else {
            warn!("GEMINI_API_KEY is not set, /ask-ai will fail");
            None
        };

        Ok(AppState::new(
            executor,
            reviewer,
            config.gemini.default_model.clone(),
        ))
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::serve_index))
        .route("/health", get(handlers::health_check))
        .route("/languages", get(handlers::list_languages))
        .route("/compile", post(handlers::compile))
        .route("/ask-ai", post(handlers::ask_ai))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
