//! Route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::response::{AppError, CompileResponse, ReviewResponse};
use super::AppState;
use crate::execution::{ExecutionRequest, Language};
use crate::review::ReviewRequest;
use crate::Error;

/// Embedded playground UI
const INDEX_HTML: &str = include_str!("../../static/index.html");

// ---- Request Types ----

#[derive(Debug, Deserialize)]
pub struct CompileBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskAiBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    key: &'static str,
    label: &'static str,
}

/// Map a rejected `/ask-ai` body onto the review error shape.
///
/// A body sent without a JSON content type reads as empty, so it fails the
/// same way as a request without code.
fn ask_ai_rejection(rejection: JsonRejection) -> Error {
    warn!("Rejected /ask-ai body: {}", rejection.body_text());
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => "Code is required".to_string(),
        other => other.body_text(),
    };
    Error::Validation(message)
}

// ---- Handlers ----

pub async fn serve_index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], INDEX_HTML)
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        Language::ALL
            .into_iter()
            .map(|lang| LanguageInfo {
                key: lang.key(),
                label: lang.label(),
            })
            .collect(),
    )
}

/// Forward code to the execution API and relay its output
pub async fn compile(
    State(state): State<AppState>,
    body: Result<Json<CompileBody>, JsonRejection>,
) -> Json<CompileResponse> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            error!("Rejected /compile body: {}", rejection.body_text());
            return Json(CompileResponse::failure());
        }
    };

    let language = Language::from_key_or_default(body.language.as_deref());
    let mut request = ExecutionRequest::new(body.code, language);
    if let Some(input) = body.input {
        request = request.with_stdin(input);
    }

    info!(
        "Compile request received: language={}, executor={}",
        language,
        state.executor.name()
    );

    match state.executor.execute(request).await {
        Ok(result) => Json(CompileResponse::success(result.output)),
        Err(e) => {
            error!("Error executing code: {:?}", e);
            Json(CompileResponse::failure())
        }
    }
}

/// Review code with the generative model
pub async fn ask_ai(
    State(state): State<AppState>,
    body: Result<Json<AskAiBody>, JsonRejection>,
) -> Result<Json<ReviewResponse>, AppError> {
    let Json(body) = body.map_err(ask_ai_rejection)?;
    let model = body
        .model
        .filter(|m| !m.trim().is_empty())
        .or_else(|| state.default_model.clone());

    info!(
        has_code = body.code.as_deref().is_some_and(|c| !c.is_empty()),
        model = model.as_deref().unwrap_or("none"),
        "Ask AI request received"
    );

    let request = ReviewRequest::new(body.code.unwrap_or_default(), body.language, model)?;

    let reviewer = state
        .reviewer
        .as_ref()
        .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".to_string()))?;

    let report = reviewer.resolve(&request).await?;
    Ok(Json(ReviewResponse::from(report.outcome)))
}
