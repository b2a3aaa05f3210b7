//! Google Gemini API client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::backend::{GenerativeBackend, ModelDescriptor};
use crate::config::GeminiConfig;
use crate::error::{Error, Result};

/// Google Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key, sent in the `x-goog-api-key` header
    api_key: SecretString,
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

/// Header carrying the API key. Kept out of the URL so transport errors,
/// which render the request URL, never expose it.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// `models/<id>` resource path for a bare or qualified model name
fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Fails with a configuration error when no API key is set.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) if config.has_api_key() => key.clone(),
            _ => return Err(Error::Config("GEMINI_API_KEY is not set".to_string())),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GeminiClient {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Turn a non-2xx reply into an upstream error, keeping the payload
    async fn upstream_error(context: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("{} ({}): upstream error data: {}", context, status, body);

        let detail = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Error::Upstream(format!("{} ({}): {}", context, status, detail))
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| Error::from(e.without_url()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error("Failed to list models", response).await);
        }

        let body: ModelsResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse model list: {}", e)))?;

        debug!("Gemini listed {} models", body.models.len());

        Ok(body
            .models
            .into_iter()
            .map(|m| ModelDescriptor::from_methods(m.name, m.supported_generation_methods.as_slice()))
            .collect())
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, model_path(model));
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Sending request to Gemini: model={}", model);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from(e.without_url()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error("Gemini API error", response).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| Error::Upstream("Gemini returned no candidates".to_string()))?;

        info!("Gemini response: model={}, chars={}", model, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> GeminiConfig {
        GeminiConfig {
            api_key: Some(SecretString::from("test-key")),
            default_model: None,
            base_url,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let mut config = test_config("http://localhost".to_string());
        assert!(GeminiClient::new(&config).is_ok());

        config.api_key = None;
        match GeminiClient::new(&config) {
            Err(Error::Config(msg)) => assert_eq!(msg, "GEMINI_API_KEY is not set"),
            _ => panic!("expected configuration error"),
        }
    }

    #[test]
    fn test_model_path() {
        assert_eq!(model_path("gemini-1.5-flash"), "models/gemini-1.5-flash");
        assert_eq!(model_path("models/gemini-pro"), "models/gemini-pro");
    }

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]},
                    {"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                    {"name": "models/aqa"}
                ]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(server.uri())).unwrap();
        let models = client.list_models().await.unwrap();

        assert_eq!(models.len(), 3);
        assert!(!models[0].supports_generation);
        assert!(models[1].supports_generation);
        assert_eq!(models[1].name, "models/gemini-1.5-flash");
        assert!(!models[2].supports_generation);
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"isCorrect\":"}, {"text": "true}"}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(server.uri())).unwrap();
        let text = client.generate("gemini-1.5-flash", "review this").await.unwrap();
        assert_eq!(text, "{\"isCorrect\":true}");
    }

    #[tokio::test]
    async fn test_generate_not_found_is_detectable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/foo:generateContent"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {
                    "code": 404,
                    "message": "models/foo is not found for API version v1beta",
                    "status": "NOT_FOUND"
                }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(server.uri())).unwrap();
        let err = client.generate("foo", "prompt").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.user_message().contains("models/foo is not found"));
    }

    #[tokio::test]
    async fn test_generate_without_candidates_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(server.uri())).unwrap();
        let err = client.generate("gemini-pro", "prompt").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let mut config = test_config("http://127.0.0.1:1/v1beta".to_string());
        config.api_key = Some(SecretString::from("SECRET404KEY"));
        let client = GeminiClient::new(&config).unwrap();

        let err = client.generate("gemini-pro", "prompt").await.unwrap_err();
        assert!(!err.to_string().contains("SECRET404KEY"));
        assert!(!err.user_message().contains("SECRET404KEY"));
        assert!(!err.is_not_found());

        let err = client.list_models().await.unwrap_err();
        assert!(!err.user_message().contains("SECRET404KEY"));
    }
}
