//! JDoodle execution backend

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use super::executor::{CodeExecutor, ExecutionRequest, ExecutionResult};
use crate::config::JDoodleConfig;
use crate::error::{Error, Result};

/// Body of `POST /v1/execute`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteBody<'a> {
    script: &'a str,
    language: &'a str,
    version_index: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdin: Option<&'a str>,
}

/// JDoodle reply; numeric fields arrive as strings or numbers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteReply {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    status_code: Option<Value>,
    #[serde(default)]
    memory: Option<Value>,
    #[serde(default)]
    cpu_time: Option<Value>,
}

fn value_to_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Status code as a number; anything unreadable is dropped
fn value_to_status(value: Option<Value>) -> Option<u16> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Executes code through the JDoodle REST API
#[derive(Clone)]
pub struct JDoodleExecutor {
    client: Client,
    config: JDoodleConfig,
}

impl JDoodleExecutor {
    /// Create a new JDoodle executor
    pub fn new(config: JDoodleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CodeExecutor for JDoodleExecutor {
    fn name(&self) -> &str {
        "jdoodle"
    }

    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult> {
        let (client_id, client_secret) = match (&self.config.client_id, &self.config.client_secret) {
            (Some(id), Some(secret)) if self.config.has_credentials() => (id, secret),
            _ => {
                return Err(Error::Config(
                    "JDOODLE_CLIENT_ID and JDOODLE_CLIENT_SECRET must be set".to_string(),
                ))
            }
        };

        let selection = request.language.selection();
        let url = format!("{}/v1/execute", self.config.base_url.trim_end_matches('/'));
        let body = ExecuteBody {
            script: &request.code,
            language: selection.language,
            version_index: selection.version_index,
            client_id,
            client_secret: client_secret.expose_secret(),
            stdin: request.stdin.as_deref(),
        };

        debug!(
            "Submitting {} code to JDoodle: language={}, versionIndex={}",
            request.language, selection.language, selection.version_index
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("JDoodle execution failed ({}): {}", status, text);
            return Err(Error::Upstream(format!(
                "Execution API error ({}): {}",
                status, text
            )));
        }

        let reply: ExecuteReply = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse execution response: {}", e)))?;

        Ok(ExecutionResult {
            output: reply.output.unwrap_or_default(),
            status_code: value_to_status(reply.status_code),
            memory: value_to_string(reply.memory),
            cpu_time: value_to_string(reply.cpu_time),
        })
    }
}
