//! Common executor trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::error::Result;

/// Request to execute code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// The code to execute
    pub code: String,
    /// Programming language
    pub language: Language,
    /// Standard input
    #[serde(default)]
    pub stdin: Option<String>,
}

impl ExecutionRequest {
    /// Create a new execution request
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        ExecutionRequest {
            code: code.into(),
            language,
            stdin: None,
        }
    }

    /// Set stdin
    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }
}

/// Result of a remote execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Combined program output as reported by the execution API
    pub output: String,
    /// Status code reported by the execution API, if any
    pub status_code: Option<u16>,
    /// Memory used, as reported
    pub memory: Option<String>,
    /// CPU time, as reported
    pub cpu_time: Option<String>,
}

impl ExecutionResult {
    /// Create a result carrying only output
    pub fn from_output(output: impl Into<String>) -> Self {
        ExecutionResult {
            output: output.into(),
            ..Default::default()
        }
    }
}

/// Trait for code execution backends
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Get the executor name
    fn name(&self) -> &str;

    /// Execute code
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_request() {
        let req = ExecutionRequest::new("print(input())", Language::Python).with_stdin("42");

        assert_eq!(req.code, "print(input())");
        assert_eq!(req.language, Language::Python);
        assert_eq!(req.stdin.as_deref(), Some("42"));
    }

    #[test]
    fn test_request_deserializes_without_stdin() {
        let req: ExecutionRequest =
            serde_json::from_str(r#"{"code":"puts 1","language":"ruby"}"#).unwrap();
        assert_eq!(req.language, Language::Ruby);
        assert!(req.stdin.is_none());
    }
}
