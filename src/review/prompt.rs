//! Review prompt construction

use crate::error::{Error, Result};

/// Label used when the caller does not name a language
pub const DEFAULT_LANGUAGE_LABEL: &str = "the provided language";

/// A request to review one snippet of code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    code: String,
    language: String,
    requested_model: Option<String>,
}

impl ReviewRequest {
    /// Create a review request.
    ///
    /// Empty code is rejected with a validation error. Blank language or
    /// model values are treated as absent.
    pub fn new(
        code: impl Into<String>,
        language: Option<String>,
        requested_model: Option<String>,
    ) -> Result<Self> {
        let code = code.into();
        if code.is_empty() {
            return Err(Error::Validation("Code is required".to_string()));
        }

        Ok(ReviewRequest {
            code,
            language: language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE_LABEL.to_string()),
            requested_model: requested_model.filter(|m| !m.trim().is_empty()),
        })
    }

    /// Code under review
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Language label shown to the model
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Model the caller asked for, if any
    pub fn requested_model(&self) -> Option<&str> {
        self.requested_model.as_deref()
    }

    /// Render the prompt for this request
    pub fn prompt(&self) -> String {
        build_prompt(&self.code, &self.language)
    }
}

/// Render the review prompt. The code is appended verbatim.
pub fn build_prompt(code: &str, language: &str) -> String {
    let review_line = format!(
        "Review the {} code below and respond ONLY with valid JSON.",
        language
    );

    [
        "You are a helpful coding assistant.",
        review_line.as_str(),
        "JSON schema:",
        "{",
        "  \"isCorrect\": boolean,",
        "  \"summary\": string,",
        "  \"issues\": string[],",
        "  \"correctedCode\": string",
        "}",
        "Rules:",
        "- If code is correct, set isCorrect=true, issues=[] and correctedCode=\"\".",
        "- If incorrect, set isCorrect=false and provide a minimal correctedCode.",
        "- summary should be 1 short sentence.",
        "- Respond with JSON only. No extra text.",
        "",
        "Code:",
        code,
    ]
    .join("\n")
}
