//! Review verdicts and reply parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

use crate::error::{Error, Result};

/// First ```json fenced block, tag matched case-insensitively
static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json\s*(.*?)\s*```").expect("fence pattern is valid")
});

/// Summary used when the reply could not be structured
const UNSTRUCTURED_SUMMARY: &str = "AI response was not structured.";

/// Structured judgment of a snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewVerdict {
    pub is_correct: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub corrected_code: String,
}

impl ReviewVerdict {
    /// Whether the verdict follows the prompt's contract: a correct verdict
    /// carries no issues and no corrected code.
    pub fn is_consistent(&self) -> bool {
        !self.is_correct || (self.issues.is_empty() && self.corrected_code.is_empty())
    }
}

/// What came back from the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Reply parsed into a verdict
    Structured {
        verdict: ReviewVerdict,
        raw_text: String,
    },
    /// Reply was not a verdict; only the text is available
    Unstructured { raw_text: String },
}

impl ReviewOutcome {
    /// Raw model reply
    pub fn raw_text(&self) -> &str {
        match self {
            ReviewOutcome::Structured { raw_text, .. } | ReviewOutcome::Unstructured { raw_text } => {
                raw_text
            }
        }
    }

    /// Parsed verdict, if the reply was structured
    pub fn verdict(&self) -> Option<&ReviewVerdict> {
        match self {
            ReviewOutcome::Structured { verdict, .. } => Some(verdict),
            ReviewOutcome::Unstructured { .. } => None,
        }
    }

    /// A verdict to render in every case. Unstructured replies become a
    /// failing verdict whose single issue is the raw text.
    pub fn verdict_or_fallback(&self) -> ReviewVerdict {
        match self {
            ReviewOutcome::Structured { verdict, .. } => verdict.clone(),
            ReviewOutcome::Unstructured { raw_text } => ReviewVerdict {
                is_correct: false,
                summary: UNSTRUCTURED_SUMMARY.to_string(),
                issues: vec![raw_text.clone()],
                corrected_code: String::new(),
            },
        }
    }
}

/// The JSON candidate within a reply: the inner content of the first
/// ```json block if there is one, otherwise the whole text.
pub fn extract_json_candidate(text: &str) -> &str {
    JSON_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|inner| !inner.is_empty())
        .unwrap_or(text)
}

fn parse_verdict(text: &str) -> Result<ReviewVerdict> {
    serde_json::from_str(extract_json_candidate(text)).map_err(|e| Error::Parse(e.to_string()))
}

/// Turn a model reply into an outcome. Never fails: text that is not a
/// verdict is kept as [`ReviewOutcome::Unstructured`].
pub fn parse_review_text(text: String) -> ReviewOutcome {
    match parse_verdict(&text) {
        Ok(verdict) => {
            if !verdict.is_consistent() {
                warn!("AI verdict marks code correct but lists issues or a correction");
            }
            ReviewOutcome::Structured {
                verdict,
                raw_text: text,
            }
        }
        Err(e) => {
            warn!("Failed to parse AI JSON response: {}", e);
            ReviewOutcome::Unstructured { raw_text: text }
        }
    }
}
