//! Review module - AI code review pipeline
//!
//! This module handles:
//! - Building the review prompt for a snippet of code
//! - Choosing a generative model (requested, or discovered)
//! - Falling back once when the requested model does not exist
//! - Extracting a structured verdict from the model's reply

mod backend;
mod gemini;
pub mod prompt;
mod resolver;
mod verdict;

pub use backend::{GenerativeBackend, ModelDescriptor, GENERATE_CONTENT};
pub use gemini::GeminiClient;
pub use prompt::{build_prompt, ReviewRequest, DEFAULT_LANGUAGE_LABEL};
pub use resolver::{ReviewReport, ReviewResolver, NO_SUPPORTED_MODEL};
pub use verdict::{extract_json_candidate, parse_review_text, ReviewOutcome, ReviewVerdict};
