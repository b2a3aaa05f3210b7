//! Execution module - Remote code execution
//!
//! Code never runs locally. Requests are forwarded to a hosted execution
//! API (JDoodle) after mapping the playground's language key onto the
//! API's language/version parameters.

mod executor;
mod jdoodle;
mod language;

pub use executor::{CodeExecutor, ExecutionRequest, ExecutionResult};
pub use jdoodle::JDoodleExecutor;
pub use language::{Language, LanguageSelection};
