//! # Compilo
//!
//! Backend for an online code playground.
//!
//! ## Features
//!
//! - **Remote Execution:** Code and stdin are forwarded to the JDoodle API
//! - **AI Review:** Gemini judges the code and proposes a minimal fix
//! - **Model Fallback:** A missing model is replaced once by a discovered one
//! - **Embedded UI:** A single-page editor served from the same process

pub mod config;
pub mod error;
pub mod execution;
pub mod review;
pub mod server;
pub mod telemetry;

pub use config::Config;
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
