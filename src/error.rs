//! # Error Types
//!
//! This module defines error types used throughout the undulate library.
//!
//! The physics evaluators themselves never fail: singular geometry (total
//! internal reflection, a non-positive wavelength) is reported through
//! sentinel values. Errors only arise at the configuration boundary and in
//! the outer surfaces (image export, JSON output).

use thiserror::Error;

/// Main error type for undulate operations
#[derive(Debug, Error)]
pub enum UndulateError {
    /// Parameter value rejected at the configuration boundary
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parameter name not recognized by a demo
    #[error("Unknown parameter: {0}")]
    UnknownParam(String),

    /// Demo name not found in the registry
    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    /// Operation not offered by a demo
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UndulateError {
    pub(crate) fn invalid(name: &str, value: f64, expected: &str) -> Self {
        Self::InvalidConfig(format!("{} = {} (expected {})", name, value, expected))
    }
}
