//! # Error Types
//!
//! Structured error types for quote_core.
//!
//! The pricing pipeline itself never fails: blank, zero or negative inputs
//! degrade to a computed value of 0. Errors only come from addressing a line
//! item that does not exist and from the outer layers (access gate,
//! configuration, PDF rendering).
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn supplementary(index: usize, len: usize) -> QuoteResult<usize> {
//!     if index >= len {
//!         return Err(QuoteError::item_not_found(index, len));
//!     }
//!     Ok(index)
//! }
//!
//! assert!(supplementary(3, 2).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quotation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value could not be used (unparseable unit, bad JSON field, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A supplementary item index is out of range
    #[error("Supplementary item {index} not found (quotation has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    /// The PIN did not match
    #[error("Invalid PIN")]
    InvalidPin,

    /// The session token is unknown or has been logged out
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Configuration file could not be read or parsed
    #[error("Config error: {path} - {reason}")]
    ConfigError { path: String, reason: String },

    /// PDF compilation or rendering failed
    #[error("Render failed: {stage} - {reason}")]
    RenderFailed { stage: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(index: usize, len: usize) -> Self {
        QuoteError::ItemNotFound { index, len }
    }

    /// Create an Unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        QuoteError::Unauthorized { reason: reason.into() }
    }

    /// Create a ConfigError
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the user can fix by retrying with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuoteError::InvalidPin | QuoteError::ItemNotFound { .. } | QuoteError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            QuoteError::InvalidPin => "INVALID_PIN",
            QuoteError::Unauthorized { .. } => "UNAUTHORIZED",
            QuoteError::ConfigError { .. } => "CONFIG_ERROR",
            QuoteError::RenderFailed { .. } => "RENDER_FAILED",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::SerializationError {
            reason: err.to_string(),
        }
    }
}
