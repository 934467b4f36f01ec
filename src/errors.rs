//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the similarity engine. Errors only arise at
//! the initialization and I/O boundary (pattern compilation, configuration
//! loading, file reading); scoring itself never fails and reports low
//! confidence through the score, not through this channel.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from engine construction, config, and I/O
//! - **Output**: Structured error types with context fields
//! - **Error Categories**: Configuration, Validation, Pattern, I/O, Internal
//!
//! ## Usage
//! ```rust
//! use legal_text_similarity::errors::{Result, SimilarityError};
//!
//! fn load_operation() -> Result<()> {
//!     Err(SimilarityError::Config {
//!         message: "weights must sum to a positive value".to_string(),
//!     })
//! }
//! ```

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Error types for the similarity engine
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Citation pattern failed to compile
    #[error("Invalid citation pattern '{pattern}': {details}")]
    InvalidPattern { pattern: String, details: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SimilarityError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            SimilarityError::Config { .. } => "configuration",
            SimilarityError::ValidationFailed { .. } => "validation",
            SimilarityError::InvalidPattern { .. } => "pattern",
            SimilarityError::Io(_) => "io",
            SimilarityError::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable() {
        let err = SimilarityError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(err.category(), "configuration");

        let err = SimilarityError::InvalidPattern {
            pattern: r"\d+".to_string(),
            details: "unbalanced".to_string(),
        };
        assert_eq!(err.category(), "pattern");
    }

    #[test]
    fn display_includes_context() {
        let err = SimilarityError::ValidationFailed {
            field: "weights.semantic".to_string(),
            reason: "must be non-negative".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("weights.semantic"));
        assert!(rendered.contains("must be non-negative"));
    }
}
