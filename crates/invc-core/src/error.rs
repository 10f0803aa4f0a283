//! Error types for the invc-core library.
//!
//! Extraction itself never fails: an unresolved field is a null value plus a
//! note. These errors only cover building an extractor from configuration and
//! reading or writing configuration files.

use thiserror::Error;

/// Main error type for the invc library.
#[derive(Error, Debug)]
pub enum InvcError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to extraction configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured vendor pattern is not a valid regex.
    #[error("invalid vendor pattern for {name}: {reason}")]
    VendorPattern { name: String, reason: String },

    /// A configured OCR substitution could not be compiled.
    #[error("invalid OCR substitution {from:?}: {reason}")]
    Substitution { from: String, reason: String },

    /// A configured value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Value { field: String, reason: String },
}

/// Result type for the invc library.
pub type Result<T> = std::result::Result<T, InvcError>;
