//! Core error types for diagram generation
//!
//! Recoverable anomalies (odd signatures, overflowing headers, missing
//! ancestors) are reported through `tracing` and never show up here. Only
//! failures that stop a diagram from being produced at all are errors.

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Class format error: {message} at byte offset {offset}")]
    ClassFormat { message: String, offset: usize },

    #[error("Signature error: {message} in `{input}`")]
    Signature { message: String, input: String },

    #[error("Cannot chain zero diagrams")]
    EmptyChain,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Descriptor error: {source}")]
    Descriptor {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new class format error
    pub fn class_format(message: impl Into<String>, offset: usize) -> Self {
        Self::ClassFormat {
            message: message.into(),
            offset,
        }
    }

    /// Create a new signature error
    pub fn signature(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Signature {
            message: message.into(),
            input: input.into(),
        }
    }

    /// Create a new configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DiagramError>;
