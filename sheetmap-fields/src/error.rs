//! Error types for the field rendering registry
//!
//! Rendering itself is total and never fails. These errors only surface from
//! strict tag parsing and from loading registry configuration.

use thiserror::Error;

/// Result type for field rendering operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while parsing renderer tags or loading configuration
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Renderer type tag is not one of the built-in types
    #[error("unknown renderer type: {tag}")]
    UnknownRendererType { tag: String },

    /// Layered configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for FieldsError {
    fn from(error: figment::Error) -> Self {
        FieldsError::Config(Box::new(error))
    }
}
