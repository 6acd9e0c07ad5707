//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported format: '{name}'. Available options are: {supported}")]
    UnsupportedFormat { name: String, supported: String },

    #[error("Malformed tree at '{path}': map key {key} is not a string")]
    MalformedTree { path: String, key: String },

    #[error("Failed to encode value at '{path}': {message}")]
    EncodingFailure { path: String, message: String },

    #[error("{format} codec error: {message}")]
    Codec { format: String, message: String },

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
