//! Codec error types

use kvplate_core::{ConvertError, Format};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("HCL error: {0}")]
    Hcl(#[from] hcl::Error),

    #[error("Invalid properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("Map key {key} is not a string")]
    NonStringKey { key: String },

    #[error("Document root must be a map, found {found}")]
    RootNotMap { found: String },
}

impl CodecError {
    /// Wrap into the core error, tagging the format involved
    pub fn into_convert_error(self, format: Format) -> ConvertError {
        ConvertError::Codec {
            format: format.name().to_string(),
            message: self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
