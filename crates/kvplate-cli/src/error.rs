//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use kvplate_core::{ConvertError, Format};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Invalid arguments (unsupported format, ...)
    #[error("{message}")]
    #[diagnostic(code(kvplate::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// An input document could not be parsed
    #[error("Error parsing {source_name}: {message}")]
    #[diagnostic(code(kvplate::cli::parse))]
    Parse { source_name: String, message: String },

    /// The parsed tree cannot be flattened or templated
    #[error("Conversion failed for {source_name}: {message}")]
    #[diagnostic(code(kvplate::cli::conversion))]
    Conversion {
        source_name: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kvplate::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(kvplate::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::Conversion { .. } => exit_codes::CONVERSION_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Wrap a conversion error raised while handling `source_name`
    pub fn from_convert(source_name: &str, err: ConvertError) -> Self {
        match err {
            ConvertError::UnsupportedFormat { .. } => Self::Usage {
                message: err.to_string(),
                help: None,
            },
            ConvertError::Codec { .. } => Self::Parse {
                source_name: source_name.to_string(),
                message: err.to_string(),
            },
            ConvertError::MalformedTree { .. } => Self::Conversion {
                source_name: source_name.to_string(),
                message: err.to_string(),
                help: Some("Only maps with string keys can be flattened".to_string()),
            },
            ConvertError::EncodingFailure { .. } => Self::Conversion {
                source_name: source_name.to_string(),
                message: err.to_string(),
                help: Some("Values must be representable as JSON (no NaN or infinity)".to_string()),
            },
            ConvertError::Json(e) => Self::internal(e.to_string()),
        }
    }

    /// Create an unsupported input format error
    pub fn unsupported_format(name: &str) -> Self {
        Self::Usage {
            message: format!("Invalid input file format - {}", name),
            help: Some(format!("Available options are: {}", Format::names_list())),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", context, err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::unsupported_format("xml").exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(CliError::internal("boom").exit_code(), exit_codes::ERROR);
        assert_eq!(
            CliError::io("reading a.json", std::io::Error::other("gone")).exit_code(),
            exit_codes::IO_ERROR
        );
    }

    #[test]
    fn test_convert_errors_map_to_categories() {
        let malformed = CliError::from_convert(
            "a.yaml",
            ConvertError::MalformedTree {
                path: "codes".into(),
                key: "404".into(),
            },
        );
        assert_eq!(malformed.exit_code(), exit_codes::CONVERSION_ERROR);
        assert!(malformed.to_string().contains("a.yaml"));

        let codec = CliError::from_convert(
            "<stdin>",
            ConvertError::Codec {
                format: "json".into(),
                message: "bad".into(),
            },
        );
        assert_eq!(codec.exit_code(), exit_codes::PARSE_ERROR);
    }

    #[test]
    fn test_unsupported_format_help_lists_formats() {
        match CliError::unsupported_format("ini") {
            CliError::Usage { message, help } => {
                assert_eq!(message, "Invalid input file format - ini");
                assert!(help.unwrap().contains("toml, json, yaml"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
