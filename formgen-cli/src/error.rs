//! Error types for the CLI.
//!
//! Every failure carries the path it concerns, so messages can be printed
//! as-is by `main`.

use std::path::PathBuf;
use thiserror::Error;

use formgen::FormError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the form document.
    #[error("Failed to load form document: {0}")]
    Document(#[from] DocumentError),

    /// Error rendering the form.
    #[error("Failed to render form: {0}")]
    Render(#[from] FormError),

    /// Error serializing the rendered tree.
    #[error("Failed to serialize node tree: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// A precondition of the command does not hold.
    #[error("{0}")]
    Usage(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error loading a form document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document file not found.
    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    /// The file extension names no supported format.
    #[error("Unsupported document format '{extension}' for {path} (expected json or toml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The document does not parse.
    #[error("Invalid document {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    /// IO error reading the document.
    #[error("Failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create an invalid document error.
    pub fn invalid(path: PathBuf, message: impl Into<String>) -> Self {
        Self::Invalid {
            path,
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_wraps_form_error() {
        let err = CliError::from(FormError::not_supported("date"));
        assert_eq!(
            err.to_string(),
            "Failed to render form: date fields are not supported"
        );
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = DocumentError::UnsupportedFormat {
            path: PathBuf::from("form.yaml"),
            extension: "yaml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported document format 'yaml' for form.yaml (expected json or toml)"
        );
    }
}
