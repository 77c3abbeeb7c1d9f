//! Error types for thermoprop-mcp.
//!
//! Backend errors live in [`crate::thermo::error`]; this module holds the
//! errors of the layers above it.

use std::path::PathBuf;

use thiserror::Error;

use crate::mcp::protocol::ErrorCode;
use crate::thermo::property::UnknownPropertyName;
use crate::thermo::BackendError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised while handling a tool call.
///
/// All of them reach the client as a `-32000` error carrying the message.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool name is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The property name is not one the server knows.
    #[error("Unknown property '{0}'. Use list_available_properties to see options.")]
    UnknownProperty(String),

    /// The property exists but this backend does not offer it.
    #[error("Property '{property}' is not supported by the {backend} backend. Use list_available_properties to see options.")]
    UnsupportedProperty {
        /// The requested property.
        property: String,
        /// Name of the active backend.
        backend: &'static str,
    },

    /// Tool arguments are missing or have the wrong type.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        /// The tool that was called.
        tool: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The temperature unit tag is not recognised.
    #[error("Invalid temperature_unit '{0}'. Must be one of: auto, K, C")]
    InvalidUnit(String),

    /// The backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ToolError {
    /// Returns the JSON-RPC error code for this error.
    #[must_use]
    #[allow(clippy::unused_self)] // all tool failures share one code
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ToolFailure
    }
}

impl From<UnknownPropertyName> for ToolError {
    fn from(err: UnknownPropertyName) -> Self {
        Self::UnknownProperty(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn tool_errors_share_one_code() {
        let errors = [
            ToolError::UnknownTool("frobnicate".to_string()),
            ToolError::UnknownProperty("colour".to_string()),
            ToolError::Backend(BackendError::not_found("unobtainium", "mock")),
        ];
        for error in errors {
            assert_eq!(error.code().code(), -32000);
        }
    }

    #[test]
    fn backend_message_is_passed_through() {
        let error = ToolError::from(BackendError::not_found("unobtainium", "mock"));
        let msg = error.to_string();
        assert!(msg.contains("unobtainium"));
        assert!(msg.contains("search_components"));
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let error = ToolError::UnknownTool("frobnicate".to_string());
        assert_eq!(error.to_string(), "Unknown tool: frobnicate");
    }
}
