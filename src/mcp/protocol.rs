//! JSON-RPC 2.0 message types.
//!
//! Requests are read leniently: `jsonrpc` may be absent, `id` may be any JSON
//! value (or missing, in which case responses carry `null`), and `params`
//! defaults to nothing. Every request gets exactly one response, so there is
//! no notion of a notification here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The MCP protocol version reported by `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name for capability negotiation.
pub const SERVER_NAME: &str = "thermoprop-mcp";

/// A JSON-RPC request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol marker; accepted but not required.
    #[serde(default)]
    pub jsonrpc: Option<String>,

    /// Opaque request identifier, echoed back verbatim.
    #[serde(default)]
    pub id: Value,

    /// The method to invoke.
    #[serde(default)]
    pub method: String,

    /// Parameters for the method.
    #[serde(default)]
    pub params: Value,
}

/// Parameters of a tool call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    #[serde(default)]
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// A successful JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0".
    pub jsonrpc: &'static str,

    /// The request ID this response corresponds to.
    pub id: Value,

    /// The result of the method call.
    pub result: Value,
}

impl JsonRpcResponse {
    /// Creates a new success response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result,
        }
    }
}

/// JSON-RPC error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The line could not be read as a request.
    ParseError,
    /// The request envelope has the wrong shape.
    InvalidRequest,
    /// The method does not exist.
    MethodNotFound,
    /// Internal error.
    InternalError,
    /// A tool handler failed.
    ToolFailure,
}

impl ErrorCode {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InternalError => -32603,
            Self::ToolFailure => -32000,
        }
    }

    /// Returns the default message for this error code.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InternalError => "Internal error",
            Self::ToolFailure => "Tool execution failed",
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcErrorData {
    /// The error code.
    pub code: i32,

    /// A short description of the error.
    pub message: String,
}

impl JsonRpcErrorData {
    /// Creates a new error with a custom message.
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Always "2.0".
    pub jsonrpc: &'static str,

    /// The request ID, or `null` if it could not be determined.
    pub id: Value,

    /// The error details.
    pub error: JsonRpcErrorData,
}

impl JsonRpcError {
    /// Creates a new error response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // JsonRpcErrorData contains String
    pub fn new(id: Value, error: JsonRpcErrorData) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            error,
        }
    }

    /// Creates a parse error response with a description of what went wrong.
    #[must_use]
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(
            Value::Null,
            JsonRpcErrorData::with_message(
                ErrorCode::ParseError,
                format!("{}: {detail}", ErrorCode::ParseError.default_message()),
            ),
        )
    }

    /// Creates an invalid request error response.
    #[must_use]
    pub fn invalid_request(id: Value, detail: impl std::fmt::Display) -> Self {
        Self::new(
            id,
            JsonRpcErrorData::with_message(
                ErrorCode::InvalidRequest,
                format!("{}: {detail}", ErrorCode::InvalidRequest.default_message()),
            ),
        )
    }

    /// Creates a method not found error response.
    #[must_use]
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::new(
            id,
            JsonRpcErrorData::with_message(
                ErrorCode::MethodNotFound,
                format!("Method not found: {method}"),
            ),
        )
    }

    /// Creates a tool failure response.
    #[must_use]
    pub fn tool_failure(id: Value, message: impl Into<String>) -> Self {
        Self::new(
            id,
            JsonRpcErrorData::with_message(ErrorCode::ToolFailure, message),
        )
    }

    /// Creates an internal error response.
    #[must_use]
    pub fn internal_error(id: Value, message: impl Into<String>) -> Self {
        Self::new(
            id,
            JsonRpcErrorData::with_message(ErrorCode::InternalError, message),
        )
    }
}

/// Parses one input line into a request.
///
/// # Errors
///
/// Returns a parse error if the line is not JSON or not a JSON object, and an
/// invalid request error if the object's fields have the wrong types.
pub fn parse_request(line: &str) -> Result<JsonRpcRequest, JsonRpcError> {
    let value: Value = serde_json::from_str(line).map_err(JsonRpcError::parse_error)?;

    let Some(object) = value.as_object() else {
        return Err(JsonRpcError::parse_error("expected a JSON object"));
    };
    let id = object.get("id").cloned().unwrap_or(Value::Null);

    serde_json::from_value(value).map_err(|e| JsonRpcError::invalid_request(id, e))
}
