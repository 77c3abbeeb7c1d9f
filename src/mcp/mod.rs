//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes thermodynamic property lookup as tools over line-delimited
//! JSON-RPC 2.0.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MCP Server                          │
//! │                                                             │
//! │   ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    │
//! │   │  Transport  │───▶│   Server    │───▶│   Tools     │    │
//! │   │   (lines)   │    │  (dispatch) │    │  (handlers) │    │
//! │   └─────────────┘    └─────────────┘    └─────────────┘    │
//! │                             │                  │            │
//! │                             ▼                  ▼            │
//! │                      ┌─────────────┐    ┌─────────────┐    │
//! │                      │   Report    │◀───│   Backend   │    │
//! │                      └─────────────┘    └─────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod report;
pub mod server;
pub mod tools;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use report::ToolOutput;
pub use server::McpServer;
pub use transport::{LineTransport, StdioTransport};
