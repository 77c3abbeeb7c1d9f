//! thermoprop-mcp: MCP server for thermodynamic property lookup
//!
//! This library provides a line-delimited JSON-RPC tool server that answers
//! property queries for chemical components at a given temperature and
//! pressure.
//!
//! # Architecture
//!
//! One dispatch core serves three interchangeable backends:
//!
//! - **mock**: a handful of components with textbook formulas
//! - **correlation**: pure-component correlations for common fluids, extendable from CSV
//! - **phase**: solid mineral phases with heat-capacity polynomials
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation
//! - [`thermo`] — Property backends and units

pub mod config;
pub mod error;
pub mod mcp;
pub mod thermo;
