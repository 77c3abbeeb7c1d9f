//! MCP server for thermodynamic property lookup.
//!
//! The server reads one request per line and writes exactly one response per
//! line, in order. Requests are handled synchronously against the configured
//! [`PropertyBackend`]; every failure inside a request becomes an error
//! response and the loop carries on. Only EOF, a stream I/O failure or a
//! shutdown signal ends it.

use std::io;

use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::error::ToolError;
use crate::mcp::protocol::{
    parse_request, JsonRpcError, JsonRpcErrorData, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::report::{self, Evaluation, ToolOutput};
use crate::mcp::tools::{self, CalculatePropertyArgs, SearchComponentsArgs, Tool};
use crate::mcp::transport::{LineTransport, StdioTransport};
use crate::thermo::{
    CacheStats, ChemicalHandle, Phase, Property, PropertyBackend, PropertyValue, StatePoint,
    TemperatureUnit,
};

/// Server information for the initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The MCP server.
pub struct McpServer {
    /// Source of property data.
    backend: Box<dyn PropertyBackend>,
    /// How to read temperatures that come without a unit.
    temperature_unit: TemperatureUnit,
}

impl McpServer {
    /// Creates a server over the given backend.
    #[must_use]
    pub fn new(backend: Box<dyn PropertyBackend>) -> Self {
        Self {
            backend,
            temperature_unit: TemperatureUnit::default(),
        }
    }

    /// Sets the unit used when a query does not name one.
    #[must_use]
    pub fn with_temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = unit;
        self
    }

    /// Returns the backend's resolution cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.backend.cache_stats()
    }

    /// Serves stdin/stdout until EOF or a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut transport = StdioTransport::stdio();
        self.run_with_shutdown(&mut transport).await?;
        if let Some(stats) = self.cache_stats() {
            tracing::info!(
                hits = stats.hits,
                misses = stats.misses,
                entries = stats.entries,
                "Resolution cache statistics"
            );
        }
        Ok(())
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(unix)]
    async fn run_with_shutdown(&mut self, transport: &mut StdioTransport) -> io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, initiating graceful shutdown");
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = transport.read_line() => {
                    let Some(line) = line_result? else {
                        tracing::info!("Input closed, shutting down");
                        return Ok(());
                    };
                    self.respond(transport, &line).await?;
                }
            }
        }
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(windows)]
    async fn run_with_shutdown(&mut self, transport: &mut StdioTransport) -> io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
                    return Ok(());
                }

                line_result = transport.read_line() => {
                    let Some(line) = line_result? else {
                        tracing::info!("Input closed, shutting down");
                        return Ok(());
                    };
                    self.respond(transport, &line).await?;
                }
            }
        }
    }

    /// Serves a transport until EOF.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn serve<R, W>(&mut self, transport: &mut LineTransport<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        while let Some(line) = transport.read_line().await? {
            self.respond(transport, &line).await?;
        }
        Ok(())
    }

    /// Handles one line and writes its response.
    async fn respond<R, W>(&mut self, transport: &mut LineTransport<R, W>, line: &str) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match self.handle_line(line) {
            Ok(response) => transport.write_message(&response).await,
            Err(error) => transport.write_message(&error).await,
        }
    }

    /// Handles a single line of input, producing exactly one response.
    ///
    /// # Errors
    ///
    /// The `Err` variant is the error response to send; it is not a failure
    /// of the server.
    pub fn handle_line(&mut self, line: &str) -> Result<JsonRpcResponse, JsonRpcError> {
        let request = parse_request(line).map_err(|error| {
            tracing::debug!(message = %error.error.message, "Rejected input line");
            error
        })?;
        self.handle_request(&request)
    }

    /// Handles a parsed request.
    fn handle_request(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        tracing::debug!(method = %req.method, id = %req.id, "Handling request");

        match req.method.as_str() {
            "initialize" => Ok(Self::handle_initialize(req)),
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            "list_tools" | "tools/list" => Ok(Self::handle_list_tools(req)),
            "call_tool" | "tools/call" => self.handle_call_tool(req),
            _ => {
                tracing::debug!(method = %req.method, "Unknown method");
                Err(JsonRpcError::method_not_found(req.id.clone(), &req.method))
            }
        }
    }

    /// Handles the initialize request.
    ///
    /// There is no handshake state; tools work without it.
    fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
        if let Some(client) = req.params.get("clientInfo").and_then(|c| c.get("name")) {
            tracing::info!(client = %client, "Client connected");
        }

        JsonRpcResponse::success(
            req.id.clone(),
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": ServerInfo::default(),
            }),
        )
    }

    /// Handles the list_tools request.
    fn handle_list_tools(req: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(req.id.clone(), json!({ "tools": tools::catalog() }))
    }

    /// Handles the call_tool request.
    fn handle_call_tool(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        let params: ToolCallParams = if req.params.is_null() {
            ToolCallParams::default()
        } else {
            serde_json::from_value(req.params.clone()).map_err(|e| {
                JsonRpcError::tool_failure(req.id.clone(), format!("Invalid tool call params: {e}"))
            })?
        };

        let output = self.call_tool(&params).map_err(|e| {
            tracing::warn!(tool = %params.name, error = %e, "Tool call failed");
            JsonRpcError::new(req.id.clone(), JsonRpcErrorData::with_message(e.code(), e.to_string()))
        })?;

        let output = serde_json::to_value(&output).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            JsonRpcError::internal_error(
                req.id.clone(),
                "Internal error: failed to serialise result",
            )
        })?;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "output": output }),
        ))
    }

    /// Dispatches a tool call by name.
    fn call_tool(&mut self, params: &ToolCallParams) -> Result<ToolOutput, ToolError> {
        let tool = Tool::from_name(&params.name)?;
        tracing::debug!(tool = tool.name(), "Calling tool");

        match tool {
            Tool::CalculateProperty => {
                let args = tool.arguments(&params.arguments)?;
                self.call_calculate_property(&args)
            }
            Tool::SearchComponents => {
                let args = tool.arguments(&params.arguments)?;
                Ok(self.call_search_components(&args))
            }
            Tool::ListAvailableComponents => Ok(self.call_list_available_components()),
            Tool::ListAvailableProperties => Ok(self.call_list_available_properties()),
        }
    }

    /// Evaluates one property of one component.
    fn call_calculate_property(&mut self, args: &CalculatePropertyArgs) -> Result<ToolOutput, ToolError> {
        let property: Property = args.property.parse()?;
        if !self.backend.properties().contains(&property) {
            return Err(ToolError::UnsupportedProperty {
                property: property.to_string(),
                backend: self.backend.name(),
            });
        }

        let unit = match args.temperature_unit.as_deref() {
            Some(tag) => TemperatureUnit::from_str_loose(tag)
                .ok_or_else(|| ToolError::InvalidUnit(tag.to_string()))?,
            None => self.temperature_unit,
        };
        let state = StatePoint::new(unit.to_kelvin(args.temperature), args.pressure)?;

        let handle = self.backend.resolve(&args.component, state)?;
        let value = self.backend.property(&handle, property)?;
        let provenance = self.backend.describe(&handle, property);
        let phase = self.phase_of(&handle);

        tracing::debug!(
            component = %handle.identity.name,
            %property,
            temperature = state.temperature,
            pressure = state.pressure,
            ?value,
            "Evaluated property"
        );

        Ok(Evaluation {
            component: &args.component,
            property,
            handle: &handle,
            value,
            provenance,
            phase,
        }
        .render())
    }

    /// Phase at the handle's state point, if the backend reports one.
    fn phase_of(&self, handle: &ChemicalHandle) -> Option<Phase> {
        if !self.backend.properties().contains(&Property::Phase) {
            return None;
        }
        match self.backend.property(handle, Property::Phase) {
            Ok(PropertyValue::Phase(phase)) => Some(phase),
            _ => None,
        }
    }

    fn call_search_components(&self, args: &SearchComponentsArgs) -> ToolOutput {
        let hits = self.backend.search(&args.query);
        ToolOutput::Text(report::search_text(&args.query, &hits))
    }

    fn call_list_available_components(&self) -> ToolOutput {
        let names = self.backend.components();
        ToolOutput::Text(report::components_text(self.backend.name(), &names))
    }

    fn call_list_available_properties(&self) -> ToolOutput {
        ToolOutput::Text(report::properties_text(self.backend.properties()))
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("backend", &self.backend.name())
            .field("temperature_unit", &self.temperature_unit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::mock::MockBackend;
    use serde_json::Value;
    use crate::thermo::Cached;

    fn mock_server() -> McpServer {
        McpServer::new(Box::new(Cached::new(MockBackend::new(), 16)))
    }

    fn call(server: &mut McpServer, id: i64, tool: &str, arguments: &Value) -> Result<Value, Value> {
        let line = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "call_tool",
            "params": {"name": tool, "arguments": arguments}
        })
        .to_string();
        server
            .handle_line(&line)
            .map(|r| serde_json::to_value(r).unwrap())
            .map_err(|e| serde_json::to_value(e).unwrap())
    }

    // ==================== Dispatch ====================

    #[test]
    fn list_tools_returns_catalog() {
        let mut server = mock_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"list_tools"}"#)
            .unwrap();
        let tools = response.result["tools"].as_array().unwrap();
        let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            [
                "calculate_property",
                "search_components",
                "list_available_components",
                "list_available_properties"
            ]
        );
    }

    #[test]
    fn mcp_method_names_are_aliases() {
        let mut server = mock_server();
        let a = server.handle_line(r#"{"id":1,"method":"list_tools"}"#).unwrap();
        let b = server.handle_line(r#"{"id":1,"method":"tools/list"}"#).unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn unknown_method_is_method_not_found() {
        let mut server = mock_server();
        let error = server
            .handle_line(r#"{"id":"x","method":"resources/list"}"#)
            .unwrap_err();
        assert_eq!(error.error.code, -32601);
        assert!(error.error.message.contains("resources/list"));
        assert_eq!(error.id, json!("x"));
    }

    #[test]
    fn initialize_reports_server_info() {
        let mut server = mock_server();
        let response = server
            .handle_line(r#"{"id":0,"method":"initialize","params":{"clientInfo":{"name":"test"}}}"#)
            .unwrap();
        assert_eq!(response.result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(response.result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn ping_returns_empty_result() {
        let mut server = mock_server();
        let response = server.handle_line(r#"{"id":5,"method":"ping"}"#).unwrap();
        assert_eq!(response.result, json!({}));
    }

    // ==================== Tool calls ====================

    #[test]
    fn unknown_tool_is_tool_failure() {
        let mut server = mock_server();
        let error = call(&mut server, 2, "get_weather", &json!({})).unwrap_err();
        assert_eq!(error["error"]["code"], -32000);
        assert_eq!(error["error"]["message"], "Unknown tool: get_weather");
        assert_eq!(error["id"], 2);
    }

    #[test]
    fn missing_params_is_unknown_tool() {
        let mut server = mock_server();
        let error = server.handle_line(r#"{"id":3,"method":"call_tool"}"#).unwrap_err();
        assert_eq!(error.error.code, -32000);
        assert!(error.error.message.starts_with("Unknown tool"));
    }

    #[test]
    fn water_density_report() {
        let mut server = mock_server();
        let response = call(
            &mut server,
            4,
            "calculate_property",
            &json!({"component": "water", "property": "density", "temperature": 298.15, "pressure": 101_325}),
        )
        .unwrap();
        let output = &response["result"]["output"];
        let value = output["value"].as_f64().unwrap();
        assert!((value - 997.0).abs() < 1.0, "got {value}");
        assert_eq!(output["unit"], "kg/m³");
        assert_eq!(output["cas_number"], "7732-18-5");
    }

    #[test]
    fn out_of_range_is_not_available_text() {
        let mut server = mock_server();
        let response = call(
            &mut server,
            5,
            "calculate_property",
            &json!({"component": "water", "property": "density", "temperature": 500.0, "pressure": 101_325}),
        )
        .unwrap();
        let text = response["result"]["output"].as_str().unwrap();
        assert!(text.starts_with("Property 'density' not available for water"), "{text}");
    }

    #[test]
    fn celsius_heuristic_and_explicit_units() {
        let mut server = mock_server();
        let args = |unit: Option<&str>| {
            let mut args = json!({"component": "water", "property": "density", "temperature": 25.0, "pressure": 101_325});
            if let Some(unit) = unit {
                args["temperature_unit"] = json!(unit);
            }
            args
        };

        let auto = call(&mut server, 1, "calculate_property", &args(None)).unwrap();
        assert!((auto["result"]["output"]["temperature_K"].as_f64().unwrap() - 298.15).abs() < 1e-9);

        let celsius = call(&mut server, 2, "calculate_property", &args(Some("C"))).unwrap();
        assert_eq!(auto["result"]["output"]["value"], celsius["result"]["output"]["value"]);

        // 25 K is far outside the water formula.
        let kelvin = call(&mut server, 3, "calculate_property", &args(Some("K"))).unwrap();
        assert!(kelvin["result"]["output"].is_string());

        let bad = call(&mut server, 4, "calculate_property", &args(Some("F"))).unwrap_err();
        assert!(bad["error"]["message"].as_str().unwrap().contains("temperature_unit"));
    }

    #[test]
    fn server_default_unit_applies() {
        let mut server = mock_server().with_temperature_unit(TemperatureUnit::Kelvin);
        let response = call(
            &mut server,
            1,
            "calculate_property",
            &json!({"component": "water", "property": "density", "temperature": 150.0, "pressure": 101_325}),
        )
        .unwrap();
        // 150 K, not 150 °C.
        assert!(response["result"]["output"].is_string());
    }

    #[test]
    fn unknown_property_and_component() {
        let mut server = mock_server();
        let error = call(
            &mut server,
            1,
            "calculate_property",
            &json!({"component": "water", "property": "colour", "temperature": 300, "pressure": 1e5}),
        )
        .unwrap_err();
        assert_eq!(error["error"]["code"], -32000);
        assert!(error["error"]["message"].as_str().unwrap().contains("colour"));

        let error = call(
            &mut server,
            2,
            "calculate_property",
            &json!({"component": "unobtainium", "property": "density", "temperature": 300, "pressure": 1e5}),
        )
        .unwrap_err();
        assert!(error["error"]["message"].as_str().unwrap().contains("unobtainium"));
    }

    #[test]
    fn property_outside_backend_set_is_rejected() {
        let mut server = mock_server();
        let error = call(
            &mut server,
            1,
            "calculate_property",
            &json!({"component": "water", "property": "critical_temperature", "temperature": 300, "pressure": 1e5}),
        )
        .unwrap_err();
        assert!(error["error"]["message"].as_str().unwrap().contains("mock backend"));
    }

    #[test]
    fn missing_argument_is_tool_failure() {
        let mut server = mock_server();
        let error = call(
            &mut server,
            1,
            "calculate_property",
            &json!({"component": "water", "property": "density", "temperature": 300}),
        )
        .unwrap_err();
        assert_eq!(error["error"]["code"], -32000);
        assert!(error["error"]["message"].as_str().unwrap().contains("pressure"));
    }

    #[test]
    fn non_physical_state_is_tool_failure() {
        let mut server = mock_server();
        let error = call(
            &mut server,
            1,
            "calculate_property",
            &json!({"component": "water", "property": "density", "temperature": 300, "pressure": -1}),
        )
        .unwrap_err();
        assert_eq!(error["error"]["code"], -32000);
    }

    #[test]
    fn repeated_queries_resolve_once() {
        let mut server = mock_server();
        let args = json!({"component": "water", "property": "density", "temperature": 298.15, "pressure": 101_325});
        let first = call(&mut server, 1, "calculate_property", &args).unwrap();
        let second = call(&mut server, 2, "calculate_property", &args).unwrap();
        assert_eq!(first["result"], second["result"]);

        let stats = server.cache_stats().unwrap();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn listing_tools() {
        let mut server = mock_server();
        let components = call(&mut server, 1, "list_available_components", &Value::Null).unwrap();
        let text = components["result"]["output"].as_str().unwrap();
        assert!(text.contains("  • water"));

        let properties = call(&mut server, 2, "list_available_properties", &json!({})).unwrap();
        let text = properties["result"]["output"].as_str().unwrap();
        assert!(text.contains("density - Mass density (kg/m³)"));
        assert!(!text.contains("critical_temperature"));
    }

    #[test]
    fn search_tool() {
        let mut server = mock_server();
        let response = call(&mut server, 1, "search_components", &json!({"query": "eth"})).unwrap();
        let text = response["result"]["output"].as_str().unwrap();
        assert!(text.starts_with("Found"));
        assert!(text.contains("ethanol"));
    }
}
