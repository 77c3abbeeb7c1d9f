//! Tool catalog and typed tool arguments.
//!
//! The catalog is static: `list_tools` returns the same descriptors on every
//! call. Each tool's arguments deserialise into a struct whose fields without
//! defaults are exactly the tool's `required` list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ToolError;

/// A tool definition for the `list_tools` response.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// The tools this server offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    CalculateProperty,
    SearchComponents,
    ListAvailableComponents,
    ListAvailableProperties,
}

impl Tool {
    /// All tools, in catalog order.
    pub const ALL: [Self; 4] = [
        Self::CalculateProperty,
        Self::SearchComponents,
        Self::ListAvailableComponents,
        Self::ListAvailableProperties,
    ];

    /// Returns the tool's wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CalculateProperty => "calculate_property",
            Self::SearchComponents => "search_components",
            Self::ListAvailableComponents => "list_available_components",
            Self::ListAvailableProperties => "list_available_properties",
        }
    }

    /// Looks up a tool by wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] if no tool has that name.
    pub fn from_name(name: &str) -> Result<Self, ToolError> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Returns the tool's catalog entry.
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        match self {
            Self::CalculateProperty => ToolDefinition {
                name: self.name(),
                description: "Calculate a thermodynamic or physical property of a chemical \
                              component at a given temperature and pressure. Returns the value \
                              with its unit, the calculation method, its validity range and \
                              literature references.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "component": {
                            "type": "string",
                            "description": "Component name, synonym, CAS number or formula (e.g. 'water', '64-17-5', 'CO2')"
                        },
                        "property": {
                            "type": "string",
                            "description": "Property to calculate (e.g. 'density', 'vapor_pressure', 'gibbs_energy'). See list_available_properties."
                        },
                        "temperature": {
                            "type": "number",
                            "description": "Temperature. Interpreted according to temperature_unit; by default values below 200 are taken as °C, others as K."
                        },
                        "pressure": {
                            "type": "number",
                            "description": "Pressure in Pa"
                        },
                        "temperature_unit": {
                            "type": "string",
                            "enum": ["auto", "K", "C"],
                            "description": "Unit of the temperature argument (default: server setting, normally 'auto')"
                        }
                    },
                    "required": ["component", "property", "temperature", "pressure"]
                }),
            },
            Self::SearchComponents => ToolDefinition {
                name: self.name(),
                description: "Search the component database by name, synonym, CAS number or \
                              formula. Returns at most 10 matches, best first.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search text (e.g. 'eth', 'C6H6', '7732-18-5')"
                        }
                    },
                    "required": ["query"]
                }),
            },
            Self::ListAvailableComponents => ToolDefinition {
                name: self.name(),
                description: "List the chemical components available in the database",
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            Self::ListAvailableProperties => ToolDefinition {
                name: self.name(),
                description: "List the properties that can be calculated, grouped by category, \
                              with their units",
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        }
    }

    /// Deserialises this tool's arguments.
    ///
    /// A missing or `null` argument object counts as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArguments`] if required arguments are
    /// missing or have the wrong type.
    pub fn arguments<T: DeserializeOwned>(self, arguments: &Value) -> Result<T, ToolError> {
        let arguments = if arguments.is_null() {
            json!({})
        } else {
            arguments.clone()
        };
        serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
            tool: self.name(),
            source,
        })
    }
}

/// Returns the full catalog.
#[must_use]
pub fn catalog() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

/// Arguments of `calculate_property`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatePropertyArgs {
    pub component: String,
    pub property: String,
    pub temperature: f64,
    pub pressure: f64,
    #[serde(default)]
    pub temperature_unit: Option<String>,
}

/// Arguments of `search_components`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchComponentsArgs {
    pub query: String,
}
