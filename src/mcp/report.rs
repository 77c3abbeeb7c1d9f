//! Formatting of tool results.
//!
//! Backends return bare numbers; this module attaches units, converts the
//! temperature for display, builds conversion tables and writes the
//! human-readable text that accompanies every result.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;

use crate::thermo::units::{density_conversions, format_value, kelvin_to_celsius, pressure_conversions};
use crate::thermo::{Category, ChemicalHandle, Phase, Property, PropertyValue, Provenance, SearchHit};

/// Components shown before the listing is truncated.
pub const COMPONENT_LISTING_LIMIT: usize = 20;

/// Fallback data source when a backend names no references.
const DEFAULT_SOURCE: &str = "Built-in correlation data";

/// The `output` of a successful tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// Plain text.
    Text(String),
    /// A structured property result.
    Report(Box<PropertyReport>),
}

impl ToolOutput {
    /// Returns the text, or the report's formatted text.
    #[cfg(test)]
    fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Report(report) => &report.formatted_text,
        }
    }
}

/// A numeric property result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyReport {
    pub property: Property,
    pub component: String,
    pub value: f64,
    pub unit: &'static str,
    #[serde(rename = "temperature_K")]
    pub temperature_k: f64,
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    #[serde(rename = "pressure_Pa")]
    pub pressure_pa: f64,
    pub cas_number: Option<String>,
    pub molecular_weight: Option<f64>,
    pub molecular_weight_unit: &'static str,
    pub phase: Option<Phase>,
    pub data_sources: Vec<String>,
    pub calculation_details: Option<Provenance>,
    pub webbook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<IndexMap<&'static str, f64>>,
    pub formatted_text: String,
}

/// Everything known about one evaluated property.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    /// The component as the caller spelled it.
    pub component: &'a str,
    pub property: Property,
    pub handle: &'a ChemicalHandle,
    pub value: PropertyValue,
    pub provenance: Provenance,
    /// Phase at the state point, if the backend can tell.
    pub phase: Option<Phase>,
}

impl Evaluation<'_> {
    /// `T=…K (…°C), P=…Pa`
    fn state_text(&self) -> String {
        let state = self.handle.state;
        format!(
            "T={:.2}K ({:.2}°C), P={}Pa",
            state.temperature,
            kelvin_to_celsius(state.temperature),
            state.pressure
        )
    }

    /// Renders the evaluation as a tool output.
    #[must_use]
    pub fn render(self) -> ToolOutput {
        match self.value {
            PropertyValue::NotAvailable => ToolOutput::Text(format!(
                "Property '{}' not available for {} at {}",
                self.property,
                self.component,
                self.state_text()
            )),
            PropertyValue::Phase(phase) => ToolOutput::Text(format!(
                "Phase of {} at {}: {phase}",
                self.component,
                self.state_text()
            )),
            PropertyValue::Number(value) => ToolOutput::Report(Box::new(self.report(value))),
        }
    }

    fn report(self, value: f64) -> PropertyReport {
        let identity = &self.handle.identity;
        let state = self.handle.state;
        let unit = self.property.unit();

        let formatted_text = format!(
            "{} of {} at {}: {} {unit}{}",
            self.property,
            self.component,
            self.state_text(),
            format_value(value),
            self.source_information()
        );

        let data_sources = if self.provenance.references.is_empty() {
            vec![DEFAULT_SOURCE.to_string()]
        } else {
            self.provenance.references.clone()
        };

        let conversions = match self.property {
            Property::Density => Some(density_conversions(value)),
            property if property.is_pressure() => Some(pressure_conversions(value)),
            _ => None,
        };

        PropertyReport {
            property: self.property,
            component: self.component.to_string(),
            value,
            unit,
            temperature_k: state.temperature,
            temperature_c: kelvin_to_celsius(state.temperature),
            pressure_pa: state.pressure,
            cas_number: identity.registry_id.clone(),
            molecular_weight: identity.molecular_weight,
            molecular_weight_unit: "g/mol",
            phase: self.phase,
            data_sources,
            webbook_url: identity.registry_id.as_deref().map(webbook_url),
            calculation_details: self.provenance.method.is_some().then_some(self.provenance),
            conversions,
            formatted_text,
        }
    }

    /// The "Data Source Information" block of the formatted text.
    fn source_information(&self) -> String {
        let identity = &self.handle.identity;
        let provenance = &self.provenance;
        let mut text = String::from("\n\nData Source Information:");

        if let Some(cas) = &identity.registry_id {
            let _ = write!(text, "\n• CAS Registry Number: {cas}");
        }
        if let Some(mw) = identity.molecular_weight {
            let _ = write!(text, "\n• Molecular Weight: {mw:.4} g/mol");
        }
        if let Some(method) = &provenance.method {
            let _ = write!(text, "\n• Calculation Method: {method}");
        }
        if let Some(equation) = &provenance.equation {
            let _ = write!(text, "\n• Equation: {equation}");
        }
        if let Some(uncertainty) = &provenance.uncertainty {
            let _ = write!(text, "\n• Uncertainty: {uncertainty}");
        }
        if let Some(range) = &provenance.validity_range {
            let _ = write!(
                text,
                "\n• Valid Temperature Range: {:.1} - {:.1} {}",
                range.t_min, range.t_max, range.t_unit
            );
        }

        text.push_str("\n• Data Sources:");
        if provenance.references.is_empty() {
            let _ = write!(text, "\n  - {DEFAULT_SOURCE}");
        }
        for reference in &provenance.references {
            let _ = write!(text, "\n  - {reference}");
        }
        text
    }
}

/// NIST Chemistry WebBook page for a CAS number.
#[must_use]
pub fn webbook_url(cas: &str) -> String {
    format!(
        "https://webbook.nist.gov/cgi/cbook.cgi?ID=C{}",
        cas.replace('-', "")
    )
}

/// Text for a component search.
#[must_use]
pub fn search_text(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No components found matching '{query}'");
    }

    let mut text = format!("Found {} components matching '{query}':", hits.len());
    for hit in hits {
        let _ = write!(text, "\n  • {}", hit.name);
        if let Some(cas) = &hit.registry_id {
            let _ = write!(text, " (CAS: {cas})");
        }
        if let Some(formula) = &hit.formula {
            let _ = write!(text, " [{formula}]");
        }
    }
    text
}

/// Text for the component listing, truncated after
/// [`COMPONENT_LISTING_LIMIT`] names.
#[must_use]
pub fn components_text(backend: &str, names: &[String]) -> String {
    let mut text = format!(
        "Available components in the {backend} database ({}):",
        names.len()
    );
    for name in names.iter().take(COMPONENT_LISTING_LIMIT) {
        let _ = write!(text, "\n  • {name}");
    }
    if names.len() > COMPONENT_LISTING_LIMIT {
        let _ = write!(
            text,
            "\n  … and {} more",
            names.len() - COMPONENT_LISTING_LIMIT
        );
    }
    text.push_str("\n\nUse 'search_components' to find specific chemicals by name, formula or CAS number.");
    text
}

/// Text for the property listing, grouped by category.
#[must_use]
pub fn properties_text(properties: &[Property]) -> String {
    let mut sections = Vec::new();
    for category in Category::ALL {
        let mut lines: Vec<String> = properties
            .iter()
            .filter(|p| p.category() == category)
            .map(|p| match p.unit() {
                "" => format!("  • {} - {}", p.name(), p.description()),
                unit => format!("  • {} - {} ({unit})", p.name(), p.description()),
            })
            .collect();
        if lines.is_empty() {
            continue;
        }
        lines.insert(0, format!("{}:", category.heading()));
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::{ChemicalIdentity, StatePoint, ValidityRange};

    fn water_handle(temperature: f64) -> ChemicalHandle {
        ChemicalHandle {
            identity: ChemicalIdentity {
                name: "water".to_string(),
                registry_id: Some("7732-18-5".to_string()),
                formula: Some("H2O".to_string()),
                molecular_weight: Some(18.015_28),
            },
            state: StatePoint::new(temperature, 101_325.0).unwrap(),
            key: 0,
        }
    }

    fn evaluation(handle: &ChemicalHandle, property: Property, value: PropertyValue) -> Evaluation<'_> {
        Evaluation {
            component: "water",
            property,
            handle,
            value,
            provenance: Provenance::method("Polynomial approximation")
                .with_range(ValidityRange::kelvin(273.0, 423.0))
                .with_references(&["Kell (1975)"]),
            phase: Some(Phase::Liquid),
        }
    }

    #[test]
    fn not_available_text() {
        let handle = water_handle(500.0);
        let output = evaluation(&handle, Property::Density, PropertyValue::NotAvailable).render();
        assert_eq!(
            output,
            ToolOutput::Text(
                "Property 'density' not available for water at T=500.00K (226.85°C), P=101325Pa"
                    .to_string()
            )
        );
    }

    #[test]
    fn phase_text() {
        let handle = water_handle(298.15);
        let output =
            evaluation(&handle, Property::Phase, PropertyValue::Phase(Phase::Liquid)).render();
        assert!(output.text().ends_with(": liquid"), "{}", output.text());
    }

    #[test]
    fn density_report() {
        let handle = water_handle(298.15);
        let output =
            evaluation(&handle, Property::Density, PropertyValue::Number(997.0)).render();
        let ToolOutput::Report(report) = output else {
            panic!("expected a report");
        };

        assert_eq!(report.unit, "kg/m³");
        assert!((report.temperature_c - 25.0).abs() < 1e-9);
        assert_eq!(
            report.webbook_url.as_deref(),
            Some("https://webbook.nist.gov/cgi/cbook.cgi?ID=C7732185")
        );
        let conversions = report.conversions.as_ref().unwrap();
        assert!((conversions["g/cm³"] - 0.997).abs() < 1e-12);
        assert!(report.formatted_text.starts_with(
            "density of water at T=298.15K (25.00°C), P=101325Pa: 997.0000 kg/m³"
        ));
        assert!(report
            .formatted_text
            .contains("• Valid Temperature Range: 273.0 - 423.0 K"));
        assert_eq!(report.data_sources, ["Kell (1975)"]);
    }

    #[test]
    fn report_serialises_documented_keys() {
        let handle = water_handle(298.15);
        let output =
            evaluation(&handle, Property::VaporPressure, PropertyValue::Number(3169.0)).render();
        let json = serde_json::to_value(&output).unwrap();
        for key in [
            "property",
            "component",
            "value",
            "unit",
            "temperature_K",
            "temperature_C",
            "pressure_Pa",
            "cas_number",
            "molecular_weight",
            "molecular_weight_unit",
            "phase",
            "data_sources",
            "calculation_details",
            "webbook_url",
            "conversions",
            "formatted_text",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["property"], "vapor_pressure");
        assert_eq!(json["phase"], "liquid");
        assert_eq!(json["calculation_details"]["validity_range"]["T_unit"], "K");
        assert!(json["conversions"].get("mmHg").is_some());
    }

    #[test]
    fn large_values_use_scientific_notation() {
        let handle = water_handle(298.15);
        let output =
            evaluation(&handle, Property::VaporPressure, PropertyValue::Number(3169.0)).render();
        assert!(output.text().contains(": 3.1690e3 Pa"), "{}", output.text());
    }

    #[test]
    fn search_text_lists_hits() {
        let hits = [
            SearchHit {
                name: "ethanol".to_string(),
                registry_id: Some("64-17-5".to_string()),
                formula: Some("C2H6O".to_string()),
            },
            SearchHit {
                name: "Fayalite".to_string(),
                registry_id: None,
                formula: Some("Fe2SiO4".to_string()),
            },
        ];
        assert_eq!(
            search_text("eth", &hits),
            "Found 2 components matching 'eth':\n  • ethanol (CAS: 64-17-5) [C2H6O]\n  • Fayalite [Fe2SiO4]"
        );
        assert_eq!(search_text("zzz", &[]), "No components found matching 'zzz'");
    }

    #[test]
    fn long_component_listing_is_truncated() {
        let names: Vec<String> = (0..25).map(|i| format!("c{i}")).collect();
        let text = components_text("phase", &names);
        assert!(text.contains("(25)"));
        assert!(text.contains("  • c19"));
        assert!(!text.contains("  • c20"));
        assert!(text.contains("… and 5 more"));
    }

    #[test]
    fn properties_are_grouped() {
        let text = properties_text(&Property::ALL);
        assert!(text.starts_with("Physical Properties:\n  • density - Mass density (kg/m³)"));
        assert!(text.contains("  • phase - Current phase (liquid/gas/solid)"));
        assert!(text.ends_with("Other Properties:\n  • molecular_weight - Molecular weight (g/mol)"));

        let subset = properties_text(&[Property::Density, Property::Enthalpy]);
        assert!(!subset.contains("Phase Properties"));
    }
}
