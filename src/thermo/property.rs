//! Physical and thermodynamic properties.
//!
//! Properties form a closed set. Every backend maps the variants it supports
//! to its own evaluation code with an exhaustive `match`, so adding a property
//! is a compile-time change rather than a string lookup.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Grouping used when listing properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Transport and bulk physical properties.
    Physical,
    /// Caloric and state-function properties.
    Thermodynamic,
    /// Phase-change and critical properties.
    Phase,
    /// Everything else.
    Other,
}

impl Category {
    /// All categories, in listing order.
    pub const ALL: [Self; 4] = [Self::Physical, Self::Thermodynamic, Self::Phase, Self::Other];

    /// Heading used in property listings.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Physical => "Physical Properties",
            Self::Thermodynamic => "Thermodynamic Properties",
            Self::Phase => "Phase Properties",
            Self::Other => "Other Properties",
        }
    }
}

/// A property that can be evaluated at a state point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Density,
    Viscosity,
    ThermalConductivity,
    SurfaceTension,
    HeatCapacity,
    HeatCapacityCv,
    Enthalpy,
    Entropy,
    GibbsEnergy,
    HelmholtzEnergy,
    InternalEnergy,
    Volume,
    VaporPressure,
    HeatVaporization,
    CriticalTemperature,
    CriticalPressure,
    BoilingPoint,
    MeltingPoint,
    MolecularWeight,
    Phase,
}

impl Property {
    /// Every property, in listing order.
    pub const ALL: [Self; 20] = [
        Self::Density,
        Self::Viscosity,
        Self::ThermalConductivity,
        Self::SurfaceTension,
        Self::HeatCapacity,
        Self::HeatCapacityCv,
        Self::Enthalpy,
        Self::Entropy,
        Self::GibbsEnergy,
        Self::HelmholtzEnergy,
        Self::InternalEnergy,
        Self::Volume,
        Self::VaporPressure,
        Self::HeatVaporization,
        Self::Phase,
        Self::CriticalTemperature,
        Self::CriticalPressure,
        Self::BoilingPoint,
        Self::MeltingPoint,
        Self::MolecularWeight,
    ];

    /// Public name used in tool arguments.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Density => "density",
            Self::Viscosity => "viscosity",
            Self::ThermalConductivity => "thermal_conductivity",
            Self::SurfaceTension => "surface_tension",
            Self::HeatCapacity => "heat_capacity",
            Self::HeatCapacityCv => "heat_capacity_cv",
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
            Self::GibbsEnergy => "gibbs_energy",
            Self::HelmholtzEnergy => "helmholtz_energy",
            Self::InternalEnergy => "internal_energy",
            Self::Volume => "volume",
            Self::VaporPressure => "vapor_pressure",
            Self::HeatVaporization => "heat_vaporization",
            Self::CriticalTemperature => "critical_temperature",
            Self::CriticalPressure => "critical_pressure",
            Self::BoilingPoint => "boiling_point",
            Self::MeltingPoint => "melting_point",
            Self::MolecularWeight => "molecular_weight",
            Self::Phase => "phase",
        }
    }

    /// Unit string attached to values of this property.
    ///
    /// `phase` is categorical and has no unit.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Density => "kg/m³",
            Self::Viscosity => "Pa·s",
            Self::ThermalConductivity => "W/(m·K)",
            Self::SurfaceTension => "N/m",
            Self::HeatCapacity | Self::HeatCapacityCv | Self::Entropy => "J/(mol·K)",
            Self::Enthalpy
            | Self::GibbsEnergy
            | Self::HelmholtzEnergy
            | Self::InternalEnergy
            | Self::HeatVaporization => "J/mol",
            Self::Volume => "m³/mol",
            Self::VaporPressure | Self::CriticalPressure => "Pa",
            Self::CriticalTemperature | Self::BoilingPoint | Self::MeltingPoint => "K",
            Self::MolecularWeight => "g/mol",
            Self::Phase => "",
        }
    }

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Density => "Mass density",
            Self::Viscosity => "Dynamic viscosity",
            Self::ThermalConductivity => "Thermal conductivity",
            Self::SurfaceTension => "Surface tension",
            Self::HeatCapacity => "Heat capacity at constant pressure",
            Self::HeatCapacityCv => "Heat capacity at constant volume",
            Self::Enthalpy => "Molar enthalpy",
            Self::Entropy => "Molar entropy",
            Self::GibbsEnergy => "Gibbs free energy",
            Self::HelmholtzEnergy => "Helmholtz free energy",
            Self::InternalEnergy => "Internal energy",
            Self::Volume => "Molar volume",
            Self::VaporPressure => "Vapor pressure",
            Self::HeatVaporization => "Heat of vaporization",
            Self::CriticalTemperature => "Critical temperature",
            Self::CriticalPressure => "Critical pressure",
            Self::BoilingPoint => "Normal boiling point",
            Self::MeltingPoint => "Melting point",
            Self::MolecularWeight => "Molecular weight",
            Self::Phase => "Current phase (liquid/gas/solid)",
        }
    }

    /// Listing category.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Density | Self::Viscosity | Self::ThermalConductivity | Self::SurfaceTension => {
                Category::Physical
            }
            Self::HeatCapacity
            | Self::HeatCapacityCv
            | Self::Enthalpy
            | Self::Entropy
            | Self::GibbsEnergy
            | Self::HelmholtzEnergy
            | Self::InternalEnergy
            | Self::Volume => Category::Thermodynamic,
            Self::VaporPressure
            | Self::HeatVaporization
            | Self::Phase
            | Self::CriticalTemperature
            | Self::CriticalPressure
            | Self::BoilingPoint
            | Self::MeltingPoint => Category::Phase,
            Self::MolecularWeight => Category::Other,
        }
    }

    /// Whether results carry a pressure unit and get a pressure conversion table.
    #[must_use]
    pub const fn is_pressure(self) -> bool {
        matches!(self, Self::VaporPressure | Self::CriticalPressure)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a property name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropertyName(pub String);

impl FromStr for Property {
    type Err = UnknownPropertyName;

    /// Parses a property name (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPropertyName(s.to_string()))
    }
}

/// Physical phase of a component at a state point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

impl Phase {
    /// Human-readable phase name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Liquid => "liquid",
            Self::Gas => "gas",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of evaluating a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// A numeric value in the property's unit.
    Number(f64),
    /// A categorical phase value.
    Phase(Phase),
    /// The backend knows the property but cannot evaluate it at this state point.
    NotAvailable,
}

impl PropertyValue {
    /// Wraps an optional number, mapping `None` to `NotAvailable`.
    #[must_use]
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::NotAvailable, Self::Number)
    }

    /// Returns the numeric value, if any.
    #[must_use]
    pub const fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Phase(_) | Self::NotAvailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for property in Property::ALL {
            assert_eq!(property.name().parse::<Property>(), Ok(property));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Vapor_Pressure".parse::<Property>(), Ok(Property::VaporPressure));
        assert_eq!(" density ".parse::<Property>(), Ok(Property::Density));
    }

    #[test]
    fn unknown_property_keeps_original_text() {
        let err = "colour".parse::<Property>().unwrap_err();
        assert_eq!(err, UnknownPropertyName("colour".to_string()));
    }

    #[test]
    fn every_category_has_members() {
        for category in Category::ALL {
            assert!(Property::ALL.iter().any(|p| p.category() == category));
        }
    }

    #[test]
    fn units_match_table() {
        assert_eq!(Property::Density.unit(), "kg/m³");
        assert_eq!(Property::VaporPressure.unit(), "Pa");
        assert_eq!(Property::HeatCapacity.unit(), "J/(mol·K)");
        assert_eq!(Property::MolecularWeight.unit(), "g/mol");
        assert_eq!(Property::Phase.unit(), "");
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Liquid.to_string(), "liquid");
        assert_eq!(Phase::Gas.label(), "gas");
        assert_eq!(serde_json::to_value(Phase::Solid).unwrap(), "solid");
    }

    #[test]
    fn serialises_as_snake_case() {
        let json = serde_json::to_string(&Property::HeatCapacityCv).unwrap();
        assert_eq!(json, r#""heat_capacity_cv""#);
    }
}
