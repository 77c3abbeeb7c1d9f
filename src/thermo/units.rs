//! Unit handling for state points and results.
//!
//! Temperatures arrive either in kelvin or degrees Celsius. The `auto` mode
//! keeps the long-standing heuristic that values below 200 are Celsius; it is
//! ambiguous for cryogenic work, so callers can pin the unit explicitly.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

/// Offset between the Celsius and kelvin scales.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Temperatures below this value are read as Celsius in `auto` mode.
pub const CELSIUS_HEURISTIC_THRESHOLD: f64 = 200.0;

/// One standard atmosphere in pascal.
pub const STANDARD_ATMOSPHERE: f64 = 101_325.0;

/// How an incoming temperature should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    /// Kelvin unless the value is below [`CELSIUS_HEURISTIC_THRESHOLD`].
    #[default]
    Auto,
    /// Always kelvin.
    Kelvin,
    /// Always degrees Celsius.
    Celsius,
}

impl TemperatureUnit {
    /// Parses a unit tag.
    ///
    /// Accepts: "auto", "K", "kelvin", "C", "celsius", "°C" (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "k" | "kelvin" => Some(Self::Kelvin),
            "c" | "celsius" | "°c" => Some(Self::Celsius),
            _ => None,
        }
    }

    /// Converts a temperature in this unit to kelvin.
    #[must_use]
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Self::Kelvin => value,
            Self::Celsius => value + CELSIUS_OFFSET,
            Self::Auto if value < CELSIUS_HEURISTIC_THRESHOLD => value + CELSIUS_OFFSET,
            Self::Auto => value,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Kelvin => write!(f, "K"),
            Self::Celsius => write!(f, "C"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s)
            .ok_or_else(|| format!("invalid temperature unit '{s}'. Must be one of: auto, K, C"))
    }
}

/// Converts kelvin to degrees Celsius.
#[must_use]
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - CELSIUS_OFFSET
}

/// Formats a number for display.
///
/// Large and small magnitudes use scientific notation, everything else four
/// decimals.
#[must_use]
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > 1000.0 || (magnitude < 0.001 && magnitude != 0.0) {
        format!("{value:.4e}")
    } else {
        format!("{value:.4}")
    }
}

/// Rounds to the given number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Conversion table for a density in kg/m³.
#[must_use]
pub fn density_conversions(kg_per_m3: f64) -> IndexMap<&'static str, f64> {
    IndexMap::from([
        ("kg/m³", kg_per_m3),
        ("g/cm³", kg_per_m3 / 1000.0),
        ("lb/ft³", kg_per_m3 * 0.062_428),
        ("g/L", kg_per_m3),
        ("kg/L", kg_per_m3 / 1000.0),
    ])
}

/// Conversion table for a pressure in Pa.
#[must_use]
pub fn pressure_conversions(pascal: f64) -> IndexMap<&'static str, f64> {
    IndexMap::from([
        ("Pa", pascal),
        ("kPa", pascal / 1000.0),
        ("bar", pascal / 100_000.0),
        ("atm", pascal / STANDARD_ATMOSPHERE),
        ("psi", pascal * 0.000_145_038),
        ("mmHg", pascal * 0.007_500_62),
    ])
}
