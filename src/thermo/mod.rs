//! Property backends.
//!
//! A backend turns a component name and a state point into property values.
//! The dispatch loop only sees the [`PropertyBackend`] trait; which backend is
//! behind it is decided once at startup.
//!
//! # Backends
//!
//! - [`mock`]: a handful of textbook formulas for common liquids
//! - [`correlation`]: a compound table with vapour pressure, density, heat
//!   capacity and transport correlations, extensible from CSV
//! - [`phase`]: standard-state models of solid phases (`get_phase` /
//!   `set_state` style)
//!
//! Any backend can be wrapped in [`Cached`] to memoise component resolution.

pub mod cache;
pub mod correlation;
pub mod error;
pub mod mock;
pub mod phase;
pub mod property;
pub mod units;

pub use cache::{CacheStats, Cached};
pub use error::{BackendError, BackendResult};
pub use property::{Category, Phase, Property, PropertyValue};
pub use units::TemperatureUnit;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum number of hits returned by [`PropertyBackend::search`].
pub const SEARCH_LIMIT: usize = 10;

/// Reference temperature for standard-state data (K).
pub const REFERENCE_TEMPERATURE: f64 = 298.15;

/// Universal gas constant (J/(mol·K)).
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// A (temperature, pressure) pair at which properties are evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Pressure in pascal.
    pub pressure: f64,
}

impl StatePoint {
    /// Creates a validated state point.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite or not strictly positive.
    pub fn new(temperature: f64, pressure: f64) -> BackendResult<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(BackendError::invalid_state(format!(
                "temperature must be a positive number of kelvin, got {temperature}"
            )));
        }
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(BackendError::invalid_state(format!(
                "pressure must be a positive number of pascal, got {pressure}"
            )));
        }
        Ok(Self {
            temperature,
            pressure,
        })
    }
}

/// Identity of a resolved component.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalIdentity {
    /// Canonical name.
    pub name: String,
    /// Registry identifier (CAS number), if known.
    pub registry_id: Option<String>,
    /// Empirical formula, if known.
    pub formula: Option<String>,
    /// Molecular weight in g/mol, if known.
    pub molecular_weight: Option<f64>,
}

/// A component resolved at a specific state point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalHandle {
    /// What was resolved.
    pub identity: ChemicalIdentity,
    /// Where it will be evaluated.
    pub state: StatePoint,
    /// Backend-specific index of the component in its own table.
    pub key: usize,
}

/// Temperature interval over which a correlation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidityRange {
    /// Lower bound.
    #[serde(rename = "T_min")]
    pub t_min: f64,
    /// Upper bound.
    #[serde(rename = "T_max")]
    pub t_max: f64,
    /// Unit of the bounds.
    #[serde(rename = "T_unit")]
    pub t_unit: &'static str,
}

impl ValidityRange {
    /// Creates a range in kelvin.
    #[must_use]
    pub const fn kelvin(t_min: f64, t_max: f64) -> Self {
        Self {
            t_min,
            t_max,
            t_unit: "K",
        }
    }

    /// Returns `true` if the temperature lies inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, temperature: f64) -> bool {
        (self.t_min..=self.t_max).contains(&temperature)
    }
}

/// Best-effort description of how a value was obtained.
///
/// Missing fields are normal; callers must not treat them as failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Provenance {
    /// Calculation method.
    pub method: Option<String>,
    /// Equation used, in human-readable form.
    pub equation: Option<String>,
    /// Range in which the method is valid.
    pub validity_range: Option<ValidityRange>,
    /// Typical uncertainty.
    pub uncertainty: Option<String>,
    /// Literature references.
    pub references: Vec<String>,
}

impl Provenance {
    /// Creates a provenance record with a method name.
    #[must_use]
    pub fn method(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Sets the equation.
    #[must_use]
    pub fn with_equation(mut self, equation: impl Into<String>) -> Self {
        self.equation = Some(equation.into());
        self
    }

    /// Sets the validity range.
    #[must_use]
    pub const fn with_range(mut self, range: ValidityRange) -> Self {
        self.validity_range = Some(range);
        self
    }

    /// Sets the uncertainty.
    #[must_use]
    pub fn with_uncertainty(mut self, uncertainty: impl Into<String>) -> Self {
        self.uncertainty = Some(uncertainty.into());
        self
    }

    /// Sets the references.
    #[must_use]
    pub fn with_references(mut self, references: &[&str]) -> Self {
        self.references = references.iter().map(ToString::to_string).collect();
        self
    }
}

/// One entry returned by a component search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Component name.
    pub name: String,
    /// Registry identifier (CAS number), if known.
    pub registry_id: Option<String>,
    /// Empirical formula, if known.
    pub formula: Option<String>,
}

/// The seam between the dispatch loop and a source of property data.
pub trait PropertyBackend {
    /// Short backend name used in logs and messages.
    fn name(&self) -> &'static str;

    /// Resolves a component by name, synonym, registry identifier or formula.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ComponentNotFound`] if nothing matches.
    fn resolve(&mut self, component: &str, state: StatePoint) -> BackendResult<ChemicalHandle>;

    /// Evaluates a property for a resolved component.
    ///
    /// Properties the backend knows but cannot evaluate at this state point
    /// come back as [`PropertyValue::NotAvailable`].
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation itself fails.
    fn property(&self, handle: &ChemicalHandle, property: Property) -> BackendResult<PropertyValue>;

    /// Describes how a property value is obtained.
    fn describe(&self, handle: &ChemicalHandle, property: Property) -> Provenance;

    /// Fuzzy search across the backend's index, at most [`SEARCH_LIMIT`] hits.
    fn search(&self, query: &str) -> Vec<SearchHit>;

    /// Names of the components available for listing, in display order.
    fn components(&self) -> Vec<String>;

    /// Properties this backend accepts.
    fn properties(&self) -> &'static [Property];

    /// Resolution cache statistics, if this backend caches.
    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }
}

/// Which backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hardcoded textbook formulas.
    Mock,
    /// Compound correlation table.
    #[default]
    Correlation,
    /// Solid phase database.
    Phase,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Correlation => write!(f, "correlation"),
            Self::Phase => write!(f, "phase"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "correlation" => Ok(Self::Correlation),
            "phase" => Ok(Self::Phase),
            _ => Err(format!(
                "unknown backend '{s}'. Must be one of: mock, correlation, phase"
            )),
        }
    }
}

/// Builds the configured backend, wrapped in a resolution cache.
///
/// A `cache_capacity` of zero disables caching. `compound_database` is only
/// read by the correlation backend.
///
/// # Errors
///
/// Returns an error if the compound database cannot be loaded.
pub fn build_backend(
    kind: BackendKind,
    cache_capacity: usize,
    compound_database: Option<&Path>,
) -> BackendResult<Box<dyn PropertyBackend>> {
    let backend: Box<dyn PropertyBackend> = match kind {
        BackendKind::Mock => Box::new(Cached::new(mock::MockBackend::new(), cache_capacity)),
        BackendKind::Correlation => {
            let mut backend = correlation::CorrelationBackend::new();
            if let Some(path) = compound_database {
                let added = backend.load_csv(path)?;
                tracing::info!(path = %path.display(), added, "Loaded compound database");
            }
            Box::new(Cached::new(backend, cache_capacity))
        }
        BackendKind::Phase => Box::new(Cached::new(phase::PhaseBackend::new(), cache_capacity)),
    };
    Ok(backend)
}

/// Ranks how well `query` matches `candidate` (lower is better).
///
/// Both arguments are expected in lower case.
pub(crate) fn match_rank(candidate: &str, query: &str) -> Option<u8> {
    if candidate == query {
        Some(0)
    } else if candidate.starts_with(query) {
        Some(1)
    } else if candidate.contains(query) {
        Some(2)
    } else {
        None
    }
}
