//! Mock backend built from a few textbook formulas.
//!
//! Good enough for demos and tests: water and ethanol have temperature
//! dependent density and vapour pressure, the other liquids return fixed
//! values. Outside a formula's range the value is not available.

use crate::thermo::units::{kelvin_to_celsius, round_to};
use crate::thermo::{
    match_rank, BackendError, BackendResult, ChemicalHandle, ChemicalIdentity,
    Property, PropertyBackend, PropertyValue, Provenance, SearchHit, StatePoint, ValidityRange,
    SEARCH_LIMIT,
};

/// Conversion from mmHg to Pa.
const MMHG_TO_PA: f64 = 133.322;

/// Coefficients of the Antoine equation in mmHg and °C.
#[derive(Debug, Clone, Copy)]
struct Antoine {
    a: f64,
    b: f64,
    c: f64,
}

impl Antoine {
    fn pressure(self, t_celsius: f64) -> f64 {
        10_f64.powf(self.a - self.b / (self.c + t_celsius)) * MMHG_TO_PA
    }
}

/// One liquid known to the mock backend.
#[derive(Debug)]
struct MockComponent {
    name: &'static str,
    cas: &'static str,
    formula: &'static str,
    molecular_weight: f64,
    /// Specific heat capacity in J/(kg·K).
    specific_heat: f64,
    density: MockDensity,
    /// Temperature range (°C) of the density and vapour pressure formulas.
    range_celsius: Option<(f64, f64)>,
    antoine: Option<Antoine>,
}

#[derive(Debug, Clone, Copy)]
enum MockDensity {
    /// Cubic fit to saturated liquid water, 0–150 °C (t in °C).
    WaterPolynomial,
    /// ρ = ρ₂₀ − slope·(t − 20) (t in °C).
    Linear { rho_20: f64, slope: f64 },
    /// Temperature independent.
    Constant(f64),
}

const COMPONENTS: [MockComponent; 5] = [
    MockComponent {
        name: "water",
        cas: "7732-18-5",
        formula: "H2O",
        molecular_weight: 18.015_28,
        specific_heat: 4184.0,
        density: MockDensity::WaterPolynomial,
        range_celsius: Some((0.0, 150.0)),
        antoine: Some(Antoine {
            a: 8.071_31,
            b: 1730.63,
            c: 233.426,
        }),
    },
    MockComponent {
        name: "ethanol",
        cas: "64-17-5",
        formula: "C2H6O",
        molecular_weight: 46.068_44,
        specific_heat: 2440.0,
        density: MockDensity::Linear {
            rho_20: 789.0,
            slope: 0.85,
        },
        range_celsius: Some((-114.0, 78.0)),
        antoine: Some(Antoine {
            a: 8.112_20,
            b: 1592.864,
            c: 226.184,
        }),
    },
    MockComponent {
        name: "methanol",
        cas: "67-56-1",
        formula: "CH4O",
        molecular_weight: 32.041_86,
        specific_heat: 2534.0,
        density: MockDensity::Constant(791.8),
        range_celsius: None,
        antoine: None,
    },
    MockComponent {
        name: "benzene",
        cas: "71-43-2",
        formula: "C6H6",
        molecular_weight: 78.111_84,
        specific_heat: 1740.0,
        density: MockDensity::Constant(876.5),
        range_celsius: None,
        antoine: None,
    },
    MockComponent {
        name: "toluene",
        cas: "108-88-3",
        formula: "C7H8",
        molecular_weight: 92.138_42,
        specific_heat: 1687.0,
        density: MockDensity::Constant(866.9),
        range_celsius: None,
        antoine: None,
    },
];

const PROPERTIES: [Property; 6] = [
    Property::Density,
    Property::Viscosity,
    Property::HeatCapacity,
    Property::VaporPressure,
    Property::Enthalpy,
    Property::Entropy,
];

const REFERENCES: [&str; 1] = ["Textbook approximations (mock data)"];

/// Backend serving hardcoded approximations for five common liquids.
#[derive(Debug, Default)]
pub struct MockBackend;

impl MockBackend {
    /// Creates the mock backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn in_range(component: &MockComponent, t_celsius: f64) -> bool {
        component
            .range_celsius
            .is_some_and(|(low, high)| (low..=high).contains(&t_celsius))
    }

    fn range_kelvin(component: &MockComponent) -> Option<ValidityRange> {
        component
            .range_celsius
            .map(|(low, high)| ValidityRange::kelvin(low + 273.15, high + 273.15))
    }

    fn density(component: &MockComponent, t_celsius: f64) -> Option<f64> {
        match component.density {
            MockDensity::Constant(rho) => Some(rho),
            MockDensity::WaterPolynomial if Self::in_range(component, t_celsius) => {
                let t = t_celsius;
                let rho = 8.306e-6_f64.mul_add(
                    t.powi(3),
                    0.004_823_9_f64.mul_add(-t.powi(2), 0.015_57_f64.mul_add(-t, 999.84)),
                );
                Some(round_to(rho, 1))
            }
            MockDensity::Linear { rho_20, slope } if Self::in_range(component, t_celsius) => {
                Some(round_to(slope.mul_add(-(t_celsius - 20.0), rho_20), 1))
            }
            MockDensity::WaterPolynomial | MockDensity::Linear { .. } => None,
        }
    }

    fn viscosity(component: &MockComponent, temperature: f64) -> Option<f64> {
        // Andrade-type fit, only tabulated for water.
        if component.name != "water" || !Self::in_range(component, kelvin_to_celsius(temperature))
        {
            return None;
        }
        let mu = 0.000_024_14 * 10_f64.powf(247.8 / (temperature - 140.0));
        Some(round_to(mu, 6))
    }

    fn vapor_pressure(component: &MockComponent, t_celsius: f64) -> Option<f64> {
        let antoine = component.antoine?;
        if !Self::in_range(component, t_celsius) {
            return None;
        }
        Some(round_to(antoine.pressure(t_celsius), 1))
    }
}

impl PropertyBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn resolve(&mut self, component: &str, state: StatePoint) -> BackendResult<ChemicalHandle> {
        let wanted = component.trim().to_lowercase();
        let (key, found) = COMPONENTS
            .iter()
            .enumerate()
            .find(|(_, c)| {
                c.name == wanted || c.cas == wanted || c.formula.to_lowercase() == wanted
            })
            .ok_or_else(|| BackendError::not_found(component, self.name()))?;

        Ok(ChemicalHandle {
            identity: ChemicalIdentity {
                name: found.name.to_string(),
                registry_id: Some(found.cas.to_string()),
                formula: Some(found.formula.to_string()),
                molecular_weight: Some(found.molecular_weight),
            },
            state,
            key,
        })
    }

    fn property(&self, handle: &ChemicalHandle, property: Property) -> BackendResult<PropertyValue> {
        let Some(component) = COMPONENTS.get(handle.key) else {
            return Err(BackendError::not_found(&handle.identity.name, self.name()));
        };
        let temperature = handle.state.temperature;
        let t_celsius = kelvin_to_celsius(temperature);

        let value = match property {
            Property::Density => Self::density(component, t_celsius),
            Property::Viscosity => Self::viscosity(component, temperature),
            Property::VaporPressure => Self::vapor_pressure(component, t_celsius),
            // Stored per kilogram, reported per mole.
            Property::HeatCapacity => Some(round_to(
                component.specific_heat * component.molecular_weight / 1000.0,
                2,
            )),
            _ => None,
        };

        Ok(PropertyValue::from_option(value))
    }

    fn describe(&self, handle: &ChemicalHandle, property: Property) -> Provenance {
        let Some(component) = COMPONENTS.get(handle.key) else {
            return Provenance::default();
        };

        let provenance = match (property, component.density) {
            (Property::Density, MockDensity::WaterPolynomial) => {
                Provenance::method("Polynomial approximation")
                    .with_equation("ρ = 999.84 − 0.01557·t − 0.0048239·t² + 8.306e-6·t³ (t in °C)")
                    .with_uncertainty("±0.5 kg/m³")
            }
            (Property::Density, MockDensity::Linear { .. }) => {
                Provenance::method("Linear approximation").with_equation("ρ = ρ₂₀ − k·(t − 20)")
            }
            (Property::Density | Property::HeatCapacity, _) => {
                Provenance::method("Constant reference value")
            }
            (Property::Viscosity, _) => Provenance::method("Andrade equation approximation")
                .with_equation("μ = 2.414e-5 · 10^(247.8 / (T − 140))"),
            (Property::VaporPressure, _) => Provenance::method("Antoine equation")
                .with_equation("log10(P/mmHg) = A − B / (C + t)"),
            _ => Provenance::default(),
        };

        let provenance = match Self::range_kelvin(component) {
            Some(range) if property != Property::HeatCapacity => provenance.with_range(range),
            _ => provenance,
        };
        provenance.with_references(&REFERENCES)
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(u8, &MockComponent)> = COMPONENTS
            .iter()
            .filter_map(|c| {
                let formula = c.formula.to_lowercase();
                let rank = [c.name, c.cas, formula.as_str()]
                    .into_iter()
                    .filter_map(|field| match_rank(field, &wanted))
                    .min()?;
                Some((rank, c))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(b.1.name)));

        ranked
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|(_, c)| SearchHit {
                name: c.name.to_string(),
                registry_id: Some(c.cas.to_string()),
                formula: Some(c.formula.to_string()),
            })
            .collect()
    }

    fn components(&self) -> Vec<String> {
        COMPONENTS.iter().map(|c| c.name.to_string()).collect()
    }

    fn properties(&self) -> &'static [Property] {
        &PROPERTIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(component: &str, property: Property, temperature: f64) -> PropertyValue {
        let mut backend = MockBackend::new();
        let state = StatePoint::new(temperature, 101_325.0).unwrap();
        let handle = backend.resolve(component, state).unwrap();
        backend.property(&handle, property).unwrap()
    }

    #[test]
    fn water_density_at_25c() {
        let value = evaluate("water", Property::Density, 298.15).as_number().unwrap();
        assert!((value - 997.0).abs() < 1.5, "got {value}");
    }

    #[test]
    fn water_density_outside_range_not_available() {
        assert_eq!(
            evaluate("water", Property::Density, 473.15),
            PropertyValue::NotAvailable
        );
        assert_eq!(
            evaluate("water", Property::Density, 263.15),
            PropertyValue::NotAvailable
        );
    }

    #[test]
    fn water_vapor_pressure_at_boiling_point() {
        let value = evaluate("water", Property::VaporPressure, 373.15)
            .as_number()
            .unwrap();
        assert!((value - 101_325.0).abs() / 101_325.0 < 0.01, "got {value}");
    }

    #[test]
    fn water_viscosity_at_25c() {
        let value = evaluate("water", Property::Viscosity, 298.15).as_number().unwrap();
        assert!((value - 0.00089).abs() < 0.0001, "got {value}");
    }

    #[test]
    fn ethanol_density_is_linear() {
        let value = evaluate("Ethanol", Property::Density, 293.15).as_number().unwrap();
        assert!((value - 789.0).abs() < 0.1);
    }

    #[test]
    fn fixed_values_ignore_temperature() {
        let cold = evaluate("benzene", Property::Density, 280.0);
        let warm = evaluate("benzene", Property::Density, 340.0);
        assert_eq!(cold, warm);
        assert_eq!(cold, PropertyValue::Number(876.5));
    }

    #[test]
    fn listed_but_uncomputed_properties_not_available() {
        assert_eq!(
            evaluate("water", Property::Enthalpy, 298.15),
            PropertyValue::NotAvailable
        );
    }

    #[test]
    fn unknown_component_fails() {
        let mut backend = MockBackend::new();
        let state = StatePoint::new(298.15, 101_325.0).unwrap();
        let err = backend.resolve("mercury", state).unwrap_err();
        assert!(matches!(err, BackendError::ComponentNotFound { .. }));
    }

    #[test]
    fn heat_capacity_is_molar() {
        // 4184 J/(kg·K) times 18.015 g/mol.
        assert_eq!(
            evaluate("water", Property::HeatCapacity, 298.15).as_number(),
            Some(75.38)
        );
    }

    #[test]
    fn resolves_by_formula() {
        let mut backend = MockBackend::new();
        let state = StatePoint::new(298.15, 101_325.0).unwrap();
        assert_eq!(backend.resolve("H2O", state).unwrap().identity.name, "water");
        assert_eq!(backend.resolve("c2h6o", state).unwrap().identity.name, "ethanol");
    }

    #[test]
    fn every_search_hit_resolves() {
        let mut backend = MockBackend::new();
        let state = StatePoint::new(298.15, 101_325.0).unwrap();
        for query in ["H2O", "C6H6", "64-17-5", "toluene"] {
            let hits = backend.search(query);
            assert!(!hits.is_empty(), "{query}");
            let handle = backend.resolve(query, state).unwrap();
            assert_eq!(handle.identity.name, hits[0].name, "{query}");
        }
    }

    #[test]
    fn search_by_prefix() {
        let hits = MockBackend::new().search("wat");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "water");
        assert!(MockBackend::new().search("xyz").is_empty());
        assert!(MockBackend::new().search("  ").is_empty());
    }

    #[test]
    fn describe_density_has_range() {
        let mut backend = MockBackend::new();
        let state = StatePoint::new(298.15, 101_325.0).unwrap();
        let handle = backend.resolve("water", state).unwrap();
        let provenance = backend.describe(&handle, Property::Density);
        assert_eq!(provenance.method.as_deref(), Some("Polynomial approximation"));
        assert!(provenance.validity_range.is_some());
        assert!(!provenance.references.is_empty());
    }
}
