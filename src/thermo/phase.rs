//! Solid phase backend.
//!
//! Each phase carries its standard-state data at 298.15 K and 1 bar and a
//! Maier-Kelley heat capacity, `Cp = a + bT + c/T²`. A component is first
//! looked up as a phase, then set to a temperature and pressure, and its
//! properties follow from integrating the heat capacity:
//!
//! ```text
//! H(T, P) = ΔHf° + ∫Cp dT + V°·(P − P°)
//! S(T)    = S°   + ∫Cp/T dT
//! ```
//!
//! Volumes are treated as incompressible and without thermal expansion.

use crate::thermo::{
    match_rank, BackendError, BackendResult, ChemicalHandle, ChemicalIdentity,
    Phase, Property, PropertyBackend, PropertyValue, Provenance, SearchHit, StatePoint,
    ValidityRange, REFERENCE_TEMPERATURE, SEARCH_LIMIT,
};

/// Standard-state pressure (Pa).
pub const REFERENCE_PRESSURE: f64 = 1.0e5;

/// Lowest temperature the heat capacity fits are used at (K).
const T_MIN: f64 = 250.0;

/// Standard-state data of one solid phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidPhase {
    pub name: &'static str,
    pub formula: &'static str,
    pub cas: Option<&'static str>,
    /// g/mol.
    pub molecular_weight: f64,
    /// Enthalpy of formation from the elements, J/mol.
    pub formation_enthalpy: f64,
    /// Third-law entropy, J/(mol·K).
    pub entropy: f64,
    /// Molar volume, cm³/mol.
    pub volume: f64,
    pub cp_a: f64,
    pub cp_b: f64,
    pub cp_c: f64,
    /// Upper limit of the heat capacity fit (K).
    pub t_max: f64,
}

impl SolidPhase {
    /// Temperature range of the heat capacity fit.
    #[must_use]
    pub const fn range(&self) -> ValidityRange {
        ValidityRange::kelvin(T_MIN, self.t_max)
    }

    /// Molar volume in m³/mol.
    #[must_use]
    pub fn molar_volume(&self) -> f64 {
        self.volume * 1e-6
    }

    /// Density in kg/m³.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.molecular_weight * 1e-3 / self.molar_volume()
    }

    #[must_use]
    pub fn heat_capacity(&self, temperature: f64) -> f64 {
        self.cp_b.mul_add(temperature, self.cp_a) + self.cp_c / (temperature * temperature)
    }

    fn enthalpy_increment(&self, temperature: f64) -> f64 {
        let t0 = REFERENCE_TEMPERATURE;
        let t = temperature;
        self.cp_a * (t - t0) + self.cp_b / 2.0 * (t * t - t0 * t0) - self.cp_c * (1.0 / t - 1.0 / t0)
    }

    fn entropy_increment(&self, temperature: f64) -> f64 {
        let t0 = REFERENCE_TEMPERATURE;
        let t = temperature;
        self.cp_a * (t / t0).ln() + self.cp_b * (t - t0)
            - self.cp_c / 2.0 * (1.0 / (t * t) - 1.0 / (t0 * t0))
    }

    /// Enthalpy in J/mol.
    #[must_use]
    pub fn enthalpy(&self, state: StatePoint) -> f64 {
        self.formation_enthalpy
            + self.enthalpy_increment(state.temperature)
            + self.molar_volume() * (state.pressure - REFERENCE_PRESSURE)
    }

    /// Entropy in J/(mol·K).
    #[must_use]
    pub fn entropy(&self, state: StatePoint) -> f64 {
        self.entropy + self.entropy_increment(state.temperature)
    }

    fn evaluate(&self, property: Property, state: StatePoint) -> Option<PropertyValue> {
        let t = state.temperature;
        let p = state.pressure;

        // State-independent values are always available.
        match property {
            Property::MolecularWeight => return Some(PropertyValue::Number(self.molecular_weight)),
            Property::Phase => return Some(PropertyValue::Phase(Phase::Solid)),
            _ => {}
        }
        if !self.range().contains(t) {
            return None;
        }

        let h = self.enthalpy(state);
        let s = self.entropy(state);
        let u = h - p * self.molar_volume();
        let value = match property {
            Property::Density => self.density(),
            Property::Volume => self.molar_volume(),
            Property::HeatCapacity => self.heat_capacity(t),
            Property::Enthalpy => h,
            Property::Entropy => s,
            Property::GibbsEnergy => h - t * s,
            Property::InternalEnergy => u,
            Property::HelmholtzEnergy => u - t * s,
            _ => return None,
        };
        Some(PropertyValue::Number(value))
    }
}

/// Thermodynamic data after Robie & Hemingway (1995); heat capacities are
/// Maier-Kelley fits over the stated range.
static PHASES: [SolidPhase; 10] = [
    SolidPhase {
        name: "Quartz",
        formula: "SiO2",
        cas: Some("14808-60-7"),
        molecular_weight: 60.0843,
        formation_enthalpy: -910_700.0,
        entropy: 41.46,
        volume: 22.688,
        cp_a: 46.94,
        cp_b: 34.31e-3,
        cp_c: -11.30e5,
        t_max: 848.0,
    },
    SolidPhase {
        name: "Forsterite",
        formula: "Mg2SiO4",
        cas: Some("26686-77-1"),
        molecular_weight: 140.6931,
        formation_enthalpy: -2_173_000.0,
        entropy: 94.11,
        volume: 43.79,
        cp_a: 149.83,
        cp_b: 27.36e-3,
        cp_c: -35.64e5,
        t_max: 1800.0,
    },
    SolidPhase {
        name: "Fayalite",
        formula: "Fe2SiO4",
        cas: None,
        molecular_weight: 203.7771,
        formation_enthalpy: -1_478_200.0,
        entropy: 151.0,
        volume: 46.31,
        cp_a: 176.02,
        cp_b: -8.808e-3,
        cp_c: -38.89e5,
        t_max: 1490.0,
    },
    SolidPhase {
        name: "Periclase",
        formula: "MgO",
        cas: Some("1309-48-4"),
        molecular_weight: 40.3044,
        formation_enthalpy: -601_600.0,
        entropy: 26.94,
        volume: 11.248,
        cp_a: 42.59,
        cp_b: 7.28e-3,
        cp_c: -6.19e5,
        t_max: 2100.0,
    },
    SolidPhase {
        name: "Corundum",
        formula: "Al2O3",
        cas: Some("1344-28-1"),
        molecular_weight: 101.9613,
        formation_enthalpy: -1_675_700.0,
        entropy: 50.92,
        volume: 25.575,
        cp_a: 114.77,
        cp_b: 12.80e-3,
        cp_c: -35.44e5,
        t_max: 1800.0,
    },
    SolidPhase {
        name: "Calcite",
        formula: "CaCO3",
        cas: Some("471-34-1"),
        molecular_weight: 100.0869,
        formation_enthalpy: -1_207_400.0,
        entropy: 91.71,
        volume: 36.934,
        cp_a: 104.52,
        cp_b: 21.92e-3,
        cp_c: -25.94e5,
        t_max: 1200.0,
    },
    SolidPhase {
        name: "Lime",
        formula: "CaO",
        cas: Some("1305-78-8"),
        molecular_weight: 56.0774,
        formation_enthalpy: -635_100.0,
        entropy: 38.1,
        volume: 16.764,
        cp_a: 49.62,
        cp_b: 4.52e-3,
        cp_c: -6.95e5,
        t_max: 2000.0,
    },
    SolidPhase {
        name: "Hematite",
        formula: "Fe2O3",
        cas: Some("1317-60-8"),
        molecular_weight: 159.6882,
        formation_enthalpy: -824_200.0,
        entropy: 87.4,
        volume: 30.274,
        cp_a: 98.28,
        cp_b: 77.82e-3,
        cp_c: -14.85e5,
        t_max: 950.0,
    },
    SolidPhase {
        name: "Enstatite",
        formula: "MgSiO3",
        cas: None,
        molecular_weight: 100.3887,
        formation_enthalpy: -1_545_000.0,
        entropy: 66.27,
        volume: 31.33,
        cp_a: 102.72,
        cp_b: 19.83e-3,
        cp_c: -26.27e5,
        t_max: 1600.0,
    },
    SolidPhase {
        name: "Diopside",
        formula: "CaMgSi2O6",
        cas: None,
        molecular_weight: 216.5504,
        formation_enthalpy: -3_202_300.0,
        entropy: 142.9,
        volume: 66.09,
        cp_a: 221.21,
        cp_b: 32.8e-3,
        cp_c: -65.85e5,
        t_max: 1600.0,
    },
];

const PROPERTIES: [Property; 10] = [
    Property::Density,
    Property::Volume,
    Property::Enthalpy,
    Property::Entropy,
    Property::HeatCapacity,
    Property::GibbsEnergy,
    Property::HelmholtzEnergy,
    Property::InternalEnergy,
    Property::MolecularWeight,
    Property::Phase,
];

const REFERENCES: [&str; 2] = [
    "Robie, R.A., Hemingway, B.S. (1995) USGS Bulletin 2131",
    "Maier, C.G., Kelley, K.K. (1932) J. Am. Chem. Soc. 54, 3243",
];

/// Backend over a database of solid phases.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseBackend;

impl PhaseBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Looks up a phase by name, formula or CAS number, case-insensitively.
    #[must_use]
    pub fn get_phase(&self, name: &str) -> Option<(usize, &'static SolidPhase)> {
        let wanted = name.trim().to_lowercase();
        PHASES.iter().enumerate().find(|(_, phase)| {
            phase.name.to_lowercase() == wanted
                || phase.formula.to_lowercase() == wanted
                || phase.cas == Some(wanted.as_str())
        })
    }
}

impl PropertyBackend for PhaseBackend {
    fn name(&self) -> &'static str {
        "phase"
    }

    fn resolve(&mut self, component: &str, state: StatePoint) -> BackendResult<ChemicalHandle> {
        let (key, phase) = self
            .get_phase(component)
            .ok_or_else(|| BackendError::not_found(component, self.name()))?;

        Ok(ChemicalHandle {
            identity: ChemicalIdentity {
                name: phase.name.to_string(),
                registry_id: phase.cas.map(ToString::to_string),
                formula: Some(phase.formula.to_string()),
                molecular_weight: Some(phase.molecular_weight),
            },
            state,
            key,
        })
    }

    fn property(&self, handle: &ChemicalHandle, property: Property) -> BackendResult<PropertyValue> {
        let Some(phase) = PHASES.get(handle.key) else {
            return Err(BackendError::not_found(&handle.identity.name, self.name()));
        };
        Ok(phase
            .evaluate(property, handle.state)
            .unwrap_or(PropertyValue::NotAvailable))
    }

    fn describe(&self, handle: &ChemicalHandle, property: Property) -> Provenance {
        let Some(phase) = PHASES.get(handle.key) else {
            return Provenance::default();
        };

        let provenance = match property {
            Property::Density | Property::Volume => Provenance::method("Standard-state molar volume")
                .with_equation("ρ = M / V°")
                .with_uncertainty("incompressible, no thermal expansion"),
            Property::HeatCapacity => Provenance::method("Maier-Kelley heat capacity")
                .with_equation("Cp = a + bT + c/T²"),
            Property::Enthalpy
            | Property::Entropy
            | Property::GibbsEnergy
            | Property::HelmholtzEnergy
            | Property::InternalEnergy => Provenance::method("Standard state plus Cp integration")
                .with_equation("H = ΔHf° + ∫Cp dT + V°(P − P°); S = S° + ∫Cp/T dT"),
            Property::MolecularWeight | Property::Phase => {
                return Provenance::method("Tabulated constant").with_references(&REFERENCES[..1]);
            }
            _ => return Provenance::default(),
        };
        provenance
            .with_range(phase.range())
            .with_references(&REFERENCES)
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(u8, &SolidPhase)> = PHASES
            .iter()
            .filter_map(|phase| {
                let name = phase.name.to_lowercase();
                let formula = phase.formula.to_lowercase();
                let rank = [name.as_str(), formula.as_str(), phase.cas.unwrap_or_default()]
                    .into_iter()
                    .filter(|field| !field.is_empty())
                    .filter_map(|field| match_rank(field, &wanted))
                    .min()?;
                Some((rank, phase))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(b.1.name)));

        ranked
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|(_, phase)| SearchHit {
                name: phase.name.to_string(),
                registry_id: phase.cas.map(ToString::to_string),
                formula: Some(phase.formula.to_string()),
            })
            .collect()
    }

    fn components(&self) -> Vec<String> {
        let mut names: Vec<String> = PHASES.iter().map(|p| p.name.to_string()).collect();
        names.sort();
        names
    }

    fn properties(&self) -> &'static [Property] {
        &PROPERTIES
    }
}
