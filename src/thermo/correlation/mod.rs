//! Correlation backend.
//!
//! Properties come from a table of pure compounds, each carrying its critical
//! constants and the coefficients of a few standard correlations. The phase
//! at a state point follows from the melting point, the vapour pressure and
//! the critical temperature; the property correlations are then picked for
//! that phase.
//!
//! Thermodynamic functions are referenced to the ideal gas at 298.15 K and
//! 101325 Pa. Liquids take the ideal-gas value minus the heat of vaporisation.
//!
//! The table starts with the built-in compounds in [`data`] and can be
//! extended from a CSV file with [`CorrelationBackend::load_csv`].

mod data;
pub mod equations;
mod loader;

use std::path::Path;

use crate::thermo::units::STANDARD_ATMOSPHERE;
use crate::thermo::{
    match_rank, BackendError, BackendResult, ChemicalHandle, ChemicalIdentity,
    Phase, Property, PropertyBackend, PropertyValue, Provenance, SearchHit, StatePoint,
    ValidityRange, GAS_CONSTANT, SEARCH_LIMIT,
};

use equations::{
    clausius_clapeyron, surface_tension, watson_hvap, Andrade, Antoine, CpPolynomial, Dippr105,
    LinearConductivity,
};

/// A pure compound and its correlation coefficients.
///
/// Temperatures are in K, pressures in Pa, energies in J/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub name: String,
    pub cas: String,
    pub formula: String,
    pub synonyms: Vec<String>,
    /// g/mol.
    pub molecular_weight: f64,
    pub critical_temperature: f64,
    pub critical_pressure: f64,
    pub boiling_point: f64,
    pub melting_point: f64,
    pub antoine: Option<Antoine>,
    pub liquid_density: Option<Dippr105>,
    pub ideal_gas_cp: Option<CpPolynomial>,
    /// Liquid heat capacity, J/(mol·K).
    pub liquid_cp: Option<f64>,
    /// Heat of vaporisation at the normal boiling point.
    pub hvap_at_boiling: Option<f64>,
    pub viscosity: Option<Andrade>,
    /// Surface tension at 298.15 K, N/m.
    pub surface_tension: Option<f64>,
    pub thermal_conductivity: Option<LinearConductivity>,
}

impl Compound {
    /// Lower-cased strings a query can match exactly.
    fn aliases(&self) -> impl Iterator<Item = String> + '_ {
        [&self.name, &self.cas, &self.formula]
            .into_iter()
            .chain(&self.synonyms)
            .map(|alias| alias.to_lowercase())
    }

    /// Saturation pressure used for the phase decision.
    ///
    /// Falls back to Clausius-Clapeyron from the normal boiling point when
    /// there are no Antoine coefficients.
    fn saturation_pressure(&self, temperature: f64) -> Option<f64> {
        if let Some(antoine) = self.antoine {
            return Some(antoine.pressure_extrapolated(temperature));
        }
        self.hvap_at_boiling
            .map(|hvap| clausius_clapeyron(hvap, self.boiling_point, temperature))
    }

    /// Phase at a state point.
    #[must_use]
    pub fn phase(&self, state: StatePoint) -> Phase {
        let t = state.temperature;
        if t >= self.critical_temperature {
            return Phase::Gas;
        }
        match self.saturation_pressure(t) {
            Some(psat) if state.pressure < psat => Phase::Gas,
            // Without any vapour pressure data, compare with the boiling point.
            None if t > self.boiling_point => Phase::Gas,
            _ if t < self.melting_point => Phase::Solid,
            _ => Phase::Liquid,
        }
    }

    fn heat_of_vaporization(&self, temperature: f64) -> Option<f64> {
        let hvap = self.hvap_at_boiling?;
        watson_hvap(
            hvap,
            self.boiling_point,
            self.critical_temperature,
            temperature,
        )
    }

    fn vapor_pressure(&self, temperature: f64) -> Option<f64> {
        match self.antoine {
            Some(antoine) => antoine.pressure(temperature),
            None if temperature < self.critical_temperature => self
                .hvap_at_boiling
                .map(|hvap| clausius_clapeyron(hvap, self.boiling_point, temperature)),
            None => None,
        }
    }

    fn density(&self, phase: Phase, state: StatePoint) -> Option<f64> {
        match phase {
            Phase::Gas => Some(
                state.pressure * self.molecular_weight * 1e-3 / (GAS_CONSTANT * state.temperature),
            ),
            Phase::Liquid => self
                .liquid_density?
                .mass_density(state.temperature, self.molecular_weight),
            Phase::Solid => None,
        }
    }

    fn molar_volume(&self, phase: Phase, state: StatePoint) -> Option<f64> {
        self.density(phase, state)
            .map(|rho| self.molecular_weight * 1e-3 / rho)
    }

    fn heat_capacity(&self, phase: Phase, temperature: f64) -> Option<f64> {
        match phase {
            Phase::Gas => {
                let cp = self.ideal_gas_cp?;
                CpPolynomial::RANGE
                    .contains(temperature)
                    .then(|| cp.value(temperature))
            }
            Phase::Liquid => self.liquid_cp,
            Phase::Solid => None,
        }
    }

    /// Ideal-gas enthalpy and entropy at `state`, relative to the reference.
    fn ideal_gas_functions(&self, state: StatePoint) -> Option<(f64, f64)> {
        let cp = self.ideal_gas_cp?;
        if !CpPolynomial::RANGE.contains(state.temperature) {
            return None;
        }
        let h = cp.enthalpy_change(state.temperature);
        let s = cp.entropy_change(state.temperature)
            - GAS_CONSTANT * (state.pressure / STANDARD_ATMOSPHERE).ln();
        Some((h, s))
    }

    /// Enthalpy and entropy in the actual phase.
    fn enthalpy_entropy(&self, phase: Phase, state: StatePoint) -> Option<(f64, f64)> {
        let (h, s) = self.ideal_gas_functions(state)?;
        match phase {
            Phase::Gas => Some((h, s)),
            Phase::Liquid => {
                let hvap = self.heat_of_vaporization(state.temperature)?;
                Some((h - hvap, s - hvap / state.temperature))
            }
            Phase::Solid => None,
        }
    }

    fn evaluate(&self, property: Property, state: StatePoint) -> Option<PropertyValue> {
        let t = state.temperature;
        let phase = self.phase(state);
        let liquid = phase == Phase::Liquid;

        let value = match property {
            Property::Phase => return Some(PropertyValue::Phase(phase)),
            Property::Density => self.density(phase, state),
            Property::Volume => self.molar_volume(phase, state),
            Property::Viscosity => self.viscosity.filter(|_| liquid).map(|v| v.viscosity(t)),
            Property::ThermalConductivity => {
                self.thermal_conductivity.filter(|_| liquid)?.value(t)
            }
            Property::SurfaceTension => {
                surface_tension(self.surface_tension.filter(|_| liquid)?, self.critical_temperature, t)
            }
            Property::HeatCapacity => self.heat_capacity(phase, t),
            Property::HeatCapacityCv => match phase {
                Phase::Gas => self.heat_capacity(phase, t).map(|cp| cp - GAS_CONSTANT),
                Phase::Liquid | Phase::Solid => None,
            },
            Property::Enthalpy => self.enthalpy_entropy(phase, state).map(|(h, _)| h),
            Property::Entropy => self.enthalpy_entropy(phase, state).map(|(_, s)| s),
            Property::GibbsEnergy => self
                .enthalpy_entropy(phase, state)
                .map(|(h, s)| h - t * s),
            Property::InternalEnergy => {
                let (h, _) = self.enthalpy_entropy(phase, state)?;
                Some(h - state.pressure * self.molar_volume(phase, state)?)
            }
            Property::HelmholtzEnergy => {
                let (h, s) = self.enthalpy_entropy(phase, state)?;
                let u = h - state.pressure * self.molar_volume(phase, state)?;
                Some(u - t * s)
            }
            Property::VaporPressure => self.vapor_pressure(t),
            Property::HeatVaporization => self.heat_of_vaporization(t),
            Property::CriticalTemperature => Some(self.critical_temperature),
            Property::CriticalPressure => Some(self.critical_pressure),
            Property::BoilingPoint => Some(self.boiling_point),
            Property::MeltingPoint => Some(self.melting_point),
            Property::MolecularWeight => Some(self.molecular_weight),
        };
        value.map(PropertyValue::Number)
    }
}

/// Backend over a table of pure-compound correlations.
#[derive(Debug, Clone)]
pub struct CorrelationBackend {
    compounds: Vec<Compound>,
}

impl Default for CorrelationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationBackend {
    /// Creates a backend with the built-in compounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            compounds: data::builtin(),
        }
    }

    /// Adds the compounds of a CSV file, replacing built-ins with the same CAS
    /// number. Returns the number of records read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a record is invalid.
    /// Nothing is added in that case.
    pub fn load_csv(&mut self, path: &Path) -> BackendResult<usize> {
        let loaded = loader::read_compounds(path)?;
        let count = loaded.len();
        for compound in loaded {
            self.insert(compound);
        }
        Ok(count)
    }

    /// Adds or replaces a compound, keyed by CAS number.
    pub fn insert(&mut self, compound: Compound) {
        match self.compounds.iter_mut().find(|c| c.cas == compound.cas) {
            Some(existing) => {
                tracing::debug!(cas = %compound.cas, name = %compound.name, "Replacing compound");
                *existing = compound;
            }
            None => self.compounds.push(compound),
        }
    }

    /// All compounds in table order.
    #[must_use]
    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    fn handle(&self, key: usize, state: StatePoint) -> Option<ChemicalHandle> {
        let compound = self.compounds.get(key)?;
        Some(ChemicalHandle {
            identity: ChemicalIdentity {
                name: compound.name.clone(),
                registry_id: Some(compound.cas.clone()),
                formula: Some(compound.formula.clone()),
                molecular_weight: Some(compound.molecular_weight),
            },
            state,
            key,
        })
    }

    /// Indices of matching compounds, best match first.
    fn ranked(&self, query: &str) -> Vec<usize> {
        let mut ranked: Vec<(u8, usize)> = self
            .compounds
            .iter()
            .enumerate()
            .filter_map(|(index, compound)| {
                let rank = compound
                    .aliases()
                    .filter_map(|alias| match_rank(&alias, query))
                    .min()?;
                Some((rank, index))
            })
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, index)| index).collect()
    }
}

const PROPERTIES: [Property; 20] = Property::ALL;

const POLING: &str =
    "Poling, B.E., Prausnitz, J.M., O'Connell, J.P. The Properties of Gases and Liquids, 5th ed.";
const PERRY: &str = "Perry's Chemical Engineers' Handbook, 8th ed., Table 2-32";
const YAWS: &str = "Yaws, C.L. Chemical Properties Handbook";

impl PropertyBackend for CorrelationBackend {
    fn name(&self) -> &'static str {
        "correlation"
    }

    fn resolve(&mut self, component: &str, state: StatePoint) -> BackendResult<ChemicalHandle> {
        let wanted = component.trim().to_lowercase();
        if wanted.is_empty() {
            return Err(BackendError::not_found(component, self.name()));
        }

        let exact = self
            .compounds
            .iter()
            .position(|c| c.aliases().any(|alias| alias == wanted));
        let key = match exact {
            Some(key) => key,
            None => {
                let key = self
                    .ranked(&wanted)
                    .first()
                    .copied()
                    .ok_or_else(|| BackendError::not_found(component, self.name()))?;
                tracing::debug!(
                    component,
                    resolved = %self.compounds[key].name,
                    "Resolved component by search"
                );
                key
            }
        };

        self.handle(key, state)
            .ok_or_else(|| BackendError::not_found(component, self.name()))
    }

    fn property(&self, handle: &ChemicalHandle, property: Property) -> BackendResult<PropertyValue> {
        let Some(compound) = self.compounds.get(handle.key) else {
            return Err(BackendError::not_found(&handle.identity.name, self.name()));
        };

        match compound.evaluate(property, handle.state) {
            Some(PropertyValue::Number(value)) if !value.is_finite() => {
                Err(BackendError::Evaluation {
                    property: property.to_string(),
                    component: compound.name.clone(),
                    message: format!("correlation returned {value}"),
                })
            }
            Some(value) => Ok(value),
            None => Ok(PropertyValue::NotAvailable),
        }
    }

    fn describe(&self, handle: &ChemicalHandle, property: Property) -> Provenance {
        let Some(compound) = self.compounds.get(handle.key) else {
            return Provenance::default();
        };
        let phase = compound.phase(handle.state);
        let liquid_range = ValidityRange::kelvin(compound.melting_point, compound.critical_temperature);

        match property {
            Property::Density | Property::Volume => match phase {
                Phase::Gas => Provenance::method("Ideal gas law")
                    .with_equation("ρ = P·M / (R·T)")
                    .with_uncertainty("±5% away from the critical region")
                    .with_references(&[POLING]),
                Phase::Liquid | Phase::Solid => Provenance::method("DIPPR equation 105")
                    .with_equation("ρ = C1 / C2^(1 + (1 − T/C3)^C4)")
                    .with_range(liquid_range)
                    .with_uncertainty("±1%")
                    .with_references(&[PERRY]),
            },
            Property::VaporPressure => match compound.antoine {
                Some(antoine) => Provenance::method("Antoine equation")
                    .with_equation("log10(P/mmHg) = A − B / (C + t)")
                    .with_range(antoine.range())
                    .with_uncertainty("±2%")
                    .with_references(&[YAWS]),
                None => Provenance::method("Clausius-Clapeyron equation")
                    .with_equation("ln(P/P₀) = −ΔHvap/R · (1/T − 1/Tb)")
                    .with_range(ValidityRange::kelvin(0.0, compound.critical_temperature))
                    .with_uncertainty("±10%")
                    .with_references(&[POLING]),
            },
            Property::HeatVaporization => Provenance::method("Watson correlation")
                .with_equation("ΔHvap = ΔHvap,b · ((1 − Tr)/(1 − Tr,b))^0.38")
                .with_range(ValidityRange::kelvin(0.0, compound.critical_temperature))
                .with_references(&[POLING]),
            Property::HeatCapacity | Property::HeatCapacityCv => match phase {
                Phase::Gas => Provenance::method("Ideal gas heat capacity polynomial")
                    .with_equation("Cp = a + bT + cT² + dT³")
                    .with_range(CpPolynomial::RANGE)
                    .with_references(&[POLING]),
                Phase::Liquid | Phase::Solid => {
                    Provenance::method("Constant liquid heat capacity").with_references(&[PERRY])
                }
            },
            Property::Enthalpy
            | Property::Entropy
            | Property::GibbsEnergy
            | Property::HelmholtzEnergy
            | Property::InternalEnergy => Provenance::method("Ideal gas path from 298.15 K, 1 atm")
                .with_equation("H = ∫Cp dT − ΔHvap (liquid); S = ∫Cp/T dT − R·ln(P/P₀) − ΔHvap/T (liquid)")
                .with_range(CpPolynomial::RANGE)
                .with_references(&[POLING]),
            Property::Viscosity => Provenance::method("Andrade equation")
                .with_equation("ln μ = A + B/T")
                .with_range(liquid_range)
                .with_uncertainty("±5%")
                .with_references(&[YAWS]),
            Property::SurfaceTension => Provenance::method("Corresponding states scaling")
                .with_equation("σ = σ₀ · ((Tc − T)/(Tc − T₀))^(11/9)")
                .with_range(liquid_range)
                .with_references(&[POLING]),
            Property::ThermalConductivity => Provenance::method("Linear fit around 298.15 K")
                .with_range(liquid_range)
                .with_references(&[YAWS]),
            Property::Phase => Provenance::method("Melting point, vapour pressure and critical temperature comparison"),
            Property::CriticalTemperature
            | Property::CriticalPressure
            | Property::BoilingPoint
            | Property::MeltingPoint
            | Property::MolecularWeight => {
                Provenance::method("Tabulated constant").with_references(&[POLING])
            }
        }
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        self.ranked(&wanted)
            .into_iter()
            .take(SEARCH_LIMIT)
            .filter_map(|index| self.compounds.get(index))
            .map(|c| SearchHit {
                name: c.name.clone(),
                registry_id: Some(c.cas.clone()),
                formula: Some(c.formula.clone()),
            })
            .collect()
    }

    fn components(&self) -> Vec<String> {
        self.compounds.iter().map(|c| c.name.clone()).collect()
    }

    fn properties(&self) -> &'static [Property] {
        &PROPERTIES
    }
}
