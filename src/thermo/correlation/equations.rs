//! Correlations used by the compound table.
//!
//! Each correlation is a small `Copy` struct holding its coefficients. Methods
//! return `None` outside the range where the correlation is meaningful.

use crate::thermo::{ValidityRange, REFERENCE_TEMPERATURE};

/// Conversion from mmHg to Pa.
pub const MMHG_TO_PA: f64 = 133.322;

/// Antoine vapour pressure equation, `log10(P/mmHg) = A − B / (C + t/°C)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Lower validity bound (K).
    pub t_min: f64,
    /// Upper validity bound (K).
    pub t_max: f64,
}

impl Antoine {
    /// Vapour pressure in Pa, only inside the fitted range.
    #[must_use]
    pub fn pressure(&self, temperature: f64) -> Option<f64> {
        self.range()
            .contains(temperature)
            .then(|| self.pressure_extrapolated(temperature))
    }

    /// Vapour pressure in Pa without the range check.
    ///
    /// Used for phase decisions, where an extrapolated estimate is better
    /// than none. Returns 0 where the equation has no meaning.
    #[must_use]
    pub fn pressure_extrapolated(&self, temperature: f64) -> f64 {
        let denominator = self.c + (temperature - 273.15);
        if denominator <= 0.0 {
            return 0.0;
        }
        10_f64.powf(self.a - self.b / denominator) * MMHG_TO_PA
    }

    /// Fitted range.
    #[must_use]
    pub const fn range(&self) -> ValidityRange {
        ValidityRange::kelvin(self.t_min, self.t_max)
    }
}

/// DIPPR equation 105 for saturated liquid density,
/// `ρ = C1 / C2^(1 + (1 − T/C3)^C4)` in kmol/m³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dippr105 {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
}

impl Dippr105 {
    /// Molar density in kmol/m³, below `C3` only.
    #[must_use]
    pub fn molar_density(&self, temperature: f64) -> Option<f64> {
        if temperature >= self.c3 {
            return None;
        }
        let exponent = 1.0 + (1.0 - temperature / self.c3).powf(self.c4);
        Some(self.c1 / self.c2.powf(exponent))
    }

    /// Mass density in kg/m³ for a molecular weight in g/mol.
    #[must_use]
    pub fn mass_density(&self, temperature: f64, molecular_weight: f64) -> Option<f64> {
        self.molar_density(temperature).map(|rho| rho * molecular_weight)
    }
}

/// Ideal-gas heat capacity, `Cp = a + bT + cT² + dT³` in J/(mol·K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpPolynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CpPolynomial {
    /// Range over which the tabulated polynomials were fitted.
    pub const RANGE: ValidityRange = ValidityRange::kelvin(273.15, 1500.0);

    /// Heat capacity at `temperature`.
    #[must_use]
    pub fn value(&self, temperature: f64) -> f64 {
        let t = temperature;
        self.d
            .mul_add(t, self.c)
            .mul_add(t, self.b)
            .mul_add(t, self.a)
    }

    /// `∫ Cp dT` from the reference temperature to `temperature`.
    #[must_use]
    pub fn enthalpy_change(&self, temperature: f64) -> f64 {
        let antiderivative = |t: f64| {
            let t2 = t * t;
            self.a * t + self.b * t2 / 2.0 + self.c * t2 * t / 3.0 + self.d * t2 * t2 / 4.0
        };
        antiderivative(temperature) - antiderivative(REFERENCE_TEMPERATURE)
    }

    /// `∫ Cp/T dT` from the reference temperature to `temperature`.
    #[must_use]
    pub fn entropy_change(&self, temperature: f64) -> f64 {
        let antiderivative = |t: f64| {
            let t2 = t * t;
            self.a * t.ln() + self.b * t + self.c * t2 / 2.0 + self.d * t2 * t / 3.0
        };
        antiderivative(temperature) - antiderivative(REFERENCE_TEMPERATURE)
    }
}

/// Watson extrapolation of the heat of vaporisation from the normal boiling point.
#[must_use]
pub fn watson_hvap(
    hvap_at_boiling: f64,
    boiling_point: f64,
    critical_temperature: f64,
    temperature: f64,
) -> Option<f64> {
    if temperature >= critical_temperature || boiling_point >= critical_temperature {
        return None;
    }
    let ratio = (1.0 - temperature / critical_temperature)
        / (1.0 - boiling_point / critical_temperature);
    Some(hvap_at_boiling * ratio.powf(0.38))
}

/// Clausius-Clapeyron estimate of the vapour pressure anchored at the normal
/// boiling point.
#[must_use]
pub fn clausius_clapeyron(hvap: f64, boiling_point: f64, temperature: f64) -> f64 {
    let exponent = -hvap / crate::thermo::GAS_CONSTANT * (1.0 / temperature - 1.0 / boiling_point);
    crate::thermo::units::STANDARD_ATMOSPHERE * exponent.exp()
}

/// Andrade liquid viscosity, `ln μ = A + B/T`, fitted through two reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Andrade {
    /// First reference temperature (K).
    pub t1: f64,
    /// Viscosity at `t1` (Pa·s).
    pub mu1: f64,
    /// Second reference temperature (K).
    pub t2: f64,
    /// Viscosity at `t2` (Pa·s).
    pub mu2: f64,
}

impl Andrade {
    /// Returns the `(A, B)` coefficients.
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64) {
        let b = (self.mu1 / self.mu2).ln() / (1.0 / self.t1 - 1.0 / self.t2);
        let a = self.mu1.ln() - b / self.t1;
        (a, b)
    }

    /// Viscosity in Pa·s.
    #[must_use]
    pub fn viscosity(&self, temperature: f64) -> f64 {
        let (a, b) = self.coefficients();
        (a + b / temperature).exp()
    }
}

/// Surface tension scaled from its value at the reference temperature,
/// `σ = σ₀ ((Tc − T)/(Tc − T₀))^(11/9)`.
#[must_use]
pub fn surface_tension(sigma_ref: f64, critical_temperature: f64, temperature: f64) -> Option<f64> {
    if temperature >= critical_temperature {
        return None;
    }
    let ratio =
        (critical_temperature - temperature) / (critical_temperature - REFERENCE_TEMPERATURE);
    Some(sigma_ref * ratio.powf(11.0 / 9.0))
}

/// Liquid thermal conductivity, linear around the reference temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConductivity {
    /// Conductivity at the reference temperature (W/(m·K)).
    pub k_ref: f64,
    /// Temperature slope (W/(m·K²)).
    pub slope: f64,
}

impl LinearConductivity {
    /// Conductivity in W/(m·K); `None` if the line crosses zero.
    #[must_use]
    pub fn value(&self, temperature: f64) -> Option<f64> {
        let k = self
            .slope
            .mul_add(temperature - REFERENCE_TEMPERATURE, self.k_ref);
        (k > 0.0).then_some(k)
    }
}
