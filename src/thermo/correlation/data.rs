//! Built-in compound table.
//!
//! Critical constants, boiling and melting points and ideal-gas heat
//! capacity coefficients follow Poling, Prausnitz & O'Connell. Liquid densities
//! use DIPPR-105 coefficients as tabulated in Perry's handbook; Antoine
//! coefficients and ranges are the classic mmHg/°C sets.

use crate::thermo::correlation::equations::{
    Andrade, Antoine, CpPolynomial, Dippr105, LinearConductivity,
};
use crate::thermo::correlation::Compound;

/// A compile-time compound row.
struct Row {
    name: &'static str,
    cas: &'static str,
    formula: &'static str,
    synonyms: &'static [&'static str],
    molecular_weight: f64,
    critical_temperature: f64,
    critical_pressure: f64,
    boiling_point: f64,
    melting_point: f64,
    antoine: Option<Antoine>,
    liquid_density: Option<Dippr105>,
    ideal_gas_cp: Option<CpPolynomial>,
    liquid_cp: Option<f64>,
    hvap_at_boiling: Option<f64>,
    viscosity: Option<Andrade>,
    surface_tension: Option<f64>,
    thermal_conductivity: Option<LinearConductivity>,
}

/// Antoine coefficients with a range given in °C.
const fn antoine(a: f64, b: f64, c: f64, t_min_c: f64, t_max_c: f64) -> Option<Antoine> {
    Some(Antoine {
        a,
        b,
        c,
        t_min: t_min_c + 273.15,
        t_max: t_max_c + 273.15,
    })
}

const fn dippr(c1: f64, c2: f64, c3: f64, c4: f64) -> Option<Dippr105> {
    Some(Dippr105 { c1, c2, c3, c4 })
}

const fn cp(a: f64, b: f64, c: f64, d: f64) -> Option<CpPolynomial> {
    Some(CpPolynomial { a, b, c, d })
}

/// Andrade points: viscosity in mPa·s at 298.15 K and at `t2`.
const fn andrade(mu_298: f64, t2: f64, mu2: f64) -> Option<Andrade> {
    Some(Andrade {
        t1: 298.15,
        mu1: mu_298 * 1e-3,
        t2,
        mu2: mu2 * 1e-3,
    })
}

const fn conductivity(k_ref: f64, slope: f64) -> Option<LinearConductivity> {
    Some(LinearConductivity { k_ref, slope })
}

const ROWS: [Row; 16] = [
    Row {
        name: "water",
        cas: "7732-18-5",
        formula: "H2O",
        synonyms: &["oxidane", "dihydrogen monoxide"],
        molecular_weight: 18.015_28,
        critical_temperature: 647.14,
        critical_pressure: 22.064e6,
        boiling_point: 373.124,
        melting_point: 273.15,
        antoine: antoine(8.071_31, 1730.63, 233.426, 1.0, 100.0),
        liquid_density: dippr(5.459, 0.305_42, 647.13, 0.081),
        ideal_gas_cp: cp(32.24, 1.924e-3, 1.055e-5, -3.596e-9),
        liquid_cp: Some(75.29),
        hvap_at_boiling: Some(40_660.0),
        viscosity: andrade(0.890, 353.15, 0.355),
        surface_tension: Some(0.0720),
        thermal_conductivity: conductivity(0.607, 0.001_15),
    },
    Row {
        name: "ethanol",
        cas: "64-17-5",
        formula: "C2H6O",
        synonyms: &["ethyl alcohol", "alcohol"],
        molecular_weight: 46.068_44,
        critical_temperature: 514.0,
        critical_pressure: 6.137e6,
        boiling_point: 351.39,
        melting_point: 159.05,
        antoine: antoine(8.112_20, 1592.864, 226.184, 20.0, 93.0),
        liquid_density: dippr(1.648, 0.276_27, 513.92, 0.2331),
        ideal_gas_cp: cp(9.014, 2.141e-1, -8.390e-5, 1.373e-9),
        liquid_cp: Some(112.3),
        hvap_at_boiling: Some(38_560.0),
        viscosity: andrade(1.074, 343.15, 0.504),
        surface_tension: Some(0.0220),
        thermal_conductivity: conductivity(0.167, -0.000_26),
    },
    Row {
        name: "methanol",
        cas: "67-56-1",
        formula: "CH4O",
        synonyms: &["methyl alcohol", "wood alcohol"],
        molecular_weight: 32.041_86,
        critical_temperature: 512.5,
        critical_pressure: 8.084e6,
        boiling_point: 337.632,
        melting_point: 175.15,
        antoine: antoine(8.080_97, 1582.271, 239.726, 15.0, 84.0),
        liquid_density: dippr(2.3267, 0.270_73, 512.5, 0.247_13),
        ideal_gas_cp: cp(21.15, 7.092e-2, 2.587e-5, -2.852e-8),
        liquid_cp: Some(81.1),
        hvap_at_boiling: Some(35_210.0),
        viscosity: andrade(0.544, 333.15, 0.350),
        surface_tension: Some(0.0221),
        thermal_conductivity: conductivity(0.200, -0.000_25),
    },
    Row {
        name: "acetone",
        cas: "67-64-1",
        formula: "C3H6O",
        synonyms: &["propanone", "2-propanone", "dimethyl ketone"],
        molecular_weight: 58.079_14,
        critical_temperature: 508.1,
        critical_pressure: 4.70e6,
        boiling_point: 329.2,
        melting_point: 178.45,
        antoine: antoine(7.117_14, 1210.595, 229.664, -13.0, 55.0),
        liquid_density: dippr(1.2332, 0.258_86, 508.2, 0.2913),
        ideal_gas_cp: cp(6.301, 2.606e-1, -1.253e-4, 2.038e-8),
        liquid_cp: Some(125.5),
        hvap_at_boiling: Some(29_100.0),
        viscosity: andrade(0.306, 323.15, 0.247),
        surface_tension: Some(0.0230),
        thermal_conductivity: conductivity(0.161, -0.000_30),
    },
    Row {
        name: "benzene",
        cas: "71-43-2",
        formula: "C6H6",
        synonyms: &["benzol", "cyclohexatriene"],
        molecular_weight: 78.111_84,
        critical_temperature: 562.05,
        critical_pressure: 4.895e6,
        boiling_point: 353.23,
        melting_point: 278.68,
        antoine: antoine(6.905_65, 1211.033, 220.79, 8.0, 103.0),
        liquid_density: dippr(1.0259, 0.266_66, 562.05, 0.283_94),
        ideal_gas_cp: cp(-33.92, 4.739e-1, -3.017e-4, 7.130e-8),
        liquid_cp: Some(136.0),
        hvap_at_boiling: Some(30_720.0),
        viscosity: andrade(0.604, 343.15, 0.355),
        surface_tension: Some(0.0282),
        thermal_conductivity: conductivity(0.141, -0.000_30),
    },
    Row {
        name: "toluene",
        cas: "108-88-3",
        formula: "C7H8",
        synonyms: &["methylbenzene", "toluol"],
        molecular_weight: 92.138_42,
        critical_temperature: 591.75,
        critical_pressure: 4.108e6,
        boiling_point: 383.75,
        melting_point: 178.18,
        antoine: antoine(6.954_64, 1344.8, 219.482, 6.0, 137.0),
        liquid_density: dippr(0.8792, 0.271_36, 591.75, 0.292_41),
        ideal_gas_cp: cp(-24.35, 5.125e-1, -2.765e-4, 4.911e-8),
        liquid_cp: Some(157.1),
        hvap_at_boiling: Some(33_180.0),
        viscosity: andrade(0.560, 353.15, 0.319),
        surface_tension: Some(0.0279),
        thermal_conductivity: conductivity(0.131, -0.000_29),
    },
    Row {
        name: "hexane",
        cas: "110-54-3",
        formula: "C6H14",
        synonyms: &["n-hexane"],
        molecular_weight: 86.175_36,
        critical_temperature: 507.6,
        critical_pressure: 3.025e6,
        boiling_point: 341.87,
        melting_point: 177.83,
        antoine: antoine(6.876_01, 1171.17, 224.41, -25.0, 92.0),
        liquid_density: dippr(0.708_24, 0.264_11, 507.6, 0.275_37),
        ideal_gas_cp: cp(-4.413, 5.820e-1, -3.119e-4, 6.494e-8),
        liquid_cp: Some(195.6),
        hvap_at_boiling: Some(28_850.0),
        viscosity: andrade(0.300, 333.15, 0.219),
        surface_tension: Some(0.0179),
        thermal_conductivity: conductivity(0.120, -0.000_35),
    },
    Row {
        name: "octane",
        cas: "111-65-9",
        formula: "C8H18",
        synonyms: &["n-octane"],
        molecular_weight: 114.228_52,
        critical_temperature: 568.7,
        critical_pressure: 2.49e6,
        boiling_point: 398.82,
        melting_point: 216.38,
        antoine: antoine(6.918_68, 1351.99, 209.155, 19.0, 152.0),
        liquid_density: dippr(0.537_31, 0.261_15, 568.7, 0.280_34),
        ideal_gas_cp: cp(-6.096, 7.712e-1, -4.195e-4, 8.855e-8),
        liquid_cp: Some(254.6),
        hvap_at_boiling: Some(34_410.0),
        viscosity: andrade(0.508, 353.15, 0.300),
        surface_tension: Some(0.0211),
        thermal_conductivity: conductivity(0.128, -0.000_30),
    },
    Row {
        name: "ammonia",
        cas: "7664-41-7",
        formula: "H3N",
        synonyms: &["azane", "nh3"],
        molecular_weight: 17.030_52,
        critical_temperature: 405.4,
        critical_pressure: 11.333e6,
        boiling_point: 239.82,
        melting_point: 195.41,
        antoine: antoine(7.360_50, 926.132, 240.17, -83.0, 60.0),
        liquid_density: dippr(3.5383, 0.254_43, 405.65, 0.2888),
        ideal_gas_cp: cp(27.31, 2.383e-2, 1.707e-5, -1.185e-8),
        liquid_cp: Some(80.8),
        hvap_at_boiling: Some(23_350.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "nitrogen",
        cas: "7727-37-9",
        formula: "N2",
        synonyms: &["dinitrogen"],
        molecular_weight: 28.0134,
        critical_temperature: 126.2,
        critical_pressure: 3.394e6,
        boiling_point: 77.355,
        melting_point: 63.15,
        antoine: antoine(6.494_57, 255.68, 266.55, -219.0, -183.0),
        liquid_density: dippr(3.2091, 0.2861, 126.2, 0.2966),
        ideal_gas_cp: cp(31.15, -1.357e-2, 2.680e-5, -1.168e-8),
        liquid_cp: Some(56.0),
        hvap_at_boiling: Some(5_570.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "oxygen",
        cas: "7782-44-7",
        formula: "O2",
        synonyms: &["dioxygen"],
        molecular_weight: 31.9988,
        critical_temperature: 154.58,
        critical_pressure: 5.043e6,
        boiling_point: 90.188,
        melting_point: 54.36,
        antoine: antoine(6.691_44, 319.013, 266.697, -210.0, -173.0),
        liquid_density: dippr(3.9143, 0.287_72, 154.58, 0.2924),
        ideal_gas_cp: cp(28.11, -3.680e-6, 1.746e-5, -1.065e-8),
        liquid_cp: Some(54.0),
        hvap_at_boiling: Some(6_820.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "carbon dioxide",
        cas: "124-38-9",
        formula: "CO2",
        synonyms: &["carbonic anhydride", "dry ice"],
        molecular_weight: 44.0095,
        critical_temperature: 304.13,
        critical_pressure: 7.3773e6,
        // Sublimation point at 1 atm; there is no normal boiling point.
        boiling_point: 194.67,
        melting_point: 216.58,
        antoine: None,
        liquid_density: dippr(2.768, 0.262_12, 304.21, 0.2908),
        ideal_gas_cp: cp(19.80, 7.344e-2, -5.602e-5, 1.715e-8),
        liquid_cp: Some(85.0),
        hvap_at_boiling: Some(15_326.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "methane",
        cas: "74-82-8",
        formula: "CH4",
        synonyms: &["marsh gas"],
        molecular_weight: 16.042_46,
        critical_temperature: 190.56,
        critical_pressure: 4.599e6,
        boiling_point: 111.66,
        melting_point: 90.69,
        antoine: antoine(6.611_84, 389.93, 266.0, -180.0, -153.0),
        liquid_density: dippr(2.9214, 0.289_76, 190.56, 0.288_81),
        ideal_gas_cp: cp(19.25, 5.213e-2, 1.197e-5, -1.132e-8),
        liquid_cp: Some(55.0),
        hvap_at_boiling: Some(8_190.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "ethane",
        cas: "74-84-0",
        formula: "C2H6",
        synonyms: &["dimethyl"],
        molecular_weight: 30.069_04,
        critical_temperature: 305.32,
        critical_pressure: 4.872e6,
        boiling_point: 184.57,
        melting_point: 90.35,
        antoine: antoine(6.802_66, 656.40, 256.0, -143.0, -75.0),
        liquid_density: dippr(1.9122, 0.279_37, 305.32, 0.291_87),
        ideal_gas_cp: cp(5.409, 1.781e-1, -6.938e-5, 8.713e-9),
        liquid_cp: Some(68.5),
        hvap_at_boiling: Some(14_700.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "propane",
        cas: "74-98-6",
        formula: "C3H8",
        synonyms: &["n-propane"],
        molecular_weight: 44.095_62,
        critical_temperature: 369.83,
        critical_pressure: 4.248e6,
        boiling_point: 231.04,
        melting_point: 85.47,
        antoine: antoine(6.829_73, 813.20, 248.0, -108.0, -25.0),
        liquid_density: dippr(1.3757, 0.274_53, 369.83, 0.293_59),
        ideal_gas_cp: cp(-4.224, 3.063e-1, -1.586e-4, 3.215e-8),
        liquid_cp: Some(98.4),
        hvap_at_boiling: Some(19_040.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
    Row {
        name: "butane",
        cas: "106-97-8",
        formula: "C4H10",
        synonyms: &["n-butane"],
        molecular_weight: 58.1222,
        critical_temperature: 425.12,
        critical_pressure: 3.796e6,
        boiling_point: 272.66,
        melting_point: 134.86,
        antoine: antoine(6.830_29, 945.90, 240.0, -77.0, 19.0),
        liquid_density: dippr(1.0677, 0.271_88, 425.12, 0.286_88),
        ideal_gas_cp: cp(9.487, 3.313e-1, -1.108e-4, -2.822e-9),
        liquid_cp: Some(140.9),
        hvap_at_boiling: Some(22_440.0),
        viscosity: None,
        surface_tension: None,
        thermal_conductivity: None,
    },
];

/// Returns the built-in compounds.
pub fn builtin() -> Vec<Compound> {
    ROWS.iter()
        .map(|row| Compound {
            name: row.name.to_string(),
            cas: row.cas.to_string(),
            formula: row.formula.to_string(),
            synonyms: row.synonyms.iter().map(ToString::to_string).collect(),
            molecular_weight: row.molecular_weight,
            critical_temperature: row.critical_temperature,
            critical_pressure: row.critical_pressure,
            boiling_point: row.boiling_point,
            melting_point: row.melting_point,
            antoine: row.antoine,
            liquid_density: row.liquid_density,
            ideal_gas_cp: row.ideal_gas_cp,
            liquid_cp: row.liquid_cp,
            hvap_at_boiling: row.hvap_at_boiling,
            viscosity: row.viscosity,
            surface_tension: row.surface_tension,
            thermal_conductivity: row.thermal_conductivity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_cas_are_unique() {
        let compounds = builtin();
        let names: HashSet<_> = compounds.iter().map(|c| c.name.as_str()).collect();
        let cas: HashSet<_> = compounds.iter().map(|c| c.cas.as_str()).collect();
        assert_eq!(names.len(), compounds.len());
        assert_eq!(cas.len(), compounds.len());
    }

    #[test]
    fn constants_are_ordered() {
        for c in builtin() {
            assert!(c.melting_point < c.critical_temperature, "{}", c.name);
            assert!(c.boiling_point < c.critical_temperature, "{}", c.name);
            assert!(c.molecular_weight > 0.0, "{}", c.name);
            if let Some(antoine) = c.antoine {
                assert!(antoine.t_min < antoine.t_max, "{}", c.name);
            }
        }
    }

    #[test]
    fn antoine_reproduces_normal_boiling_points() {
        for c in builtin() {
            let Some(antoine) = c.antoine else { continue };
            if !antoine.range().contains(c.boiling_point) {
                continue;
            }
            let p = antoine.pressure(c.boiling_point).unwrap();
            assert!(
                (p - 101_325.0).abs() / 101_325.0 < 0.05,
                "{}: {p} Pa at Tb",
                c.name
            );
        }
    }
}
