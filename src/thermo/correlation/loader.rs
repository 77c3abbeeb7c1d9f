//! CSV compound database reader.
//!
//! One compound per row with a header line. Coefficient groups are optional,
//! but a group must be either complete or entirely empty:
//!
//! ```text
//! name,cas,formula,molecular_weight,tc,pc,tb,tm,antoine_a,antoine_b,antoine_c,antoine_tmin,antoine_tmax,dippr_c1,dippr_c2,dippr_c3,dippr_c4,cp_a,cp_b,cp_c,cp_d,cp_liquid,hvap_tb,synonyms
//! ```
//!
//! Antoine coefficients are in mmHg and °C, with the range in K. Synonyms are
//! separated by `;`.

use std::path::Path;

use serde::Deserialize;

use super::equations::{Antoine, CpPolynomial, Dippr105};
use super::Compound;
use crate::thermo::{BackendError, BackendResult};

#[derive(Debug, Deserialize)]
struct CompoundRecord {
    name: String,
    cas: String,
    formula: String,
    molecular_weight: f64,
    tc: f64,
    pc: f64,
    tb: f64,
    tm: f64,
    antoine_a: Option<f64>,
    antoine_b: Option<f64>,
    antoine_c: Option<f64>,
    antoine_tmin: Option<f64>,
    antoine_tmax: Option<f64>,
    dippr_c1: Option<f64>,
    dippr_c2: Option<f64>,
    dippr_c3: Option<f64>,
    dippr_c4: Option<f64>,
    cp_a: Option<f64>,
    cp_b: Option<f64>,
    cp_c: Option<f64>,
    cp_d: Option<f64>,
    cp_liquid: Option<f64>,
    hvap_tb: Option<f64>,
    #[serde(default)]
    synonyms: Option<String>,
}

/// Collects an all-or-nothing coefficient group.
fn group<const N: usize>(
    line: u64,
    label: &str,
    values: [Option<f64>; N],
) -> BackendResult<Option<[f64; N]>> {
    let present = values.iter().filter(|v| v.is_some()).count();
    if present == 0 {
        return Ok(None);
    }
    if present < N {
        return Err(BackendError::InvalidRecord {
            line,
            message: format!("incomplete {label} coefficients ({present} of {N} given)"),
        });
    }
    Ok(Some(values.map(|v| v.unwrap_or_default())))
}

impl CompoundRecord {
    fn into_compound(self, line: u64) -> BackendResult<Compound> {
        let invalid = |message: String| BackendError::InvalidRecord { line, message };

        if self.name.trim().is_empty() {
            return Err(invalid("empty name".to_string()));
        }
        if self.cas.trim().is_empty() {
            return Err(invalid(format!("empty CAS number for '{}'", self.name)));
        }
        for (label, value) in [
            ("molecular_weight", self.molecular_weight),
            ("tc", self.tc),
            ("pc", self.pc),
            ("tb", self.tb),
            ("tm", self.tm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{label} must be positive, got {value}")));
            }
        }
        if self.tb >= self.tc {
            return Err(invalid(format!(
                "boiling point {} K is not below the critical temperature {} K",
                self.tb, self.tc
            )));
        }

        let antoine = group(
            line,
            "Antoine",
            [
                self.antoine_a,
                self.antoine_b,
                self.antoine_c,
                self.antoine_tmin,
                self.antoine_tmax,
            ],
        )?
        .map(|[a, b, c, t_min, t_max]| Antoine {
            a,
            b,
            c,
            t_min,
            t_max,
        });
        if antoine.is_some_and(|a| a.t_min >= a.t_max) {
            return Err(invalid("Antoine range is empty".to_string()));
        }

        let liquid_density = group(
            line,
            "DIPPR-105",
            [self.dippr_c1, self.dippr_c2, self.dippr_c3, self.dippr_c4],
        )?
        .map(|[c1, c2, c3, c4]| Dippr105 { c1, c2, c3, c4 });

        let ideal_gas_cp = group(line, "Cp", [self.cp_a, self.cp_b, self.cp_c, self.cp_d])?
            .map(|[a, b, c, d]| CpPolynomial { a, b, c, d });

        let synonyms = self
            .synonyms
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Compound {
            name: self.name.trim().to_string(),
            cas: self.cas.trim().to_string(),
            formula: self.formula.trim().to_string(),
            synonyms,
            molecular_weight: self.molecular_weight,
            critical_temperature: self.tc,
            critical_pressure: self.pc,
            boiling_point: self.tb,
            melting_point: self.tm,
            antoine,
            liquid_density,
            ideal_gas_cp,
            liquid_cp: self.cp_liquid,
            hvap_at_boiling: self.hvap_tb,
            viscosity: None,
            surface_tension: None,
            thermal_conductivity: None,
        })
    }
}

/// Reads every compound in a CSV file.
///
/// # Errors
///
/// Returns [`BackendError::DatabaseRead`] if the file cannot be opened or
/// parsed, and [`BackendError::InvalidRecord`] for a semantically invalid row.
pub fn read_compounds(path: &Path) -> BackendResult<Vec<Compound>> {
    let read_error = |source| BackendError::DatabaseRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    let headers = reader.headers().map_err(read_error)?.clone();
    let mut compounds = Vec::new();
    for result in reader.records() {
        let row = result.map_err(read_error)?;
        // Quoted fields may span lines, so count from the reader, not the row index.
        let line = row
            .position()
            .map_or(compounds.len() as u64 + 2, csv::Position::line);
        let record: CompoundRecord = row.deserialize(Some(&headers)).map_err(read_error)?;
        compounds.push(record.into_compound(line)?);
    }

    tracing::debug!(path = %path.display(), count = compounds.len(), "Read compound records");
    Ok(compounds)
}
