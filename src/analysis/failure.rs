use anyhow::{Result, bail};

use super::{AnalysisSettings, DerivedFailureTable, FailureSummary, RawRow};
use crate::math::finite_diff::span_slope;
use crate::math::rolling::rolling_mean;
use crate::math::stats;

/// Corrects load and displacement to the first failure row, derives strain and
/// stress, and estimates the modulus from the stretch onset onwards.
pub fn derive_failure(
    rows: &[RawRow],
    sample_length: f64,
    circumference_true: f64,
    settings: &AnalysisSettings,
) -> Result<DerivedFailureTable> {
    let Some(first) = rows.first() else {
        bail!("no failure rows");
    };
    if sample_length == 0.0 {
        bail!("sample length is zero; strain is undefined");
    }
    if circumference_true == 0.0 {
        bail!("true circumference is zero; stress is undefined");
    }

    let load_correction: Vec<f64> = rows.iter().map(|r| r.force - first.force).collect();
    let displacement_correction: Vec<f64> = rows
        .iter()
        .map(|r| r.displacement - first.displacement)
        .collect();
    let strain_percent: Vec<f64> = displacement_correction
        .iter()
        .map(|d| d / sample_length * 100.0)
        .collect();
    let strain: Vec<f64> = displacement_correction
        .iter()
        .map(|d| d / sample_length)
        .collect();
    let stress: Vec<f64> = load_correction
        .iter()
        .map(|l| l / circumference_true)
        .collect();

    let start = modulus_start(rows, settings)?;
    let modulus = span_slope(&stress, &strain, start)?;
    let modulus_smooth = rolling_mean(&modulus, settings.rolling_window);

    Ok(DerivedFailureTable {
        rows: rows.to_vec(),
        load_correction,
        displacement_correction,
        strain_percent,
        strain,
        stress,
        modulus,
        modulus_smooth,
    })
}

/// First row of the modulus: a fixed lead before the first stretch row.
pub fn modulus_start(rows: &[RawRow], settings: &AnalysisSettings) -> Result<usize> {
    let Some(stretch) = rows
        .iter()
        .position(|r| r.cycle.contains(settings.stretch_label.as_str()))
    else {
        bail!("failure phase has no '{}' rows", settings.stretch_label);
    };
    match stretch.checked_sub(settings.modulus_lead_rows) {
        Some(start) => Ok(start),
        None => bail!(
            "stretch starts at failure row {}, before the {}-row modulus lead",
            stretch,
            settings.modulus_lead_rows
        ),
    }
}

/// Failure point (peak stress) and the maximum smoothed modulus before it.
pub fn summarize_failure(table: &DerivedFailureTable) -> Result<FailureSummary> {
    if table.is_empty() {
        bail!("empty failure table");
    }
    let n = table.len();
    for (name, len) in [
        ("rows", table.rows.len()),
        ("load_correction", table.load_correction.len()),
        ("displacement_correction", table.displacement_correction.len()),
        ("strain_percent", table.strain_percent.len()),
        ("strain", table.strain.len()),
        ("modulus_smooth", table.modulus_smooth.len()),
    ] {
        if len != n {
            bail!("failure table {} length mismatch: {} != {}", name, len, n);
        }
    }
    let (failure_row, failure_stress) = stats::argmax(&table.stress)?;

    let before_failure = table.modulus_smooth[..failure_row].iter().copied();
    let (max_modulus_row, max_modulus) = match stats::argmax_opt(before_failure) {
        Ok(found) => found,
        Err(_) => bail!(
            "no smoothed modulus values before the failure point at row {}",
            failure_row
        ),
    };

    Ok(FailureSummary {
        failure_row,
        failure_stress,
        failure_strain_percent: table.strain_percent[failure_row],
        failure_force: table.load_correction[failure_row],
        failure_extension: table.displacement_correction[failure_row],
        failure_time: table.rows[failure_row].time,
        max_modulus,
        max_modulus_row,
        stress_at_max_modulus: table.stress[max_modulus_row],
        strain_at_max_modulus: table.strain[max_modulus_row],
    })
}
