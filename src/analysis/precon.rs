use anyhow::{Context, Result, bail};

use super::{AnalysisSettings, DerivedPreconTable, Hysteresis, PreconSummary, RawRow};
use crate::math::integrate::pair_areas;
use crate::math::rolling::rolling_mean_dense;
use crate::math::stats;

pub fn derive_precon(
    rows: &[RawRow],
    settings: &AnalysisSettings,
) -> Result<(DerivedPreconTable, PreconSummary)> {
    let Some(first) = rows.first() else {
        bail!("no pre-conditioning rows");
    };
    let sample_length = first
        .sample_length
        .context("first pre-conditioning row has no sample length")?;

    let force: Vec<f64> = rows.iter().map(|r| r.force).collect();
    let min_force = stats::min(&force)?;

    let load_correction: Vec<f64> = force.iter().map(|f| f - min_force).collect();
    // The displacement is offset by the minimum force, matching the
    // historical results tables.
    let displacement_correction: Vec<f64> =
        rows.iter().map(|r| r.displacement - min_force).collect();

    let load_opt: Vec<Option<f64>> = load_correction.iter().map(|v| Some(*v)).collect();
    let area_under_curve = pair_areas(&load_opt, &displacement_correction);
    let load_correction_smoothed = rolling_mean_dense(&load_correction, settings.rolling_window);
    let area_under_curve_smooth = pair_areas(&load_correction_smoothed, &displacement_correction);

    let max_force = stats::max(&force)?;
    let max_force_cycle1 = cycle_max(rows, &settings.first_cycle_label)?;
    let max_force_cycle5 = cycle_max(rows, &settings.last_cycle_label)?;
    if max_force_cycle1 == 0.0 {
        bail!("cycle 1 maximum force is zero; stress relaxation is undefined");
    }
    let stress_relaxation = (max_force_cycle1 - max_force_cycle5) / max_force_cycle1 * 100.0;

    let labels: Vec<&str> = rows.iter().map(|r| r.cycle.as_str()).collect();
    let unsmoothed = hysteresis(
        &area_under_curve,
        &labels,
        &settings.first_cycle_label,
        &settings.last_cycle_label,
    )?;
    let smoothed_hysteresis = if settings.corrected_smoothed_hysteresis {
        hysteresis(
            &area_under_curve_smooth,
            &labels,
            &settings.first_cycle_label,
            &settings.last_cycle_label,
        )?
    } else {
        legacy_smoothed(&area_under_curve_smooth, &labels, settings, unsmoothed)
    };

    let table = DerivedPreconTable {
        rows: rows.to_vec(),
        load_correction,
        displacement_correction,
        area_under_curve,
        load_correction_smoothed,
        area_under_curve_smooth,
    };
    let summary = PreconSummary {
        sample_length,
        min_force,
        max_force,
        max_force_cycle1,
        max_force_cycle5,
        stress_relaxation,
        hysteresis: unsmoothed,
        smoothed_hysteresis,
    };
    Ok((table, summary))
}

fn cycle_max(rows: &[RawRow], label: &str) -> Result<f64> {
    let force: Vec<f64> = rows
        .iter()
        .filter(|r| r.cycle.contains(label))
        .map(|r| r.force)
        .collect();
    if force.is_empty() {
        bail!("no pre-conditioning rows for cycle '{}'", label);
    }
    stats::max(&force)
}

/// Positive areas of the first cycle plus negative areas of the last cycle.
pub fn hysteresis(
    areas: &[Option<f64>],
    cycle_labels: &[&str],
    first_cycle: &str,
    last_cycle: &str,
) -> Result<Hysteresis> {
    let positive = stats::sum_where(areas, |i, v| {
        v > 0.0 && cycle_labels.get(i).is_some_and(|l| l.contains(first_cycle))
    });
    let negative = stats::sum_where(areas, |i, v| {
        v < 0.0 && cycle_labels.get(i).is_some_and(|l| l.contains(last_cycle))
    });
    if positive == 0.0 {
        bail!("no positive loading area in cycle '{}'", first_cycle);
    }
    let sum = positive + negative;
    Ok(Hysteresis {
        positive,
        negative,
        sum,
        percent: sum / positive * 100.0,
    })
}

/// The historical tables report the unsmoothed sum and percentage under the
/// smoothed headings; only the positive/negative parts come from the smoothed
/// areas.
fn legacy_smoothed(
    smooth_areas: &[Option<f64>],
    labels: &[&str],
    settings: &AnalysisSettings,
    unsmoothed: Hysteresis,
) -> Hysteresis {
    let first = settings.first_cycle_label.as_str();
    let last = settings.last_cycle_label.as_str();
    Hysteresis {
        positive: stats::sum_where(smooth_areas, |i, v| {
            v > 0.0 && labels.get(i).is_some_and(|l| l.contains(first))
        }),
        negative: stats::sum_where(smooth_areas, |i, v| {
            v < 0.0 && labels.get(i).is_some_and(|l| l.contains(last))
        }),
        sum: unsmoothed.sum,
        percent: unsmoothed.percent,
    }
}
