use anyhow::{Result, bail};

use super::{AnalysisSettings, RawRow};

/// Rate of force decay over the hold: first row minus the row at the fixed
/// sampling index, divided by the hold duration.
pub fn stress_rate(rows: &[RawRow], settings: &AnalysisSettings) -> Result<f64> {
    let idx = settings.stress_relax_row;
    let (Some(first), Some(later)) = (rows.first(), rows.get(idx)) else {
        bail!(
            "stress-relaxation phase has {} rows; row {} is required",
            rows.len(),
            idx
        );
    };
    Ok((first.force - later.force) / settings.stress_relax_seconds)
}
