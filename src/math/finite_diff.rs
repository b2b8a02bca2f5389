use anyhow::{Result, bail};

/// Rows after the current one used by the slope.
pub const SPAN_AHEAD: usize = 5;
/// Rows before the current one used by the slope.
pub const SPAN_BEHIND: usize = 4;

/// Local slope `dy/dx` over the fixed span `[i - 4, i + 5]`, evaluated for
/// every `i` in `start..n - 5`. Other positions are undefined, as is `0/0`;
/// a vanishing `dx` with non-zero `dy` yields an infinite slope.
pub fn span_slope(y: &[f64], x: &[f64], start: usize) -> Result<Vec<Option<f64>>> {
    if y.len() != x.len() {
        bail!("slope series length mismatch: {} != {}", y.len(), x.len());
    }
    if start < SPAN_BEHIND {
        bail!(
            "slope start row {} leaves fewer than {} rows behind it",
            start,
            SPAN_BEHIND
        );
    }
    let n = y.len();
    let mut out = vec![None; n];
    let end = n.saturating_sub(SPAN_AHEAD);
    for i in start..end {
        let dy = y[i + SPAN_AHEAD] - y[i - SPAN_BEHIND];
        let dx = x[i + SPAN_AHEAD] - x[i - SPAN_BEHIND];
        let slope = dy / dx;
        out[i] = if slope.is_nan() { None } else { Some(slope) };
    }
    Ok(out)
}
