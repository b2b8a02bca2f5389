/// Scale applied to every trapezoid pair area of the load/displacement trace.
pub const PAIR_AREA_SCALE: f64 = 0.1;

/// Area between each row and the next: `0.1 * (y[j+1] + y[j]) * (x[j+1] - x[j])`.
///
/// The result has one entry per input row; the last row, and any pair with an
/// undefined `y`, stays undefined.
pub fn pair_areas(y: &[Option<f64>], x: &[f64]) -> Vec<Option<f64>> {
    let n = y.len().min(x.len());
    let mut out = vec![None; y.len()];
    for j in 0..n.saturating_sub(1) {
        if let (Some(y0), Some(y1)) = (y[j], y[j + 1]) {
            out[j] = Some(PAIR_AREA_SCALE * (y1 + y0) * (x[j + 1] - x[j]));
        }
    }
    out
}
