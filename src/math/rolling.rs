/// Trailing rolling mean. Position `i` averages `values[i + 1 - window..=i]`
/// and is undefined until a full window of defined values is available.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let span = &values[i + 1 - window..=i];
            let mut sum = 0.0;
            for v in span {
                match v {
                    Some(x) if !x.is_nan() => sum += x,
                    _ => return None,
                }
            }
            Some(sum / window as f64)
        })
        .collect()
}

pub fn rolling_mean_dense(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().map(|v| Some(*v)).collect();
    rolling_mean(&wrapped, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_full_window() {
        let out = rolling_mean_dense(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
        assert_eq!(out[..4], [None, None, None, None]);
        assert_eq!(out[4], Some(3.0));
        assert_eq!(out[5], Some(4.0));
    }

    #[test]
    fn undefined_inside_window_propagates() {
        let values = [Some(1.0), None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)];
        let out = rolling_mean(&values, 5);
        assert_eq!(out[4], None);
        assert_eq!(out[5], None);
        assert_eq!(out[6], Some(1.0));
    }
}
