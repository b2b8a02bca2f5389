//! Column statistics over numeric series.
//!
//! Undefined entries (`None`, NaN) are skipped, the way a dataframe reduction
//! skips missing values. Ties resolve to the first position.

use anyhow::{Result, bail};

pub fn min(values: &[f64]) -> Result<f64> {
    let mut out: Option<f64> = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        out = Some(match out {
            Some(m) if m <= v => m,
            _ => v,
        });
    }
    match out {
        Some(v) => Ok(v),
        None => bail!("minimum of an empty series"),
    }
}

pub fn max(values: &[f64]) -> Result<f64> {
    let (_, v) = argmax(values)?;
    Ok(v)
}

/// Position and value of the first maximum.
pub fn argmax(values: &[f64]) -> Result<(usize, f64)> {
    argmax_opt(values.iter().map(|v| Some(*v)))
}

/// `argmax` over a series with undefined entries.
pub fn argmax_opt<I>(values: I) -> Result<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        let Some(v) = v else { continue };
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if b >= v => {}
            _ => best = Some((i, v)),
        }
    }
    match best {
        Some(found) => Ok(found),
        None => bail!("maximum of a series with no defined values"),
    }
}

/// Sum of the defined entries selected by `keep`.
pub fn sum_where<F>(values: &[Option<f64>], mut keep: F) -> f64
where
    F: FnMut(usize, f64) -> bool,
{
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .filter(|&(i, x)| keep(i, x))
        .map(|(_, x)| x)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_takes_first_of_ties() {
        let (i, v) = argmax(&[1.0, 3.0, 3.0, 2.0]).unwrap();
        assert_eq!(i, 1);
        assert_eq!(v, 3.0);
    }

    #[test]
    fn argmax_opt_skips_undefined() {
        let (i, v) = argmax_opt(vec![None, Some(f64::NAN), Some(2.0), None]).unwrap();
        assert_eq!((i, v), (2, 2.0));
        assert!(argmax_opt(vec![None, None]).is_err());
    }

    #[test]
    fn min_of_empty_is_error() {
        assert!(min(&[]).is_err());
        assert_eq!(min(&[4.0, -1.0, 2.0]).unwrap(), -1.0);
    }
}
