//! Savitzky-Golay smoothing.
//!
//! Interior points use the least-squares convolution weights for a centred
//! window. The first and last half-windows are taken from a polynomial fitted
//! to the first and last full window respectively, so the output has the same
//! length as the input.

use anyhow::{Result, bail};

pub fn savgol_filter(values: &[f64], window: usize, polyorder: usize) -> Result<Vec<f64>> {
    if window % 2 == 0 {
        bail!("window length must be odd, got {}", window);
    }
    if polyorder >= window {
        bail!(
            "polynomial order {} must be less than window length {}",
            polyorder,
            window
        );
    }
    if values.len() < window {
        bail!(
            "series of {} points is shorter than the window length {}",
            values.len(),
            window
        );
    }

    let half = window / 2;
    let n = values.len();
    let mut out = vec![0.0; n];

    let weights = centre_weights(window, polyorder)?;
    for i in half..n - half {
        out[i] = weights
            .iter()
            .zip(&values[i - half..=i + half])
            .map(|(w, v)| w * v)
            .sum();
    }

    let head = fit_window(&values[..window], polyorder)?;
    for (i, slot) in out.iter_mut().enumerate().take(half) {
        *slot = eval(&head, scaled(i, half));
    }
    let tail = fit_window(&values[n - window..], polyorder)?;
    for k in window - half..window {
        out[n - window + k] = eval(&tail, scaled(k, half));
    }

    Ok(out)
}

/// Window position mapped onto `[-1, 1]` to keep the normal equations well
/// conditioned for long windows.
fn scaled(pos: usize, half: usize) -> f64 {
    if half == 0 {
        0.0
    } else {
        (pos as f64 - half as f64) / half as f64
    }
}

fn design_row(u: f64, polyorder: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(polyorder + 1);
    let mut p = 1.0;
    for _ in 0..=polyorder {
        row.push(p);
        p *= u;
    }
    row
}

fn normal_matrix(window: usize, polyorder: usize) -> Vec<Vec<f64>> {
    let half = window / 2;
    let m = polyorder + 1;
    let mut ata = vec![vec![0.0; m]; m];
    for k in 0..window {
        let row = design_row(scaled(k, half), polyorder);
        for a in 0..m {
            for b in 0..m {
                ata[a][b] += row[a] * row[b];
            }
        }
    }
    ata
}

fn centre_weights(window: usize, polyorder: usize) -> Result<Vec<f64>> {
    let half = window / 2;
    let m = polyorder + 1;
    let mut e0 = vec![0.0; m];
    e0[0] = 1.0;
    let b = solve(normal_matrix(window, polyorder), e0)?;
    Ok((0..window)
        .map(|k| eval(&b, scaled(k, half)))
        .collect())
}

fn fit_window(values: &[f64], polyorder: usize) -> Result<Vec<f64>> {
    let window = values.len();
    let half = window / 2;
    let m = polyorder + 1;
    let mut aty = vec![0.0; m];
    for (k, v) in values.iter().enumerate() {
        let row = design_row(scaled(k, half), polyorder);
        for a in 0..m {
            aty[a] += row[a] * v;
        }
    }
    solve(normal_matrix(window, polyorder), aty)
}

fn eval(coeffs: &[f64], u: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * u + c)
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            bail!("singular least-squares system");
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let f = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= f * a[col][k];
            }
            b[row] -= f * b[col];
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
