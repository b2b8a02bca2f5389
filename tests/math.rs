use tendon_biomech::math::finite_diff::span_slope;
use tendon_biomech::math::integrate::pair_areas;
use tendon_biomech::math::savgol::savgol_filter;

#[test]
fn savgol_keeps_polynomials_of_its_order() {
    let x: Vec<f64> = (0..40).map(|i| i as f64 * 0.25).collect();
    let y: Vec<f64> = x.iter().map(|v| 0.5 * v * v * v - 2.0 * v + 1.0).collect();
    let out = savgol_filter(&y, 11, 3).unwrap();
    assert_eq!(out.len(), y.len());
    for (a, b) in out.iter().zip(&y) {
        assert!((a - b).abs() < 1e-6 * (1.0 + b.abs()), "{} vs {}", a, b);
    }
}

#[test]
fn savgol_flattens_alternating_noise() {
    let y: Vec<f64> = (0..21).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let out = savgol_filter(&y, 5, 1).unwrap();
    for v in &out[2..19] {
        assert!(v.abs() < 0.25);
    }
}

#[test]
fn savgol_rejects_short_series() {
    let y = vec![1.0; 100];
    assert!(savgol_filter(&y, 101, 3).is_err());
    assert!(savgol_filter(&y, 10, 3).is_err());
    assert!(savgol_filter(&y, 5, 5).is_err());
}

#[test]
fn slope_handles_flat_spans() {
    let n = 12;
    let x = vec![1.0; n];
    let mut y = vec![2.0; n];
    // dx is zero everywhere; dy only where the window reaches row 11.
    y[11] = 3.0;
    let out = span_slope(&y, &x, 4).unwrap();
    assert_eq!(out[4], None);
    assert_eq!(out[6], Some(f64::INFINITY));
    assert_eq!(out[7], None);
}

#[test]
fn slope_start_too_early_fails() {
    let v = vec![0.0; 12];
    assert!(span_slope(&v, &v, 3).is_err());
}

#[test]
fn pair_area_of_unit_step() {
    let y = [Some(1.0), Some(3.0), None, Some(2.0)];
    let x = [0.0, 1.0, 2.0, 4.0];
    let out = pair_areas(&y, &x);
    assert_eq!(out.len(), 4);
    assert!((out[0].unwrap() - 0.4).abs() < 1e-12);
    assert_eq!(out[1], None);
    assert_eq!(out[2], None);
    assert_eq!(out[3], None);
}
