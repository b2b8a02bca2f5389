use tendon_biomech::analysis::precon::{derive_precon, hysteresis};
use tendon_biomech::analysis::{AnalysisSettings, RawRow};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Five load/unload cycles of ten rows; unloading runs below loading.
fn cycles() -> Vec<RawRow> {
    let mut rows = Vec::new();
    for c in 1..=5 {
        for k in 0..10 {
            let (x, force) = if k < 5 {
                (k as f64, 1.0 + 2.0 * k as f64)
            } else {
                let x = (9 - k) as f64;
                (x, 1.0 + x)
            };
            rows.push(RawRow {
                set_name: "5x pre-conditioning".to_string(),
                cycle: c.to_string(),
                time: rows.len() as f64 * 0.1,
                sample_length: if rows.is_empty() { Some(12.5) } else { None },
                displacement: x,
                force,
            });
        }
    }
    rows
}

#[test]
fn hysteresis_of_worked_example() {
    let areas = [
        Some(2.0),
        Some(-1.0),
        Some(3.0),
        Some(-2.0),
        Some(-1.0),
        Some(1.0),
    ];
    let labels = ["1", "1", "1", "5", "5", "5"];
    let h = hysteresis(&areas, &labels, "1", "5").unwrap();
    assert!(close(h.positive, 5.0));
    assert!(close(h.negative, -3.0));
    assert!(close(h.sum, 2.0));
    assert!(close(h.percent, 40.0));
}

#[test]
fn undefined_areas_are_ignored() {
    let areas = [Some(1.0), None, Some(-0.5)];
    let labels = ["1", "1", "5"];
    let h = hysteresis(&areas, &labels, "1", "5").unwrap();
    assert!(close(h.sum, 0.5));
}

#[test]
fn no_positive_area_is_an_error() {
    let areas = [Some(-1.0), Some(-2.0)];
    assert!(hysteresis(&areas, &["1", "5"], "1", "5").is_err());
}

#[test]
fn precon_summary_of_synthetic_cycles() {
    let rows = cycles();
    let (table, summary) = derive_precon(&rows, &AnalysisSettings::default()).unwrap();

    assert_eq!(table.rows.len(), 50);
    assert!(close(summary.sample_length, 12.5));
    assert!(close(summary.min_force, 1.0));
    assert!(close(summary.max_force, 9.0));
    assert!(close(summary.max_force_cycle1, 9.0));
    assert!(close(summary.max_force_cycle5, 9.0));
    assert!(close(summary.stress_relaxation, 0.0));

    // Displacement is offset by the minimum force.
    assert!(close(table.displacement_correction[0], -1.0));
    assert!(close(table.load_correction[1], 2.0));
    assert!(close(table.area_under_curve[0].unwrap(), 0.2));
    assert_eq!(table.area_under_curve[49], None);
    assert_eq!(table.load_correction_smoothed[3], None);
    assert!(table.load_correction_smoothed[4].is_some());

    let h = summary.hysteresis;
    assert!(close(h.positive, 3.2));
    assert!(close(h.negative, -1.6));
    assert!(close(h.sum, 1.6));
    assert!(close(h.percent, 50.0));
}

#[test]
fn missing_cycle_fails() {
    let rows: Vec<RawRow> = cycles().into_iter().filter(|r| r.cycle != "5").collect();
    let err = derive_precon(&rows, &AnalysisSettings::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("cycle '5'"));
}

#[test]
fn missing_sample_length_fails() {
    let mut rows = cycles();
    rows[0].sample_length = None;
    assert!(derive_precon(&rows, &AnalysisSettings::default()).is_err());
}
