//! Per-sample derived metrics for one mechanical test run.

pub mod failure;
pub mod key;
pub mod precon;
pub mod stress_relax;

pub use key::SampleKey;

/// Numeric and labelling conventions of the analysis. The defaults reproduce
/// the results of the existing lab scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub precon_label: String,
    pub stress_relax_label: String,
    pub failure_label: String,
    pub first_cycle_label: String,
    pub last_cycle_label: String,
    pub stretch_label: String,
    pub rolling_window: usize,
    pub stress_relax_row: usize,
    pub stress_relax_seconds: f64,
    /// Rows before the stretch start at which the modulus begins.
    pub modulus_lead_rows: usize,
    /// Report the smoothed hysteresis from the smoothed areas instead of
    /// repeating the unsmoothed figures.
    pub corrected_smoothed_hysteresis: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            precon_label: "5x pre-conditioning".to_string(),
            stress_relax_label: "Stress-relax".to_string(),
            failure_label: "Failure".to_string(),
            first_cycle_label: "1".to_string(),
            last_cycle_label: "5".to_string(),
            stretch_label: "Stretch".to_string(),
            rolling_window: 5,
            stress_relax_row: 6000,
            stress_relax_seconds: 60.0,
            modulus_lead_rows: 2,
            corrected_smoothed_hysteresis: false,
        }
    }
}

/// One row of a raw test-run table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub set_name: String,
    pub cycle: String,
    pub time: f64,
    /// Only the first pre-conditioning row's value is used.
    pub sample_length: Option<f64>,
    pub displacement: f64,
    pub force: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Precon,
    StressRelax,
    Failure,
}

/// A loaded test run. `header` holds the source column names in the order
/// set name, cycle, time, sample length, displacement, force.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTestRun {
    pub header: [String; 6],
    pub rows: Vec<RawRow>,
}

impl RawTestRun {
    /// Rows whose set name contains the phase label, in file order.
    pub fn phase(&self, phase: Phase, settings: &AnalysisSettings) -> Vec<RawRow> {
        let label = match phase {
            Phase::Precon => &settings.precon_label,
            Phase::StressRelax => &settings.stress_relax_label,
            Phase::Failure => &settings.failure_label,
        };
        self.rows
            .iter()
            .filter(|r| r.set_name.contains(label.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hysteresis {
    pub positive: f64,
    pub negative: f64,
    pub sum: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPreconTable {
    pub rows: Vec<RawRow>,
    pub load_correction: Vec<f64>,
    pub displacement_correction: Vec<f64>,
    pub area_under_curve: Vec<Option<f64>>,
    pub load_correction_smoothed: Vec<Option<f64>>,
    pub area_under_curve_smooth: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreconSummary {
    pub sample_length: f64,
    pub min_force: f64,
    pub max_force: f64,
    pub max_force_cycle1: f64,
    pub max_force_cycle5: f64,
    pub stress_relaxation: f64,
    pub hysteresis: Hysteresis,
    /// Figures reported in the "smoothed" result columns.
    pub smoothed_hysteresis: Hysteresis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFailureTable {
    pub rows: Vec<RawRow>,
    pub load_correction: Vec<f64>,
    pub displacement_correction: Vec<f64>,
    pub strain_percent: Vec<f64>,
    pub strain: Vec<f64>,
    pub stress: Vec<f64>,
    pub modulus: Vec<Option<f64>>,
    pub modulus_smooth: Vec<Option<f64>>,
}

impl DerivedFailureTable {
    pub fn len(&self) -> usize {
        self.stress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stress.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureSummary {
    pub failure_row: usize,
    pub failure_stress: f64,
    pub failure_strain_percent: f64,
    pub failure_force: f64,
    pub failure_extension: f64,
    pub failure_time: f64,
    pub max_modulus: f64,
    pub max_modulus_row: usize,
    pub stress_at_max_modulus: f64,
    pub strain_at_max_modulus: f64,
}
