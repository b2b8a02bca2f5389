use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Column order of the normalized metadata table.
pub const METADATA_HEADER: [&str; 11] = [
    "Date",
    "Sample_ID",
    ".",
    "Sex",
    "Age",
    "Genotype",
    "Replicate",
    "Average_diameter",
    "Circumference",
    "Circumference_true",
    "Date_ID",
];

/// One row of the normalized metadata table.
///
/// Every field is kept as the text that was read from the workbook so that a
/// write/read cycle reproduces the table byte for byte. Numeric views are
/// provided by the accessor methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Sample_ID")]
    pub sample_id: String,
    #[serde(rename = ".")]
    pub placeholder: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Genotype")]
    pub genotype: String,
    #[serde(rename = "Replicate")]
    pub replicate: String,
    #[serde(rename = "Average_diameter")]
    pub average_diameter: String,
    #[serde(rename = "Circumference")]
    pub circumference: String,
    #[serde(rename = "Circumference_true")]
    pub circumference_true: String,
    #[serde(rename = "Date_ID")]
    pub date_id: String,
}

impl MetadataRecord {
    pub fn circumference_true_value(&self) -> Result<f64> {
        parse_number(&self.circumference_true).with_context(|| {
            format!(
                "true circumference '{}' for {} {} replicate {} is not numeric",
                self.circumference_true, self.date_id, self.sample_id, self.replicate
            )
        })
    }

    pub fn matches(&self, date_id: &str, sample_id: &str, replicate: &str) -> bool {
        self.date_id == date_id && self.sample_id == sample_id && self.replicate == replicate
    }
}

fn parse_number(text: &str) -> Result<f64> {
    Ok(text.trim().parse::<f64>()?)
}

/// Scalar results for one successfully processed sample; one row of
/// `results_summary.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    #[serde(rename = "File name")]
    pub file_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Sample ID")]
    pub sample_id: String,
    #[serde(rename = "Replicate number")]
    pub replicate: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Genotype")]
    pub genotype: String,
    #[serde(rename = "Sample length")]
    pub sample_length: f64,
    #[serde(rename = "Minimum force")]
    pub min_force: f64,
    #[serde(rename = "Maximum force")]
    pub max_force: f64,
    #[serde(rename = "Maximum force cycle 1")]
    pub max_force_cycle1: f64,
    #[serde(rename = "Maximum force cycle 5")]
    pub max_force_cycle5: f64,
    #[serde(rename = "Stress-relaxation")]
    pub stress_relaxation: f64,
    #[serde(rename = "Rate of change of stress")]
    pub stress_rate: f64,
    #[serde(rename = "Hysteresis sum value")]
    pub hysteresis_sum: f64,
    #[serde(rename = "Hysteresis %")]
    pub hysteresis_percent: f64,
    #[serde(rename = "Smoothed hysteresis sum value")]
    pub smoothed_hysteresis_sum: f64,
    #[serde(rename = "Smoothed hysteresis %")]
    pub smoothed_hysteresis_percent: f64,
    #[serde(rename = "Average diameter")]
    pub average_diameter: String,
    #[serde(rename = "Circumference")]
    pub circumference: String,
    #[serde(rename = "Circumference, true")]
    pub circumference_true: String,
    #[serde(rename = "Max modulus")]
    pub max_modulus: f64,
    #[serde(rename = "Stress at max modulus")]
    pub stress_at_max_modulus: f64,
    #[serde(rename = "Strain at max modulus")]
    pub strain_at_max_modulus: f64,
    #[serde(rename = "Failure stress (MPa)")]
    pub failure_stress: f64,
    #[serde(rename = "Failure strain (%)")]
    pub failure_strain_percent: f64,
    #[serde(rename = "Failure force (N)")]
    pub failure_force: f64,
    #[serde(rename = "Failure extension (mm)")]
    pub failure_extension: f64,
    #[serde(rename = "Failure time (s)")]
    pub failure_time: f64,
}

/// Column order of `results_summary.csv`, used when the table is empty and
/// serde has no row to derive a header from.
pub const RESULTS_HEADER: [&str; 29] = [
    "File name",
    "Date",
    "Sample ID",
    "Replicate number",
    "Sex",
    "Age",
    "Genotype",
    "Sample length",
    "Minimum force",
    "Maximum force",
    "Maximum force cycle 1",
    "Maximum force cycle 5",
    "Stress-relaxation",
    "Rate of change of stress",
    "Hysteresis sum value",
    "Hysteresis %",
    "Smoothed hysteresis sum value",
    "Smoothed hysteresis %",
    "Average diameter",
    "Circumference",
    "Circumference, true",
    "Max modulus",
    "Stress at max modulus",
    "Strain at max modulus",
    "Failure stress (MPa)",
    "Failure strain (%)",
    "Failure force (N)",
    "Failure extension (mm)",
    "Failure time (s)",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub processed: usize,
    pub no_metadata_match: usize,
    pub processing_failed: usize,
    pub malformed_filename: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub file: String,
    pub reason: String,
}

/// Machine-readable account of one `analyse` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReportV1 {
    pub tool: ToolInfo,
    pub schema_version: String,
    pub root: String,
    pub metadata_records: usize,
    pub counts: OutcomeCounts,
    pub processed: Vec<String>,
    pub no_metadata_match: Vec<String>,
    pub processing_failed: Vec<FailedFile>,
    pub malformed_filename: Vec<FailedFile>,
    pub warnings: Vec<String>,
}
