use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::analysis::{DerivedFailureTable, DerivedPreconTable, RawRow};
use crate::io::csv_table::CsvTable;
use crate::io::{csv_writer, fmt_opt};

pub const PRECON_COLUMNS: [&str; 5] = [
    "Load_correction",
    "Displacement_correction",
    "Area_under_curve",
    "Load_correction_smoothed",
    "Area_under_curve_smooth",
];

pub const FAILURE_COLUMNS: [&str; 7] = [
    "Load_correction",
    "Displacement_correction",
    "Strain_%",
    "Strain_mm",
    "Stress_Mpas",
    "Modulus_mpa",
    "Modulus_smooth",
];

/// File names of the per-sample tables and summaries.
#[derive(Debug, Clone)]
pub struct SamplePaths {
    pub precon_table: PathBuf,
    pub precon_summary: PathBuf,
    pub failure_table: PathBuf,
    pub failure_summary: PathBuf,
}

impl SamplePaths {
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            precon_table: dir.join(format!("precon_{}.csv", name)),
            precon_summary: dir.join(format!("precon_summary_{}.txt", name)),
            failure_table: dir.join(format!("failure_{}.csv", name)),
            failure_summary: dir.join(format!("failure_summary_{}.txt", name)),
        }
    }
}

fn raw_fields(row: &RawRow) -> [String; 6] {
    [
        row.set_name.clone(),
        row.cycle.clone(),
        format!("{}", row.time),
        fmt_opt(row.sample_length),
        format!("{}", row.displacement),
        format!("{}", row.force),
    ]
}

fn header_with(raw_header: &[String; 6], derived: &[&str]) -> Vec<String> {
    raw_header
        .iter()
        .cloned()
        .chain(derived.iter().map(|s| s.to_string()))
        .collect()
}

pub fn write_precon_table(
    path: &Path,
    raw_header: &[String; 6],
    table: &DerivedPreconTable,
) -> Result<()> {
    let n = table.rows.len();
    ensure_len(table.load_correction.len(), n, "Load_correction")?;
    ensure_len(table.displacement_correction.len(), n, "Displacement_correction")?;
    ensure_len(table.area_under_curve.len(), n, "Area_under_curve")?;
    ensure_len(table.load_correction_smoothed.len(), n, "Load_correction_smoothed")?;
    ensure_len(table.area_under_curve_smooth.len(), n, "Area_under_curve_smooth")?;

    let mut w = csv_writer(path)?;
    w.write_record(header_with(raw_header, &PRECON_COLUMNS))?;
    for i in 0..n {
        let mut record: Vec<String> = raw_fields(&table.rows[i]).into();
        record.push(format!("{}", table.load_correction[i]));
        record.push(format!("{}", table.displacement_correction[i]));
        record.push(fmt_opt(table.area_under_curve[i]));
        record.push(fmt_opt(table.load_correction_smoothed[i]));
        record.push(fmt_opt(table.area_under_curve_smooth[i]));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_failure_table(
    path: &Path,
    raw_header: &[String; 6],
    table: &DerivedFailureTable,
) -> Result<()> {
    let n = table.rows.len();
    ensure_len(table.load_correction.len(), n, "Load_correction")?;
    ensure_len(table.displacement_correction.len(), n, "Displacement_correction")?;
    ensure_len(table.strain_percent.len(), n, "Strain_%")?;
    ensure_len(table.strain.len(), n, "Strain_mm")?;
    ensure_len(table.stress.len(), n, "Stress_Mpas")?;
    ensure_len(table.modulus.len(), n, "Modulus_mpa")?;
    ensure_len(table.modulus_smooth.len(), n, "Modulus_smooth")?;

    let mut w = csv_writer(path)?;
    w.write_record(header_with(raw_header, &FAILURE_COLUMNS))?;
    for i in 0..n {
        let mut record: Vec<String> = raw_fields(&table.rows[i]).into();
        record.push(format!("{}", table.load_correction[i]));
        record.push(format!("{}", table.displacement_correction[i]));
        record.push(format!("{}", table.strain_percent[i]));
        record.push(format!("{}", table.strain[i]));
        record.push(format!("{}", table.stress[i]));
        record.push(fmt_opt(table.modulus[i]));
        record.push(fmt_opt(table.modulus_smooth[i]));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// Reads named columns of a persisted derived table, in the order asked for.
/// Empty cells come back as NaN.
pub fn read_columns(path: &Path, names: &[&str]) -> Result<Vec<Vec<f64>>> {
    let table = CsvTable::read(path)?;
    names
        .iter()
        .map(|name| {
            let col = table.column(name)?;
            Ok(table
                .optional_numbers(col)?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect())
        })
        .collect()
}

fn ensure_len(got: usize, expected: usize, name: &str) -> Result<()> {
    if got != expected {
        bail!("{} length mismatch: {} != {}", name, got, expected);
    }
    Ok(())
}
