use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

pub mod csv_table;
pub mod derived;
pub mod error_log;
pub mod json_writer;
pub mod metadata_csv;
pub mod results;
pub mod summary;
pub mod test_run;
pub mod xlsx;

pub(crate) fn csv_reader(path: &Path) -> Result<csv::Reader<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(BufReader::new(file)))
}

pub(crate) fn csv_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(csv::Writer::from_writer(file))
}

/// Writer that leaves the header to the caller, so empty tables still get one.
pub(crate) fn csv_writer_headerless(path: &Path) -> Result<csv::Writer<File>> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file))
}

/// Renders a derived value; undefined values become an empty cell.
pub(crate) fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if !x.is_nan() => format!("{}", x),
        _ => String::new(),
    }
}
