use std::path::Path;

use anyhow::{Context, Result};

use crate::io::{csv_reader, csv_writer_headerless};
use crate::schema::v1::{RESULTS_HEADER, SampleSummary};

/// Writes the aggregate results table. The header is written even when no
/// sample succeeded.
pub fn write_results(path: &Path, rows: &[SampleSummary]) -> Result<()> {
    let mut w = csv_writer_headerless(path)?;
    w.write_record(RESULTS_HEADER)?;
    for row in rows {
        w.serialize(row)
            .with_context(|| format!("failed to write results row for {}", row.file_name))?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_results(path: &Path) -> Result<Vec<SampleSummary>> {
    let mut reader = csv_reader(path)?;
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize().enumerate() {
        let row: SampleSummary =
            record.with_context(|| format!("{}: malformed row {}", path.display(), idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}
