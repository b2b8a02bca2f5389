use std::path::Path;

use anyhow::{Result, bail};

use crate::analysis::{RawRow, RawTestRun};
use crate::ctx::{ColumnLayout, LengthColumn};
use crate::io::csv_table::CsvTable;

/// Reads a raw test-run CSV, binding every column the analysis needs before
/// any row is interpreted.
pub fn read_test_run(path: &Path, layout: &ColumnLayout) -> Result<RawTestRun> {
    let table = CsvTable::read(path)?;
    if table.rows.is_empty() {
        bail!("{}: no data rows", path.display());
    }

    let set_name = table.column(&layout.set_name)?;
    let cycle = table.column(&layout.cycle)?;
    let time = table.column(&layout.time)?;
    let sample_length = match &layout.sample_length {
        LengthColumn::Position(idx) => table.column_at(*idx)?,
        LengthColumn::Named(name) => table.column(name)?,
    };
    let displacement = table.column(&layout.displacement)?;
    let force = table.column(&layout.force)?;

    let sample_lengths = table.optional_numbers(sample_length)?;
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        rows.push(RawRow {
            set_name: table.text(row, set_name).to_string(),
            cycle: table.text(row, cycle).to_string(),
            time: table.number(row, time)?,
            sample_length: sample_lengths[row],
            displacement: table.number(row, displacement)?,
            force: table.number(row, force)?,
        });
    }

    let header = [set_name, cycle, time, sample_length, displacement, force]
        .map(|idx| table.header[idx].clone());
    Ok(RawTestRun { header, rows })
}
