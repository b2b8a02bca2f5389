use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use tracing::info;

use crate::metadata::{Cell, Sheet, Workbook};

/// Loads every sheet of a spreadsheet workbook, in workbook order, with
/// cached formula results rather than formulas.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let mut wb = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in wb.sheet_names() {
        let range = wb
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet '{}' of {}", name, path.display()))?;
        let mut sheet = Sheet::new(name.clone(), Vec::new());
        let (row0, col0) = range.start().unwrap_or((0, 0));
        for (r, c, value) in range.cells() {
            let cell = convert(value);
            if cell != Cell::Empty {
                sheet.set(row0 as usize + r, col0 as usize + c, cell);
            }
        }
        sheets.push(sheet);
    }

    info!(
        workbook = %path.display(),
        sheets = sheets.len(),
        "workbook loaded"
    );
    Ok(Workbook::new(sheets))
}

fn convert(value: &Data) -> Cell {
    match value {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}
