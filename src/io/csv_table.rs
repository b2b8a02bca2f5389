use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::StringRecord;

/// A headed CSV file held as text, with columns looked up by name.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub source: String,
    pub header: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = super::csv_reader(path)?;
        let header = reader
            .headers()
            .with_context(|| format!("failed to read header of {}", path.display()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("{}: malformed row {}", path.display(), idx + 2))?;
            rows.push(record);
        }
        Ok(Self {
            source: path.display().to_string(),
            header,
            rows,
        })
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        match self.header.iter().position(|h| h == name) {
            Some(idx) => Ok(idx),
            None => bail!(
                "{}: missing column '{}' (found: {})",
                self.source,
                name,
                self.header.join(", ")
            ),
        }
    }

    pub fn column_at(&self, idx: usize) -> Result<usize> {
        if idx >= self.header.len() {
            bail!(
                "{}: expected at least {} columns, found {}",
                self.source,
                idx + 1,
                self.header.len()
            );
        }
        Ok(idx)
    }

    pub fn text(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).unwrap_or("").trim()
    }

    pub fn number(&self, row: usize, col: usize) -> Result<f64> {
        let raw = self.text(row, col);
        raw.parse::<f64>().with_context(|| {
            format!(
                "{}: row {} column '{}' is not numeric: '{}'",
                self.source,
                row + 2,
                self.header[col],
                raw
            )
        })
    }

    /// Numeric column where empty cells are undefined.
    pub fn optional_numbers(&self, col: usize) -> Result<Vec<Option<f64>>> {
        (0..self.rows.len())
            .map(|row| {
                if self.text(row, col).is_empty() {
                    Ok(None)
                } else {
                    self.number(row, col).map(Some)
                }
            })
            .collect()
    }
}
