//! Reshapes the sheet-per-testing-date workbook into one normalized table.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::schema::v1::MetadataRecord;

pub mod layout;
pub mod workbook;

pub use layout::{SUB_BLOCKS, SubBlockLayout};
pub use workbook::{Cell, Sheet, Workbook};

/// Date sheets considered after the master sheet.
pub const MAX_DATE_SHEETS: usize = 30;

/// Master-sheet columns that survive reshaping: date, sample id, placeholder,
/// sex, age, genotype. Columns 3 and 6 only hold formatting data.
const MASTER_KEEP_COLS: [usize; 6] = [0, 1, 2, 4, 5, 7];
const MASTER_MIN_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Date and sample fields only have to contain the sheet date and letter.
    #[default]
    Substring,
    /// Date and sample fields must equal the sheet date and letter.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterRow {
    pub date: String,
    pub sample_id: String,
    pub placeholder: String,
    pub sex: String,
    pub age: String,
    pub genotype: String,
}

impl MasterRow {
    fn matches(&self, date: &str, letter: char, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Substring => self.date.contains(date) && self.sample_id.contains(letter),
            MatchMode::Exact => {
                self.date.trim() == date && self.sample_id.trim() == letter.to_string()
            }
        }
    }
}

/// Normalized metadata, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    pub records: Vec<MetadataRecord>,
}

impl MetadataTable {
    pub fn new(records: Vec<MetadataRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup on (date id, sample letter, replicate).
    pub fn find(&self, date_id: &str, sample_id: &str, replicate: &str) -> Option<&MetadataRecord> {
        self.records
            .iter()
            .find(|r| r.matches(date_id, sample_id, replicate))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    pub table: MetadataTable,
    pub warnings: Vec<String>,
}

/// Builds a `YYMMDD` id from a `day.month.year` sheet name.
pub fn derive_date_id(sheet_name: &str) -> Result<String> {
    let parts: Vec<&str> = sheet_name.trim().split('.').collect();
    if parts.len() < 3 {
        bail!(
            "sheet name '{}' is not a '.'-separated day.month.year date",
            sheet_name
        );
    }
    let (day, month, year) = (parts[0].trim(), parts[1].trim(), parts[2].trim());
    if day.is_empty() || month.is_empty() || year.chars().count() < 2 {
        bail!("sheet name '{}' has an incomplete date", sheet_name);
    }
    let yy: String = year.chars().skip(year.chars().count() - 2).collect();
    Ok(format!("{}{}{}", yy, month, day))
}

/// Rows of the master sheet with no empty cell, projected onto the kept columns.
pub fn master_rows(sheet: &Sheet) -> Vec<MasterRow> {
    let width = sheet
        .rows
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0)
        .max(MASTER_MIN_WIDTH);

    let mut out = Vec::new();
    for (idx, row) in sheet.rows.iter().enumerate() {
        let complete = (0..width).all(|c| !sheet.cell(idx, c).is_empty());
        if !complete {
            debug!(row = idx + 1, "master row dropped (empty cell)");
            continue;
        }
        let text = |c: usize| row[c].to_text();
        let [d, s, p, x, a, g] = MASTER_KEEP_COLS;
        out.push(MasterRow {
            date: text(d),
            sample_id: text(s),
            placeholder: text(p),
            sex: text(x),
            age: text(a),
            genotype: text(g),
        });
    }
    out
}

pub fn reshape_workbook(workbook: &Workbook, mode: MatchMode) -> Result<Reshaped> {
    let master = workbook
        .sheets
        .first()
        .context("workbook has no sheets; expected a metadata sheet first")?;
    let master = master_rows(master);
    info!(rows = master.len(), "master metadata rows loaded");

    let mut reshaped = Reshaped::default();
    let date_sheets = workbook.sheets.iter().skip(1);
    if workbook.sheets.len() > MAX_DATE_SHEETS + 1 {
        let msg = format!(
            "{} date sheets found; only the first {} are reshaped",
            workbook.sheets.len() - 1,
            MAX_DATE_SHEETS
        );
        warn!("{}", msg);
        reshaped.warnings.push(msg);
    }

    let mut seen: HashMap<(String, String, String), String> = HashMap::new();
    for sheet in date_sheets.take(MAX_DATE_SHEETS) {
        let placed = reshape_sheet(sheet, &master, mode, &mut reshaped.warnings)?;
        info!(sheet = %sheet.name, records = placed.len(), "sheet reshaped");
        for (column, record) in placed {
            let here = format!("sheet {} column {}", sheet.name, column_letter(column));
            let key = (
                record.date_id.clone(),
                record.sample_id.clone(),
                record.replicate.clone(),
            );
            if let Some(first) = seen.get(&key) {
                bail!(
                    "duplicate metadata key (date id {}, sample {}, replicate {}): {} and {}",
                    key.0,
                    key.1,
                    key.2,
                    first,
                    here
                );
            }
            seen.insert(key, here);
            reshaped.table.records.push(record);
        }
    }

    Ok(reshaped)
}

/// Records of one date sheet, each tagged with its replicate column.
fn reshape_sheet(
    sheet: &Sheet,
    master: &[MasterRow],
    mode: MatchMode,
    warnings: &mut Vec<String>,
) -> Result<Vec<(usize, MetadataRecord)>> {
    let date = sheet.name.trim();
    let date_id = derive_date_id(date)?;
    let mut out = Vec::new();

    for block in SUB_BLOCKS.iter() {
        if !block.is_present(sheet) {
            info!(sheet = %sheet.name, sample = %block.letter, "sub-block absent");
            continue;
        }

        let matched: Vec<&MasterRow> = master
            .iter()
            .filter(|m| m.matches(date, block.letter, mode))
            .collect();
        let row = match matched.as_slice() {
            [] => {
                let msg = format!(
                    "sheet {}: no master metadata row for sample {}",
                    sheet.name, block.letter
                );
                warn!("{}", msg);
                warnings.push(msg);
                continue;
            }
            [one] => *one,
            many => bail!(
                "sheet {}: {} master metadata rows match sample {} (dates: {})",
                sheet.name,
                many.len(),
                block.letter,
                many.iter()
                    .map(|m| m.date.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        out.extend(tile_block(sheet, block, row, &date_id));
    }

    Ok(out)
}

/// One record per replicate column, each carrying the shared master row.
fn tile_block(
    sheet: &Sheet,
    block: &SubBlockLayout,
    row: &MasterRow,
    date_id: &str,
) -> Vec<(usize, MetadataRecord)> {
    block
        .replicate_columns(sheet)
        .into_iter()
        .map(|c| {
            let record = MetadataRecord {
                date: row.date.clone(),
                sample_id: row.sample_id.clone(),
                placeholder: row.placeholder.clone(),
                sex: row.sex.clone(),
                age: row.age.clone(),
                genotype: row.genotype.clone(),
                replicate: sheet.cell(block.header_row, c).to_text(),
                average_diameter: sheet.cell(block.diameter_row(), c).to_text(),
                circumference: sheet.cell(block.circumference_row(), c).to_text(),
                circumference_true: sheet.cell(block.circumference_true_row(), c).to_text(),
                date_id: date_id.to_string(),
            };
            (c, record)
        })
        .collect()
}

fn column_letter(col: usize) -> char {
    char::from(b'A' + (col % 26) as u8)
}
