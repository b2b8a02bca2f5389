//! Fixed positions of the per-sample sub-blocks on a testing-date sheet.
//!
//! All rows and columns are zero-based. Every sub-block has the same shape: a
//! header row carrying replicate numbers across columns C..M, followed by the
//! measurement rows at fixed offsets below it.

use super::workbook::Sheet;

pub const FIRST_REPLICATE_COL: usize = 2;
pub const LAST_REPLICATE_COL: usize = 12;
pub const SENTINEL_COL: usize = 0;

pub const DIAMETER_OFFSET: usize = 5;
pub const CIRCUMFERENCE_OFFSET: usize = 9;
pub const CIRCUMFERENCE_TRUE_OFFSET: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubBlockLayout {
    pub letter: char,
    pub header_row: usize,
    /// Optional blocks only exist when column A of the header row holds the
    /// sample letter.
    pub optional: bool,
}

pub const SUB_BLOCKS: [SubBlockLayout; 5] = [
    SubBlockLayout {
        letter: 'A',
        header_row: 0,
        optional: false,
    },
    SubBlockLayout {
        letter: 'B',
        header_row: 15,
        optional: false,
    },
    SubBlockLayout {
        letter: 'C',
        header_row: 30,
        optional: false,
    },
    SubBlockLayout {
        letter: 'D',
        header_row: 45,
        optional: true,
    },
    SubBlockLayout {
        letter: 'E',
        header_row: 60,
        optional: true,
    },
];

impl SubBlockLayout {
    pub fn diameter_row(&self) -> usize {
        self.header_row + DIAMETER_OFFSET
    }

    pub fn circumference_row(&self) -> usize {
        self.header_row + CIRCUMFERENCE_OFFSET
    }

    pub fn circumference_true_row(&self) -> usize {
        self.header_row + CIRCUMFERENCE_TRUE_OFFSET
    }

    pub fn is_present(&self, sheet: &Sheet) -> bool {
        if !self.optional {
            return true;
        }
        sheet.cell(self.header_row, SENTINEL_COL).to_text().trim() == self.letter.to_string()
    }

    /// Columns of the header row that carry a replicate number.
    pub fn replicate_columns(&self, sheet: &Sheet) -> Vec<usize> {
        (FIRST_REPLICATE_COL..=LAST_REPLICATE_COL)
            .filter(|&c| !sheet.cell(self.header_row, c).is_empty())
            .collect()
    }
}
