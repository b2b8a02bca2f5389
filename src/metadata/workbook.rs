/// A single spreadsheet cell with formulas already evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

const EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Missing cells and zero-length text. Whitespace-only text is a value.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Text rendering used when a cell lands in the normalized table.
    /// Whole numbers print without a fractional part so replicate numbers
    /// read back as `1`, not `1.0`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => format_number(*v),
        }
    }
}

pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Zero-based lookup; cells outside the used range read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Sets a zero-based cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(3.0).to_text(), "3");
        assert_eq!(Cell::Number(0.25).to_text(), "0.25");
        assert_eq!(Cell::Text("B".into()).to_text(), "B");
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let mut sheet = Sheet::new("01.02.2021", Vec::new());
        sheet.set(2, 4, Cell::Number(1.5));
        assert_eq!(sheet.cell(2, 4), &Cell::Number(1.5));
        assert!(sheet.cell(10, 10).is_empty());
    }

    #[test]
    fn blank_text_still_counts_as_a_value() {
        assert!(Cell::Text(String::new()).is_empty());
        assert!(!Cell::Text(" ".into()).is_empty());
    }
}
