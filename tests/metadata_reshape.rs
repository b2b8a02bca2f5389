use tempfile::TempDir;

use tendon_biomech::io::metadata_csv::{read_metadata_table, write_metadata_table};
use tendon_biomech::metadata::{
    Cell, MatchMode, SUB_BLOCKS, Sheet, Workbook, derive_date_id, master_rows, reshape_workbook,
};

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn master(rows: &[(&str, &str)]) -> Sheet {
    let mut sheet = Sheet::new("Metadata", Vec::new());
    for (r, (date, sample)) in rows.iter().enumerate() {
        let values = [*date, *sample, "x", "fmt", "M", "12", "fmt", "WT"];
        for (c, v) in values.iter().enumerate() {
            sheet.set(r, c, text(v));
        }
    }
    sheet
}

/// Writes one sub-block: replicate numbers along the header row, then the
/// diameter and both circumferences at their fixed offsets.
fn put_block(sheet: &mut Sheet, header_row: usize, replicates: &[f64]) {
    for (i, rep) in replicates.iter().enumerate() {
        let c = 2 + i;
        sheet.set(header_row, c, Cell::Number(*rep));
        sheet.set(header_row + 5, c, Cell::Number(0.5 + i as f64 * 0.1));
        sheet.set(header_row + 9, c, Cell::Number(1.5));
        sheet.set(header_row + 10, c, Cell::Number(1.75));
    }
}

fn date_sheet() -> Sheet {
    let mut sheet = Sheet::new("09.04.21", Vec::new());
    put_block(&mut sheet, 0, &[1.0, 2.0, 3.0]);
    put_block(&mut sheet, 15, &[1.0]);
    // C has no replicates; D carries data but no sentinel.
    put_block(&mut sheet, 45, &[1.0, 2.0]);
    put_block(&mut sheet, 60, &[4.0]);
    sheet.set(60, 0, text("E"));
    sheet
}

#[test]
fn date_id_is_year_month_day() {
    assert_eq!(derive_date_id("09.04.21").unwrap(), "210409");
    assert_eq!(derive_date_id("09.04.2021").unwrap(), "210409");
    assert!(derive_date_id("Sheet2").is_err());
}

#[test]
fn master_rows_with_empty_cells_are_dropped() {
    let mut sheet = master(&[("09.04.21", "A"), ("09.04.21", "B")]);
    sheet.set(1, 5, Cell::Empty);
    let rows = master_rows(&sheet);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sample_id, "A");
    assert_eq!(rows[0].genotype, "WT");
}

#[test]
fn master_rows_keep_whitespace_cells() {
    let mut sheet = master(&[("09.04.21", "A"), ("09.04.21", "B")]);
    sheet.set(1, 3, text(" "));
    sheet.set(0, 6, text(""));
    let rows = master_rows(&sheet);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sample_id, "B");
}

#[test]
fn optional_blocks_need_their_sentinel() {
    let sheet = date_sheet();
    let present: Vec<char> = SUB_BLOCKS
        .iter()
        .filter(|b| b.is_present(&sheet))
        .map(|b| b.letter)
        .collect();
    assert_eq!(present, vec!['A', 'B', 'C', 'E']);
}

#[test]
fn blocks_tile_one_record_per_replicate() {
    let wb = Workbook::new(vec![
        master(&[
            ("09.04.21", "A"),
            ("09.04.21", "B"),
            ("09.04.21", "C"),
            ("09.04.21", "D"),
            ("09.04.21", "E"),
        ]),
        date_sheet(),
    ]);
    let reshaped = reshape_workbook(&wb, MatchMode::Substring).unwrap();
    let records = &reshaped.table.records;
    assert_eq!(records.len(), 5);
    assert!(reshaped.warnings.is_empty());

    let a: Vec<&str> = records
        .iter()
        .filter(|r| r.sample_id == "A")
        .map(|r| r.replicate.as_str())
        .collect();
    assert_eq!(a, vec!["1", "2", "3"]);
    assert!(records.iter().all(|r| r.date_id == "210409"));
    assert!(records.iter().all(|r| r.sample_id != "D"));

    let e = records.iter().find(|r| r.sample_id == "E").unwrap();
    assert_eq!(e.replicate, "4");
    assert_eq!(e.average_diameter, "0.5");
    assert_eq!(e.circumference_true, "1.75");
    assert_eq!(e.sex, "M");
}

#[test]
fn missing_master_row_warns_and_skips() {
    let wb = Workbook::new(vec![master(&[("09.04.21", "A")]), date_sheet()]);
    let reshaped = reshape_workbook(&wb, MatchMode::Substring).unwrap();
    assert_eq!(reshaped.table.len(), 3);
    assert!(reshaped.warnings.iter().any(|w| w.contains("sample B")));
}

#[test]
fn ambiguous_master_rows_fail() {
    let wb = Workbook::new(vec![
        master(&[("09.04.21", "A"), ("09.04.21 repeat", "A")]),
        date_sheet(),
    ]);
    let err = reshape_workbook(&wb, MatchMode::Substring).unwrap_err();
    assert!(format!("{:#}", err).contains("2 master metadata rows"));
}

#[test]
fn repeated_replicate_in_one_block_fails() {
    let mut sheet = Sheet::new("09.04.21", Vec::new());
    put_block(&mut sheet, 0, &[1.0, 1.0]);
    let wb = Workbook::new(vec![master(&[("09.04.21", "A")]), sheet]);

    let err = format!("{:#}", reshape_workbook(&wb, MatchMode::Substring).unwrap_err());
    assert!(err.contains("duplicate metadata key"));
    assert!(err.contains("replicate 1"));
    assert!(err.contains("sheet 09.04.21 column C"));
    assert!(err.contains("sheet 09.04.21 column D"));
}

#[test]
fn two_sheets_with_the_same_date_fail() {
    let mut first = Sheet::new("09.04.21", Vec::new());
    put_block(&mut first, 0, &[1.0]);
    let mut second = Sheet::new("09.04.2021", Vec::new());
    put_block(&mut second, 0, &[2.0, 1.0]);
    let wb = Workbook::new(vec![
        master(&[("09.04.21", "A"), ("09.04.2021", "A")]),
        first,
        second,
    ]);

    let err = format!("{:#}", reshape_workbook(&wb, MatchMode::Substring).unwrap_err());
    assert!(err.contains("sheet 09.04.21 column C"));
    assert!(err.contains("sheet 09.04.2021 column D"));
}

#[test]
fn exact_mode_ignores_partial_dates() {
    let wb = Workbook::new(vec![
        master(&[("09.04.21", "A"), ("09.04.21 repeat", "A")]),
        date_sheet(),
    ]);
    let reshaped = reshape_workbook(&wb, MatchMode::Exact).unwrap();
    assert_eq!(
        reshaped
            .table
            .records
            .iter()
            .filter(|r| r.sample_id == "A")
            .count(),
        3
    );
}

#[test]
fn sheets_beyond_the_cap_are_ignored() {
    let mut sheets = vec![master(&[])];
    for day in 1..=32 {
        sheets.push(Sheet::new(format!("{:02}.01.21", day), Vec::new()));
    }
    let reshaped = reshape_workbook(&Workbook::new(sheets), MatchMode::Substring).unwrap();
    assert!(reshaped.table.is_empty());
    assert!(
        reshaped
            .warnings
            .iter()
            .any(|w| w.contains("only the first 30"))
    );
    assert!(!reshaped.warnings.iter().any(|w| w.contains("31.01.21")));
}

#[test]
fn reshaped_table_round_trips_through_csv() {
    let wb = Workbook::new(vec![
        master(&[("09.04.21", "A"), ("09.04.21", "B"), ("09.04.21", "E")]),
        date_sheet(),
    ]);
    let reshaped = reshape_workbook(&wb, MatchMode::Substring).unwrap();

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tendon_data_formatted.csv");
    write_metadata_table(&path, &reshaped.table).unwrap();

    let header = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    assert_eq!(
        header,
        "Date,Sample_ID,.,Sex,Age,Genotype,Replicate,Average_diameter,Circumference,Circumference_true,Date_ID"
    );
    let back = read_metadata_table(&path).unwrap();
    assert_eq!(back, reshaped.table);
    assert!(back.find("210409", "E", "4").is_some());
}
