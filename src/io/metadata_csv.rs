use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::{csv_reader, csv_writer_headerless};
use crate::metadata::MetadataTable;
use crate::schema::v1::{METADATA_HEADER, MetadataRecord};

pub fn write_metadata_table(path: &Path, table: &MetadataTable) -> Result<()> {
    let mut w = csv_writer_headerless(path)?;
    w.write_record(METADATA_HEADER)?;
    for record in &table.records {
        w.serialize(record).with_context(|| {
            format!(
                "failed to write metadata row {} {} {}",
                record.date_id, record.sample_id, record.replicate
            )
        })?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_metadata_table(path: &Path) -> Result<MetadataTable> {
    let mut reader = csv_reader(path)?;
    let header = reader
        .headers()
        .with_context(|| format!("{}: missing header", path.display()))?
        .clone();
    for column in ["Date_ID", "Sample_ID", "Replicate", "Circumference_true"] {
        if !header.iter().any(|h| h == column) {
            bail!("{}: missing column '{}'", path.display(), column);
        }
    }

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize().enumerate() {
        let record: MetadataRecord =
            row.with_context(|| format!("{}: malformed row {}", path.display(), idx + 2))?;
        records.push(record);
    }
    Ok(MetadataTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(replicate: &str) -> MetadataRecord {
        MetadataRecord {
            date: "09.04.21".to_string(),
            sample_id: "B".to_string(),
            placeholder: String::new(),
            sex: "F".to_string(),
            age: "12".to_string(),
            genotype: "WT".to_string(),
            replicate: replicate.to_string(),
            average_diameter: "0.5".to_string(),
            circumference: "1.57".to_string(),
            circumference_true: "1.6".to_string(),
            date_id: "210409".to_string(),
        }
    }

    #[test]
    fn empty_table_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.csv");
        write_metadata_table(&path, &MetadataTable::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Date,Sample_ID,.,Sex"));
        assert!(read_metadata_table(&path).unwrap().is_empty());
    }

    #[test]
    fn rows_survive_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.csv");
        let table = MetadataTable::new(vec![record("1"), record("2")]);
        write_metadata_table(&path, &table).unwrap();
        let back = read_metadata_table(&path).unwrap();
        assert_eq!(back, table);
        assert!(back.find("210409", "B", "2").is_some());
    }
}
