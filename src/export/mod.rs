//! CSV export of the ledger snapshot. Pure serialization, no storage or
//! network dependency.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::domain::ExpenseRecord;
use crate::errors::{Result, TrackerError};

const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Note"];

/// Writes the records as UTF-8 CSV in ledger order. Quoting follows
/// RFC 4180, so notes containing commas or quotes round-trip intact.
pub fn write_csv<W: io::Write>(records: &[ExpenseRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|err| TrackerError::Export(err.to_string()))?;
    for record in records {
        csv_writer
            .write_record([
                record.date.to_string(),
                record.category.label().to_string(),
                record.amount.to_string(),
                record.note.clone(),
            ])
            .map_err(|err| TrackerError::Export(err.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|err| TrackerError::Export(err.to_string()))?;
    Ok(())
}

/// Exports to a file path, creating parent directories as needed.
pub fn export_to_path(records: &[ExpenseRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn export_string(records: &[ExpenseRecord]) -> String {
        let mut buffer = Vec::new();
        write_csv(records, &mut buffer).expect("csv export");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn writes_header_and_rows_in_ledger_order() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let records = vec![
            ExpenseRecord::new(200.0, Category::FoodAndDrinks, "Lunch", date),
            ExpenseRecord::new(50.5, Category::Transport, "Metro", date),
        ];
        let output = export_string(&records);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Date,Category,Amount,Note"));
        assert_eq!(lines.next(), Some("2026-08-05,Food & Drinks,200,Lunch"));
        assert_eq!(lines.next(), Some("2026-08-05,Transport,50.5,Metro"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn delimiters_inside_notes_are_quoted_and_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let note = "books, pens and a \"gift\"";
        let records = vec![ExpenseRecord::new(
            120.0,
            Category::BooksAndStudy,
            note,
            date,
        )];
        let output = export_string(&records);

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let row = reader.records().next().expect("one row").expect("valid csv");
        assert_eq!(&row[3], note);
        assert_eq!(&row[1], "Books & Study");
    }

    #[test]
    fn empty_ledger_exports_just_the_header() {
        let output = export_string(&[]);
        assert_eq!(output.trim_end(), "Date,Category,Amount,Note");
    }
}
