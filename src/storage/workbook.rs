//! Conversion between record sequences and spreadsheet bytes. Pure codec,
//! no file I/O.

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

use crate::domain::Record;

/// Name of the single sheet written on save.
pub const SHEET_NAME: &str = "FinancialData";

pub const DATE_COLUMN: &str = "Date";
pub const BANK_BALANCE_COLUMN: &str = "BankBalance";
pub const CLEARED_COLUMN: &str = "Cleared";

/// Serialize records into a single-sheet workbook: header row first, one
/// record per subsequent row. All cells are written as strings; an absent
/// cleared amount leaves its cell blank.
pub fn encode(records: &[Record]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    sheet.write_string(0, 0, DATE_COLUMN)?;
    sheet.write_string(0, 1, BANK_BALANCE_COLUMN)?;
    sheet.write_string(0, 2, CLEARED_COLUMN)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &record.date)?;
        sheet.write_string(row, 1, &record.bank_balance)?;
        if let Some(cleared) = &record.cleared {
            sheet.write_string(row, 2, cleared)?;
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

/// Parse workbook bytes back into records. The first sheet is used
/// unconditionally - there is no sheet-name matching - and columns are
/// located by the header row. Unknown columns are ignored, missing columns
/// yield empty values, and no row-level validation is applied.
pub fn decode(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("Failed to open workbook")?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names.first().context("Workbook has no sheets")?;
    let range = workbook
        .worksheet_range(first_sheet)
        .with_context(|| format!("Failed to read sheet '{}'", first_sheet))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let mut date_col = None;
    let mut balance_col = None;
    let mut cleared_col = None;
    for (idx, cell) in header.iter().enumerate() {
        if let Data::String(name) = cell {
            match name.as_str() {
                DATE_COLUMN => date_col = Some(idx),
                BANK_BALANCE_COLUMN => balance_col = Some(idx),
                CLEARED_COLUMN => cleared_col = Some(idx),
                _ => {}
            }
        }
    }

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let cleared = cell_text(row, cleared_col);
        records.push(Record {
            date: cell_text(row, date_col),
            bank_balance: cell_text(row, balance_col),
            cleared: if cleared.is_empty() { None } else { Some(cleared) },
        });
    }

    Ok(records)
}

fn cell_text(row: &[Data], col: Option<usize>) -> String {
    col.and_then(|idx| row.get(idx))
        .map(cell_to_string)
        .unwrap_or_default()
}

/// Render a cell the way it would read in the entry form. Integral floats
/// drop the trailing `.0` so a re-saved numeric cell round-trips as "500",
/// not "500.0".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("2024-01-01", "500").with_cleared("120.50"),
            Record::new("2024-01-02", "480.25"),
            Record::new("2024-01-03", "475").with_cleared("true"),
        ]
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let records = sample_records();
        let bytes = encode(&records).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_empty_ledger_round_trips_to_no_records() {
        let bytes = encode(&[]).unwrap();
        assert_eq!(decode(&bytes).unwrap(), Vec::<Record>::new());
    }

    #[test]
    fn test_decode_selects_first_sheet() {
        // Even when a later sheet carries the canonical name, the first
        // sheet wins.
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Scratch").unwrap();
        first.write_string(0, 0, DATE_COLUMN).unwrap();
        first.write_string(0, 1, BANK_BALANCE_COLUMN).unwrap();
        first.write_string(1, 0, "2024-02-01").unwrap();
        first.write_string(1, 1, "42").unwrap();

        let second = workbook.add_worksheet();
        second.set_name(SHEET_NAME).unwrap();
        second.write_string(0, 0, DATE_COLUMN).unwrap();
        second.write_string(0, 1, BANK_BALANCE_COLUMN).unwrap();
        second.write_string(1, 0, "1999-01-01").unwrap();
        second.write_string(1, 1, "0").unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded, vec![Record::new("2024-02-01", "42")]);
    }

    #[test]
    fn test_decode_without_cleared_column() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, DATE_COLUMN).unwrap();
        sheet.write_string(0, 1, BANK_BALANCE_COLUMN).unwrap();
        sheet.write_string(1, 0, "2024-01-01").unwrap();
        sheet.write_string(1, 1, "500").unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded, vec![Record::new("2024-01-01", "500")]);
    }

    #[test]
    fn test_decode_coerces_numeric_and_bool_cells() {
        // A file touched by a spreadsheet application may hold typed cells.
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, DATE_COLUMN).unwrap();
        sheet.write_string(0, 1, BANK_BALANCE_COLUMN).unwrap();
        sheet.write_string(0, 2, CLEARED_COLUMN).unwrap();
        sheet.write_string(1, 0, "2024-01-01").unwrap();
        sheet.write_number(1, 1, 500.0).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].bank_balance, "500");
        assert_eq!(decoded[0].cleared, Some("true".to_string()));
    }

    #[test]
    fn test_decode_skips_blank_rows() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, DATE_COLUMN).unwrap();
        sheet.write_string(0, 1, BANK_BALANCE_COLUMN).unwrap();
        sheet.write_string(1, 0, "2024-01-01").unwrap();
        sheet.write_string(1, 1, "500").unwrap();
        // Row 2 left blank on purpose.
        sheet.write_string(3, 0, "2024-01-03").unwrap();
        sheet.write_string(3, 1, "475").unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(
            decoded,
            vec![
                Record::new("2024-01-01", "500"),
                Record::new("2024-01-03", "475"),
            ]
        );
    }

    #[test]
    fn test_decode_ignores_unknown_columns() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Notes").unwrap();
        sheet.write_string(0, 1, DATE_COLUMN).unwrap();
        sheet.write_string(0, 2, BANK_BALANCE_COLUMN).unwrap();
        sheet.write_string(1, 0, "irrelevant").unwrap();
        sheet.write_string(1, 1, "2024-01-01").unwrap();
        sheet.write_string(1, 2, "500").unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded, vec![Record::new("2024-01-01", "500")]);
    }

    #[test]
    fn test_decode_rejects_garbage_bytes() {
        assert!(decode(b"not a workbook").is_err());
    }
}
