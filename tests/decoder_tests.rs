//! Spreadsheet decoding and preview tests
//!
//! Workbooks are generated in memory with rust_xlsxwriter.

use pretty_assertions::assert_eq;
use release_radar::decoder::{Decode, DecodeError, SpreadsheetDecoder};
use release_radar::preview::render;
use release_radar::types::{CellValue, DecodedGrid};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

fn xlsx_with_rows(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *cell).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Excel 97-2003 workbook: "Calendar" (3 rows) followed by "Notes"
fn legacy_calendar() -> Vec<u8> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/test-data/release-calendar.xls");
    std::fs::read(path).unwrap()
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════
// DECODER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_decode_release_calendar() {
    let bytes = xlsx_with_rows(&[
        &["Name", "Date"],
        &["Release A", "2024-01-10"],
        &["Release B", "2024-02-01"],
    ]);

    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();

    assert_eq!(
        grid,
        DecodedGrid::new(vec![
            vec![text("Name"), text("Date")],
            vec![text("Release A"), text("2024-01-10")],
            vec![text("Release B"), text("2024-02-01")],
        ])
    );
}

#[test]
fn test_decode_empty_sheet() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();

    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();
    assert!(grid.is_empty());
    assert_eq!(render(&grid), None);
}

#[test]
fn test_decode_reads_first_sheet_only() {
    let mut workbook = Workbook::new();
    let calendar = workbook.add_worksheet();
    calendar.set_name("Calendar").unwrap();
    calendar.write_string(0, 0, "Name").unwrap();
    calendar.write_string(1, 0, "Release A").unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "ignore me").unwrap();

    let bytes = workbook.save_to_buffer().unwrap();
    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();

    assert_eq!(
        grid,
        DecodedGrid::new(vec![vec![text("Name")], vec![text("Release A")]])
    );
}

#[test]
fn test_decode_numbers_and_blanks() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Week").unwrap();
    sheet.write_string(0, 2, "Owner").unwrap();
    sheet.write_string(1, 0, "Release A").unwrap();
    sheet.write_number(1, 1, 2.0).unwrap();
    sheet.write_string(1, 2, "Payments").unwrap();
    sheet.write_string(2, 0, "Release B").unwrap();
    sheet.write_string(2, 2, "Cards").unwrap();
    sheet.write_string(3, 0, "Release C").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();

    assert_eq!(grid.row_count(), 4);
    assert_eq!(
        grid.rows()[1],
        vec![text("Release A"), CellValue::Number(2.0), text("Payments")]
    );
    assert_eq!(
        grid.rows()[2],
        vec![text("Release B"), CellValue::Empty, text("Cards")]
    );
    // Trailing blanks are not carried
    assert_eq!(grid.rows()[3], vec![text("Release C")]);
}

#[test]
fn test_decode_date_cells_as_serial_numbers() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let date = ExcelDateTime::from_ymd(2024, 1, 10).unwrap();
    sheet.write_string(0, 0, "Date").unwrap();
    sheet
        .write_datetime_with_format(1, 0, &date, &date_format)
        .unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();
    assert_eq!(grid.rows()[1], vec![CellValue::Number(45301.0)]);
}

#[test]
fn test_decode_legacy_xls_workbook() {
    let grid = SpreadsheetDecoder::new().decode(&legacy_calendar()).unwrap();

    assert_eq!(
        grid,
        DecodedGrid::new(vec![
            vec![text("Name"), text("Date"), text("Week")],
            vec![text("Release A"), text("2024-01-10"), CellValue::Number(2.0)],
            vec![text("Release B"), text("2024-02-01")],
        ])
    );
}

#[test]
fn test_preview_of_legacy_xls_workbook() {
    let grid = SpreadsheetDecoder::new().decode(&legacy_calendar()).unwrap();

    let table = render(&grid).unwrap();
    assert_eq!(table.headers, vec!["Name", "Date", "Week"]);
    assert_eq!(table.body[0], vec!["Release A", "2024-01-10", "2"]);
    assert_eq!(table.body[1], vec!["Release B", "2024-02-01"]);
}

#[test]
fn test_decode_csv_bytes_fails() {
    let result = SpreadsheetDecoder::new().decode(b"Name,Date\nRelease A,2024-01-10\n");
    assert!(matches!(result, Err(DecodeError::Unreadable(_))));
}

#[test]
fn test_decode_truncated_workbook_fails() {
    let bytes = xlsx_with_rows(&[&["Name"]]);
    let result = SpreadsheetDecoder::new().decode(&bytes[..bytes.len() / 2]);
    assert!(result.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// PREVIEW TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_preview_of_release_calendar() {
    let bytes = xlsx_with_rows(&[
        &["Name", "Date"],
        &["Release A", "2024-01-10"],
        &["Release B", "2024-02-01"],
    ]);
    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();

    let table = render(&grid).unwrap();
    assert_eq!(table.headers, vec!["Name", "Date"]);
    assert_eq!(table.body.len(), 2);
    assert_eq!(table.body[0], vec!["Release A", "2024-01-10"]);
    assert_eq!(table.body[1], vec!["Release B", "2024-02-01"]);
}

#[test]
fn test_preview_header_only_sheet_is_a_table() {
    let bytes = xlsx_with_rows(&[&["Name", "Date"]]);
    let grid = SpreadsheetDecoder::new().decode(&bytes).unwrap();

    let table = render(&grid).unwrap();
    assert_eq!(table.headers, vec!["Name", "Date"]);
    assert!(table.body.is_empty());
}
