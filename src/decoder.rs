//! Spreadsheet decoding for preview - workbook bytes → first-sheet grid
//!
//! The container format is sniffed from the content (xlsx, xlsm, xlsb, xls,
//! ods), never from the file name. Input bytes are only borrowed.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use thiserror::Error;

use crate::types::{CellValue, DecodedGrid};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("not a readable spreadsheet: {0}")]
    Unreadable(String),

    #[error("first worksheet could not be read: {0}")]
    Worksheet(String),

    #[error("decoding stopped unexpectedly: {0}")]
    Aborted(String),
}

/// Anything that can turn file bytes into a preview grid
pub trait Decode: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedGrid, DecodeError>;
}

/// Reads the first worksheet with calamine
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl SpreadsheetDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decode for SpreadsheetDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedGrid, DecodeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| DecodeError::Unreadable(e.to_string()))?;

        match workbook.worksheet_range_at(0) {
            // A workbook without sheets has nothing to preview
            None => Ok(DecodedGrid::default()),
            Some(Ok(range)) => Ok(grid_from_range(&range)),
            Some(Err(e)) => Err(DecodeError::Worksheet(e.to_string())),
        }
    }
}

/// Convert a worksheet range to rows, dropping trailing blanks of each row
fn grid_from_range(range: &Range<Data>) -> DecodedGrid {
    if range.is_empty() {
        return DecodedGrid::default();
    }

    let rows = range
        .rows()
        .map(|row| {
            let used = row
                .iter()
                .rposition(|cell| !matches!(cell, Data::Empty))
                .map_or(0, |last| last + 1);
            row[..used].iter().map(convert_cell).collect()
        })
        .collect();

    DecodedGrid::new(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Dates stay as Excel serial numbers, like any other numeric cell
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
