//! Preview projection - first row as headers, the rest as body rows
//!
//! Pure functions of the grid. An empty grid renders to `None` (no table at
//! all), which is different from a table with headers and no body.

use std::fmt;

use crate::types::{CellValue, DecodedGrid};

/// Display-ready table derived from a [`DecodedGrid`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Body rows left out by [`PreviewTable::truncated`]
    pub hidden_rows: usize,
}

/// Project a grid into a preview table
pub fn render(grid: &DecodedGrid) -> Option<PreviewTable> {
    let header = grid.header()?;
    Some(PreviewTable {
        headers: render_row(header),
        body: grid.body().iter().map(|row| render_row(row)).collect(),
        hidden_rows: 0,
    })
}

fn render_row(row: &[CellValue]) -> Vec<String> {
    row.iter().map(CellValue::to_string).collect()
}

impl PreviewTable {
    /// Keep at most `max_rows` body rows
    pub fn truncated(mut self, max_rows: usize) -> Self {
        if self.body.len() > max_rows {
            self.hidden_rows += self.body.len() - max_rows;
            self.body.truncate(max_rows);
        }
        self
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; columns];
        for row in std::iter::once(&self.headers).chain(self.body.iter()) {
            for (col, cell) in row.iter().enumerate() {
                widths[col] = widths[col].max(display_width(cell));
            }
        }
        widths
    }
}

/// Aligned plain-text table: header line, rule, body lines
impl fmt::Display for PreviewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        write_row(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.body {
            write_row(f, row, &widths)?;
        }
        if self.hidden_rows > 0 {
            writeln!(f, "... {} more row(s)", self.hidden_rows)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[String], widths: &[usize]) -> fmt::Result {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    writeln!(f, "{}", cells.join(" | ").trim_end())
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

// Character count, not terminal cells; wide glyphs will misalign
fn display_width(s: &str) -> usize {
    s.chars().count()
}
