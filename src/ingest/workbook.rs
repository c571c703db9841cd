//! Workbook adapter - reads worksheet rows out of an xlsx/xlsm file
//!
//! Pure I/O: opens the workbook, picks the sheet by name, skips the banner
//! rows above the data table, and yields rows of scalar [`Cell`] values.
//! No structural validation happens here.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use super::Cell;

/// Banner rows above the data table in the worksheet layout.
const HEADER_ROWS: usize = 4;

/// Read all data rows from the named sheet.
pub fn read_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("no sheet named {sheet:?} in {}", path.display()))?;

    // The used range may not start at A1; re-anchor so the fixed column
    // positions stay absolute.
    let Some((start_row, start_col)) = range.start() else {
        return Ok(Vec::new());
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);

    let mut rows = Vec::new();
    for (offset, row) in range.rows().enumerate() {
        if start_row + offset < HEADER_ROWS {
            continue;
        }
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    debug!(rows = rows.len(), sheet, "read worksheet");
    Ok(rows)
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
