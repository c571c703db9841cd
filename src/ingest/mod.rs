//! Row ingestion - hazard worksheet rows to normalized records
//!
//! Each worksheet row describes one cause -> event -> consequence triple
//! plus a severity code. Normalization here is a pure transform: rows with
//! missing fields or an explicit "not relevant" marker are skipped, labels
//! are case-folded, and only an unrecognized severity code is fatal.

pub mod workbook;

use crate::models::{Severity, UnknownSeverity};

/// Fixed 0-based column positions of the worksheet layout.
mod col {
    pub const CURRENT_GROUP: usize = 3;
    /// Concatenated with the following cell to form the event label.
    pub const CURRENT_EVENT: usize = 5;
    pub const RELEVANCE: usize = 7;
    pub const CAUSE_EVENT: usize = 8;
    pub const CAUSE_GROUP: usize = 10;
    pub const CONSEQUENCE_EVENT: usize = 12;
    pub const CONSEQUENCE_GROUP: usize = 14;
    pub const SEVERITY: usize = 18;
}

/// Sentinel marking rows the analysis team excluded by hand.
const NOT_RELEVANT: &str = "not relevant";

/// One scalar worksheet cell, already divorced from any spreadsheet library.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Text content, or `None` when the cell is empty or blank. Integral
    /// numbers render without a decimal tail so "3" and 3.0 dedupe to the
    /// same label.
    fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(s.clone())
                }
            }
            Cell::Number(n) => {
                if n.fract() == 0.0 {
                    Some(format!("{n:.0}"))
                } else {
                    Some(n.to_string())
                }
            }
            Cell::Bool(b) => Some(b.to_string()),
        }
    }
}

/// A (group, label) pair naming one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRef {
    pub group: String,
    pub label: String,
}

impl EventRef {
    fn new(group: &str, label: &str) -> Self {
        Self {
            group: group.trim().to_string(),
            label: label.trim().to_lowercase(),
        }
    }
}

/// One normalized worksheet record.
#[derive(Debug, Clone, PartialEq)]
pub struct HazopRecord {
    pub current: EventRef,
    pub cause: EventRef,
    pub consequence: EventRef,
    pub severity: Severity,
}

/// Normalize one raw row. `Ok(None)` is the skip signal for incomplete or
/// not-relevant rows; an unknown severity code aborts ingestion.
pub fn normalize_row(row: &[Cell]) -> Result<Option<HazopRecord>, UnknownSeverity> {
    if cell_text(row, col::RELEVANCE).as_deref() == Some(NOT_RELEVANT) {
        return Ok(None);
    }

    let Some(cur_group) = cell_text(row, col::CURRENT_GROUP) else {
        return Ok(None);
    };
    let Some(cur_event) = cell_text(row, col::CURRENT_EVENT) else {
        return Ok(None);
    };
    let Some(cause_group) = cell_text(row, col::CAUSE_GROUP) else {
        return Ok(None);
    };
    let Some(cause_event) = cell_text(row, col::CAUSE_EVENT) else {
        return Ok(None);
    };
    let Some(implic_group) = cell_text(row, col::CONSEQUENCE_GROUP) else {
        return Ok(None);
    };
    let Some(implic_event) = cell_text(row, col::CONSEQUENCE_EVENT) else {
        return Ok(None);
    };
    let Some(severity_code) = cell_text(row, col::SEVERITY) else {
        return Ok(None);
    };

    // The event label spans two cells; the second is optional.
    let cur_detail = cell_text(row, col::CURRENT_EVENT + 1).unwrap_or_default();
    let cur_label = format!("{cur_event} {cur_detail}");

    let severity = severity_code.parse::<Severity>()?;

    Ok(Some(HazopRecord {
        current: EventRef::new(&cur_group, &cur_label),
        cause: EventRef::new(&cause_group, &cause_event),
        consequence: EventRef::new(&implic_group, &implic_event),
        severity,
    }))
}

fn cell_text(row: &[Cell], index: usize) -> Option<String> {
    row.get(index).and_then(Cell::text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(usize, &str)]) -> Vec<Cell> {
        let mut out = vec![Cell::Empty; 19];
        for (index, text) in cells {
            out[*index] = Cell::Text((*text).to_string());
        }
        out
    }

    fn full_row() -> Vec<Cell> {
        row(&[
            (col::CURRENT_GROUP, " Pump "),
            (col::CURRENT_EVENT, "No"),
            (col::CURRENT_EVENT + 1, "Flow"),
            (col::CAUSE_EVENT, "Blocked "),
            (col::CAUSE_GROUP, "Valve"),
            (col::CONSEQUENCE_EVENT, "Overflow"),
            (col::CONSEQUENCE_GROUP, "Tank"),
            (col::SEVERITY, "D"),
        ])
    }

    #[test]
    fn test_normalizes_full_row() {
        let record = normalize_row(&full_row()).unwrap().unwrap();
        assert_eq!(record.current, EventRef::new("Pump", "no flow"));
        assert_eq!(record.current.group, "Pump");
        assert_eq!(record.current.label, "no flow");
        assert_eq!(record.cause.label, "blocked");
        assert_eq!(record.consequence.group, "Tank");
        assert_eq!(record.severity, Severity::D);
    }

    #[test]
    fn test_skips_incomplete_rows() {
        for index in [
            col::CURRENT_GROUP,
            col::CURRENT_EVENT,
            col::CAUSE_EVENT,
            col::CAUSE_GROUP,
            col::CONSEQUENCE_EVENT,
            col::CONSEQUENCE_GROUP,
            col::SEVERITY,
        ] {
            let mut cells = full_row();
            cells[index] = Cell::Empty;
            assert_eq!(normalize_row(&cells).unwrap(), None, "column {index}");
        }
        // Short rows behave like rows of empty cells.
        assert_eq!(normalize_row(&[]).unwrap(), None);
    }

    #[test]
    fn test_second_event_cell_optional() {
        let mut cells = full_row();
        cells[col::CURRENT_EVENT + 1] = Cell::Empty;
        let record = normalize_row(&cells).unwrap().unwrap();
        assert_eq!(record.current.label, "no");
    }

    #[test]
    fn test_skips_not_relevant_rows() {
        let mut cells = full_row();
        cells[col::RELEVANCE] = Cell::Text(NOT_RELEVANT.to_string());
        assert_eq!(normalize_row(&cells).unwrap(), None);
    }

    #[test]
    fn test_unknown_severity_is_fatal() {
        let mut cells = full_row();
        cells[col::SEVERITY] = Cell::Text("X".to_string());
        assert!(normalize_row(&cells).is_err());
    }

    #[test]
    fn test_numeric_cells_render_as_text() {
        let mut cells = full_row();
        cells[col::CAUSE_EVENT] = Cell::Number(3.0);
        let record = normalize_row(&cells).unwrap().unwrap();
        assert_eq!(record.cause.label, "3");
    }
}
