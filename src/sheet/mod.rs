//! Workbook loading and cell value helpers
//!
//! The sorting components consume plain row/cell sequences so they never
//! touch the spreadsheet format directly; this module is the only place
//! that talks to calamine. A loaded workbook is reduced to two row lists:
//! the settings sheet and the first (data) worksheet.

use crate::core::error::{Result, SortError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Rows extracted from the two worksheets a sort run needs.
#[derive(Debug)]
pub struct WorkbookData {
    /// Rows of the settings sheet
    pub settings_rows: Vec<Vec<Data>>,
    /// Rows of the first worksheet (header + data rows)
    pub data_rows: Vec<Vec<Data>>,
}

/// Load a workbook and pull out the settings sheet and the data sheet.
///
/// A missing settings sheet is a fatal configuration error for the run.
pub fn load_workbook(path: &Path, settings_sheet: &str) -> Result<WorkbookData> {
    let mut workbook = open_workbook_auto(path)?;

    if !workbook.sheet_names().iter().any(|s| s == settings_sheet) {
        return Err(SortError::SettingsSheetMissing(settings_sheet.to_string()));
    }
    let settings_range = workbook.worksheet_range(settings_sheet)?;
    let data_range = workbook
        .worksheet_range_at(0)
        .ok_or(SortError::NoDataSheet)??;

    Ok(WorkbookData {
        settings_rows: collect_rows(&settings_range),
        data_rows: collect_rows(&data_range),
    })
}

fn collect_rows(range: &Range<Data>) -> Vec<Vec<Data>> {
    range.rows().map(|row| row.to_vec()).collect()
}

/// Render a cell as text, or `None` for empty/error cells.
///
/// Integral floats render without the trailing `.0` — spreadsheet libraries
/// surface whole-number cells as floats, but the sheets mean `1001`, not
/// `1001.0`.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Some(format!("{:.0}", f))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(serial) => Some(serial.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Cell as an integer, if it holds one (numeric cell or numeric text).
pub fn cell_int(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Cell as a borrowed string, only for genuine text cells.
pub fn cell_string(cell: &Data) -> Option<&str> {
    match cell {
        Data::String(s) => Some(s),
        _ => None,
    }
}

/// Whether a cell counts as "holding something" for blank-row detection.
///
/// Empty cells, empty strings and numeric zeros are all falsy.
pub fn cell_is_truthy(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => false,
        Data::String(s) => !s.is_empty(),
        Data::Float(f) => *f != 0.0,
        Data::Int(i) => *i != 0,
        Data::Bool(b) => *b,
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => true,
    }
}
