//! Printing sheet layout
//!
//! One header row for the whole sheet, found by the `№` marker in the
//! second column. Every data row carries an item number in the second
//! column and the customer name in the third; rows failing that test are
//! decoration (group captions, totals) and are skipped silently. The name
//! feeds the `_name_` placeholder of folder templates.

use super::{SheetDialect, SortContext, HEADER_MARKER};
use crate::sheet::{cell_int, cell_string, cell_text};
use calamine::Data;

/// Row-grouped order sheet, as used for print orders.
#[derive(Debug, Default)]
pub struct PrintingDialect {
    header_len: Option<usize>,
}

impl PrintingDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetDialect for PrintingDialect {
    fn resolve_row(&mut self, ctx: &mut SortContext, row_index: usize, row: &[Data]) {
        let Some(header_len) = self.header_len else {
            // Still looking for the header. Once found it stays active for
            // the rest of the sheet.
            if row.get(1).and_then(cell_text).as_deref() == Some(HEADER_MARKER) {
                self.header_len = Some(row.len());
            }
            return;
        };

        if row.get(1).and_then(cell_int).is_none() {
            return;
        }
        let Some(name) = row.get(2).and_then(cell_string) else {
            return;
        };
        let name = name.replace('\n', "");

        ctx.process_columns(row_index, row, header_len, Some(&name));
    }
}
