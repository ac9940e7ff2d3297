//! Album sheet layout
//!
//! Flat layout: data follows each header row without item numbers or
//! customer names, and sections are separated by blank rows. A blank row
//! (every cell across the header span falsy) ends the current section and
//! the next `№` header row re-arms distribution. Folder templates apply
//! without `_name_` substitution.

use super::{SheetDialect, SortContext, HEADER_MARKER};
use crate::sheet::{cell_is_truthy, cell_text};
use calamine::Data;

/// Flat order sheet, as used for album orders.
#[derive(Debug, Default)]
pub struct AlbumDialect {
    header_len: Option<usize>,
}

impl AlbumDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetDialect for AlbumDialect {
    fn resolve_row(&mut self, ctx: &mut SortContext, row_index: usize, row: &[Data]) {
        if row.get(1).and_then(cell_text).as_deref() == Some(HEADER_MARKER) {
            self.header_len = Some(row.len());
            return;
        }

        let Some(header_len) = self.header_len else {
            return;
        };

        let span = header_len.min(row.len());
        if row[..span].iter().all(|cell| !cell_is_truthy(cell)) {
            // End of the section; wait for the next header.
            self.header_len = None;
            return;
        }

        ctx.process_columns(row_index, row, header_len, None);
    }
}
