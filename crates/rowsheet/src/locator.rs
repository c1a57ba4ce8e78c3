//! Row locator: where the next record goes, and whether a requested row exists.
//!
//! An empty sheet still reports a highest row of `1`, so the first row is
//! "used" only when `A1` actually holds a value. A sheet whose only data sits
//! elsewhere in row 1 (a header in `B1`) therefore counts as empty until `A1`
//! is filled.

use crate::error::{Error, Result};
use crate::grid::SheetGrid;

/// True when the sheet's extent says one row but that row has no data in `A1`
pub fn is_degenerate_empty<G: SheetGrid + ?Sized>(sheet: &G) -> bool {
    sheet.highest_row() == 1 && !sheet.has_value(1, 1)
}

/// Number of data rows, `0` for a degenerate empty sheet
pub fn row_count<G: SheetGrid + ?Sized>(sheet: &G) -> u32 {
    if is_degenerate_empty(sheet) {
        0
    } else {
        sheet.highest_row()
    }
}

/// 1-based row the next appended record occupies
pub fn next_write_row<G: SheetGrid + ?Sized>(sheet: &G) -> u32 {
    if is_degenerate_empty(sheet) {
        1
    } else {
        sheet.highest_row().saturating_add(1)
    }
}

/// Check a caller-supplied row number, returning it as a 1-based row
pub fn validate_read_row<G: SheetGrid + ?Sized>(sheet: &G, requested: i64) -> Result<u32> {
    let rows = row_count(sheet);
    match u32::try_from(requested) {
        Ok(row) if row >= 1 && row <= rows => Ok(row),
        _ => Err(Error::RowOutOfRange {
            row: requested,
            rows,
        }),
    }
}
