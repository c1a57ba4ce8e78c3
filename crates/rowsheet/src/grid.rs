//! The read-only view of a sheet the row logic works against.
//!
//! Coordinates here are 1-based (column, row), the facade's convention; the
//! workbook model underneath is 0-based (row, col).

use rowsheet_core::Worksheet;

/// A sheet as seen by the row locator and column scanner
pub trait SheetGrid {
    /// 1-based last populated row; `1` for an empty sheet
    fn highest_row(&self) -> u32;

    /// 1-based last populated column across all rows; `1` for an empty sheet
    fn highest_column(&self) -> u32;

    /// Whether the cell holds a value (an empty string counts)
    fn has_value(&self, col: u32, row: u32) -> bool;

    /// Display text of the cell, `""` when it holds nothing
    fn cell_text(&self, col: u32, row: u32) -> String;
}

/// Convert 1-based facade coordinates to 0-based model indices
fn model_index(col: u32, row: u32) -> Option<(u32, u16)> {
    let row = row.checked_sub(1)?;
    let col = u16::try_from(col.checked_sub(1)?).ok()?;
    Some((row, col))
}

impl SheetGrid for Worksheet {
    fn highest_row(&self) -> u32 {
        Worksheet::highest_row(self)
    }

    fn highest_column(&self) -> u32 {
        Worksheet::highest_column(self)
    }

    fn has_value(&self, col: u32, row: u32) -> bool {
        model_index(col, row)
            .and_then(|(r, c)| self.value_at(r, c))
            .is_some_and(|value| value.has_value())
    }

    fn cell_text(&self, col: u32, row: u32) -> String {
        model_index(col, row)
            .and_then(|(r, c)| self.value_at(r, c))
            .map(|value| value.to_text())
            .unwrap_or_default()
    }
}
