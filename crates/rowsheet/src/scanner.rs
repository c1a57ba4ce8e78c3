//! Column scanner: how far a row extends.

use crate::codec::{join, SEPARATOR};
use crate::grid::SheetGrid;

/// Greatest 1-based column in `row` holding a value, `0` when the row is empty.
///
/// Only columns up to the sheet-wide highest column are examined.
pub fn last_populated_column<G: SheetGrid + ?Sized>(sheet: &G, row: u32) -> u32 {
    (1..=sheet.highest_column())
        .rev()
        .find(|&col| sheet.has_value(col, row))
        .unwrap_or(0)
}

/// Texts of columns `1..=last_populated_column`; gaps become `""`
pub fn row_texts<G: SheetGrid + ?Sized>(sheet: &G, row: u32) -> Vec<String> {
    (1..=last_populated_column(sheet, row))
        .map(|col| sheet.cell_text(col, row))
        .collect()
}

/// The row rendered back into a delimited record
pub fn row_record<G: SheetGrid + ?Sized>(sheet: &G, row: u32) -> String {
    join(&row_texts(sheet, row), SEPARATOR)
}
