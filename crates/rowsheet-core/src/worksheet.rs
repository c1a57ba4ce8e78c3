use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A named grid of sparse cells
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value at 0-based `(row, col)`, if any
    pub fn value_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(row, col)
    }

    /// Like [`value_at`](Self::value_at), with unset cells read as [`CellValue::Empty`]
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.value_at(row, col).cloned().unwrap_or_default()
    }

    pub fn get_value(&self, reference: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(reference)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, reference: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(reference)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        validate_cell_position(row, u32::from(col))?;
        self.cells.set(row, col, value.into());
        Ok(())
    }

    pub fn clear_cell_at(&mut self, row: u32, col: u16) -> Option<CellValue> {
        self.cells.remove(row, col)
    }

    /// Smallest rectangle holding every stored cell
    pub fn used_range(&self) -> Option<CellRange> {
        let (top, left, bottom, right) = self.cells.used_bounds()?;
        Some(CellRange::from_indices(top, left, bottom, right))
    }

    /// 1-based number of the last row holding a value.
    ///
    /// An empty sheet reports `1`, the `A1` dimension a blank sheet carries
    /// in XLSX, so callers must look at `A1` to tell "empty" from "one row".
    pub fn highest_row(&self) -> u32 {
        self.used_range().map_or(1, |range| range.end.row + 1)
    }

    /// 1-based number of the last column holding a value, across all rows.
    /// `1` when the sheet is empty.
    pub fn highest_column(&self) -> u32 {
        self.used_range().map_or(1, |range| u32::from(range.end.col) + 1)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stored cells as `(row, col, value)`, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter()
    }
}

/// Check a 0-based position against the sheet limits.
///
/// `col` is wide so a field count can be checked before it is narrowed.
pub fn validate_cell_position(row: u32, col: u32) -> Result<()> {
    if row >= MAX_ROWS || col >= u32::from(MAX_COLS) {
        return Err(Error::PositionOutOfBounds { row, col });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_by_reference() {
        let mut ws = Worksheet::new("Quotes");
        ws.set_cell_value("A1", "EURUSD").unwrap();
        ws.set_cell_value("B1", 1.0842).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.name(), "Quotes");
        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("EURUSD"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(1.0842));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert!(ws.get_value("D1").unwrap().is_empty());
        assert!(ws.value_at(0, 3).is_none());
        assert!(ws.get_value("1A").is_err());
    }

    #[test]
    fn test_empty_sheet_extent_is_one() {
        let ws = Worksheet::new("Blank");
        assert!(ws.is_empty());
        assert!(ws.used_range().is_none());
        assert_eq!((ws.highest_row(), ws.highest_column()), (1, 1));
    }

    #[test]
    fn test_extent_follows_furthest_cells() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value_at(5, 3, "a").unwrap();
        ws.set_cell_value_at(10, 1, "b").unwrap();

        assert_eq!(ws.highest_row(), 11);
        assert_eq!(ws.highest_column(), 4);
        assert_eq!(ws.used_range().unwrap().to_string(), "B6:D11");
    }

    #[test]
    fn test_empty_string_counts_toward_extent() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value_at(0, 0, "x").unwrap();
        ws.set_cell_value_at(0, 2, "").unwrap();
        assert_eq!(ws.highest_column(), 3);
        assert_eq!(ws.cell_count(), 2);
    }

    #[test]
    fn test_clearing_shrinks_extent() {
        let mut ws = Worksheet::new("S");
        ws.set_cell_value_at(0, 0, "a").unwrap();
        ws.set_cell_value_at(3, 0, "b").unwrap();
        assert_eq!(ws.highest_row(), 4);

        assert_eq!(ws.clear_cell_at(3, 0), Some(CellValue::string("b")));
        assert_eq!(ws.highest_row(), 1);
    }

    #[test]
    fn test_position_limits() {
        let mut ws = Worksheet::new("S");
        assert!(ws.set_cell_value_at(MAX_ROWS, 0, "x").is_err());
        assert!(ws.set_cell_value_at(MAX_ROWS - 1, MAX_COLS - 1, "x").is_ok());
        assert!(matches!(
            validate_cell_position(0, u32::from(MAX_COLS)),
            Err(Error::PositionOutOfBounds { row: 0, col: 16384 })
        ));
    }
}
