use std::collections::BTreeMap;

use super::CellValue;

type Row = BTreeMap<u16, CellValue>;

/// Sparse cells keyed by row, then column.
///
/// Rows with no cells are dropped, so the first and last keys are always the
/// populated extent. Iteration is row-major.
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, Row>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row)?.get(&col)
    }

    /// Store `value`; [`CellValue::Empty`] clears the cell instead
    pub fn set(&mut self, row: u32, col: u16, value: CellValue) {
        if value.is_empty() {
            self.remove(row, col);
            return;
        }
        self.rows.entry(row).or_default().insert(col, value);
    }

    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellValue> {
        let cells = self.rows.get_mut(&row)?;
        let removed = cells.remove(&col);
        if cells.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(top, left, bottom, right)` of the stored cells
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let (&top, _) = self.rows.first_key_value()?;
        let (&bottom, _) = self.rows.last_key_value()?;
        let left = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let right = self.rows.values().filter_map(|r| r.keys().next_back()).max()?;
        Some((top, *left, bottom, *right))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cells)| cells.iter().map(move |(&col, value)| (row, col, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_empty_clears() {
        let mut storage = CellStorage::new();
        storage.set(2, 3, CellValue::from("x"));
        assert_eq!(storage.get(2, 3), Some(&CellValue::from("x")));
        assert_eq!(storage.cell_count(), 1);

        storage.set(2, 3, CellValue::Empty);
        assert!(storage.get(2, 3).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_used_bounds() {
        let mut storage = CellStorage::new();
        assert_eq!(storage.used_bounds(), None);

        storage.set(4, 1, CellValue::from(1.0));
        storage.set(1, 6, CellValue::from(2.0));
        storage.set(9, 0, CellValue::string(""));
        assert_eq!(storage.used_bounds(), Some((1, 0, 9, 6)));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut storage = CellStorage::new();
        storage.set(1, 0, CellValue::from("c"));
        storage.set(0, 1, CellValue::from("b"));
        storage.set(0, 0, CellValue::from("a"));

        let order: Vec<(u32, u16)> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
