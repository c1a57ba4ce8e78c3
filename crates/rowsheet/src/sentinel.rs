//! Legacy sentinel contract over the typed operations.
//!
//! Failures never surface: they are written to the diagnostic log and
//! turned into `false`, `0` or an empty string.

use std::path::Path;

use crate::error::Error;
use crate::store::RowStore;

impl RowStore {
    /// [`append_record`](RowStore::append_record), `false` on any failure
    pub fn write_record(&self, path: &Path, sheet: &str, record: &str) -> bool {
        match self.append_record(path, sheet, record) {
            Ok(_) => true,
            Err(e) => {
                self.report("WriteToXlsx", path, sheet, &e);
                false
            }
        }
    }

    /// [`row_count`](RowStore::row_count), `0` on any failure
    pub fn read_row_count(&self, path: &Path, sheet: &str) -> u32 {
        self.row_count(path, sheet).unwrap_or_else(|e| {
            self.report("ReadRowCount", path, sheet, &e);
            0
        })
    }

    /// [`read_row_into`](RowStore::read_row_into); on any failure `out`
    /// receives an empty string (when it has room for the terminator)
    pub fn read_row_to_buffer(&self, path: &Path, sheet: &str, row: i64, out: &mut [u8]) {
        if let Err(e) = self.read_row_into(path, sheet, row, out) {
            self.report("ReadRow", path, sheet, &e);
            if let Some(first) = out.first_mut() {
                *first = 0;
            }
        }
    }

    /// Record a swallowed failure in the diagnostic log
    pub fn report(&self, operation: &str, path: &Path, sheet: &str, error: &Error) {
        self.diagnostics().record(&format!(
            "{} [{}] ({}, '{}'): {}",
            operation,
            error.kind(),
            path.display(),
            sheet,
            error.chain()
        ));
    }
}
