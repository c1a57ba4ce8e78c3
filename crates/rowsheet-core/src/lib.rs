//! # rowsheet-core
//!
//! In-memory workbook model used by the rowsheet facade.
//!
//! The model only carries what a row-oriented reader/appender needs:
//! - [`CellValue`] - the value stored in a cell
//! - [`CellAddress`] and [`CellRange`] - cell addressing (`A1`, `A1:C3`)
//! - [`Workbook`], [`Worksheet`] - named sheets of sparse cells
//!
//! ## Example
//!
//! ```rust
//! use rowsheet_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::empty();
//! let idx = workbook.add_worksheet_with_name("Trades").unwrap();
//! let sheet = workbook.worksheet_mut(idx).unwrap();
//!
//! // Row/column indices are 0-based
//! sheet.set_cell_value_at(0, 0, "EURUSD").unwrap();
//! sheet.set_cell_value_at(0, 1, 1.0842).unwrap();
//!
//! // Extents are reported as 1-based row/column numbers
//! assert_eq!(sheet.highest_row(), 1);
//! assert_eq!(sheet.highest_column(), 2);
//! assert_eq!(sheet.get_value_at(0, 1), CellValue::Number(1.0842));
//! ```

pub mod cell;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Rows per sheet in the XLSX grid
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per sheet, `A` through `XFD`
pub const MAX_COLS: u16 = 16_384;

/// Sheet names longer than this, in characters, are rejected
pub const MAX_SHEET_NAME_LEN: usize = 31;
