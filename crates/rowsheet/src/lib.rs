//! # rowsheet
//!
//! Append delimited text records to spreadsheet documents as rows, and read
//! them back, one call per operation.
//!
//! A record such as `"EURUSD,1.0842,buy"` is split on `,` and written across
//! one row, starting in column A of the first free row. The first free row is
//! derived from the sheet's extent each time, so repeated calls append in
//! call order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use rowsheet::{RowStore, StoreOptions};
//!
//! let store = RowStore::new(StoreOptions::default().with_log_path("trades.log"));
//! let book = Path::new("trades.xlsx");
//!
//! let row = store.append_record(book, "Fills", "EURUSD,1.0842,buy")?;
//! assert_eq!(store.read_row(book, "Fills", row as i64)?, "EURUSD,1.0842,buy");
//!
//! // Sentinel forms: failures are logged and collapse to false / 0 / ""
//! assert!(store.write_record(book, "Fills", "GBPUSD,1.2711,sell"));
//! assert_eq!(store.read_row_count(book, "Missing"), 0);
//! # Ok::<(), rowsheet::Error>(())
//! ```

pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod locator;
pub mod options;
pub mod resolver;
pub mod scanner;
mod sentinel;
pub mod store;

pub use diagnostics::DiagnosticLog;
pub use error::{Error, ErrorKind, Result};
pub use grid::SheetGrid;
pub use options::StoreOptions;
pub use store::RowStore;
