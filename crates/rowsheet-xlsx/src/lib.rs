//! # rowsheet-xlsx
//!
//! XLSX (Office Open XML) reader and writer for rowsheet.
//!
//! Only cell values travel through a read/write cycle: strings (shared or
//! inline), numbers, booleans, errors and formulas with their cached result.
//! Styles, comments, drawings and every other part are dropped on read and
//! never written.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
