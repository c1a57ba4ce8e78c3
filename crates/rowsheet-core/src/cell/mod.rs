//! Cell values, references and the sparse store behind a worksheet

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub(crate) use storage::CellStorage;
pub use value::{CellError, CellValue};
