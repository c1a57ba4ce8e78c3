use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejections from the workbook model
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid cell reference '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// A 0-based position outside the sheet grid
    #[error("cell position (row {row}, column {col}) is outside the sheet")]
    PositionOutOfBounds { row: u32, col: u32 },

    #[error("invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// Another sheet already uses this name, ignoring case
    #[error("a sheet named '{0}' already exists")]
    DuplicateSheetName(String),
}
