//! Error types for the row facade

use std::fmt;
use std::path::PathBuf;

use rowsheet_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a facade operation can fail with
#[derive(Debug, Error)]
pub enum Error {
    /// Null, non-UTF-8, empty or otherwise unusable input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document is missing or could not be parsed
    #[error("failed to load document '{}'", path.display())]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The document could not be serialized or written back
    #[error("failed to save document '{}'", path.display())]
    DocumentSave {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// No sheet carries exactly this name
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    /// Requested row is outside `1..=rows`
    #[error("row {row} out of range (sheet has {rows} rows)")]
    RowOutOfRange { row: i64, rows: u32 },

    /// The caller's buffer cannot hold the row plus its terminator
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// The workbook model rejected a change (sheet name, cell bounds)
    #[error(transparent)]
    Core(#[from] rowsheet_core::Error),
}

impl Error {
    /// Flat category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::DocumentLoad { .. } => ErrorKind::DocumentLoadFailure,
            Error::SheetNotFound(_) => ErrorKind::SheetNotFound,
            Error::RowOutOfRange { .. } => ErrorKind::RowOutOfRange,
            Error::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            Error::DocumentSave { .. } | Error::Core(_) => ErrorKind::EngineFailure,
        }
    }

    /// The message followed by every source in the chain, `: `-separated
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        out
    }
}

/// Error categories, stable across releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    DocumentLoadFailure,
    SheetNotFound,
    RowOutOfRange,
    BufferTooSmall,
    EngineFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::DocumentLoadFailure => "DocumentLoadFailure",
            ErrorKind::SheetNotFound => "SheetNotFound",
            ErrorKind::RowOutOfRange => "RowOutOfRange",
            ErrorKind::BufferTooSmall => "BufferTooSmall",
            ErrorKind::EngineFailure => "EngineFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
