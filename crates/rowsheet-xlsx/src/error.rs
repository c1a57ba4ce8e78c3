use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Failures while reading or writing an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive failure: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The file opened as a zip archive but is not a spreadsheet package
    #[error("not an XLSX package: {0}")]
    InvalidFormat(String),

    /// A part referenced by the package is absent from the archive
    #[error("package part {0} is missing")]
    MissingPart(String),

    /// Malformed content inside a part
    #[error("{part}: {message}")]
    Parse {
        /// Archive path of the part being read
        part: String,
        message: String,
    },

    /// A cell points past the end of the shared strings table
    #[error("shared string {index} requested from a table of {len}")]
    SharedStringIndex { index: usize, len: usize },

    #[error(transparent)]
    Core(#[from] rowsheet_core::Error),
}

impl XlsxError {
    pub(crate) fn parse(part: &str, message: impl Into<String>) -> Self {
        XlsxError::Parse {
            part: part.to_string(),
            message: message.into(),
        }
    }
}
