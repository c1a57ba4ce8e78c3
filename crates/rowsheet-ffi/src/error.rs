//! FFI status codes

use std::os::raw::{c_char, c_int};

use rowsheet::ErrorKind;

// Success
pub const ROWSHEET_OK: c_int = 0;

// Call errors
pub const ROWSHEET_ERR_NULL_PTR: c_int = -1;
pub const ROWSHEET_ERR_INTERNAL: c_int = -2;
pub const ROWSHEET_ERR_INVALID_ARGUMENT: c_int = -3;

// Document errors
pub const ROWSHEET_ERR_DOCUMENT_LOAD: c_int = -10;
pub const ROWSHEET_ERR_ENGINE: c_int = -11;

// Lookup errors
pub const ROWSHEET_ERR_SHEET_NOT_FOUND: c_int = -20;
pub const ROWSHEET_ERR_ROW_OUT_OF_RANGE: c_int = -21;

// Output errors
pub const ROWSHEET_ERR_BUFFER_TOO_SMALL: c_int = -30;

/// Status code for an error category
pub(crate) fn status_code(kind: ErrorKind) -> c_int {
    match kind {
        ErrorKind::InvalidArgument => ROWSHEET_ERR_INVALID_ARGUMENT,
        ErrorKind::DocumentLoadFailure => ROWSHEET_ERR_DOCUMENT_LOAD,
        ErrorKind::SheetNotFound => ROWSHEET_ERR_SHEET_NOT_FOUND,
        ErrorKind::RowOutOfRange => ROWSHEET_ERR_ROW_OUT_OF_RANGE,
        ErrorKind::BufferTooSmall => ROWSHEET_ERR_BUFFER_TOO_SMALL,
        ErrorKind::EngineFailure => ROWSHEET_ERR_ENGINE,
    }
}

/// Get error message for a status code
#[no_mangle]
pub extern "C" fn rowsheet_error_message(code: c_int) -> *const c_char {
    let msg: &'static [u8] = match code {
        ROWSHEET_OK => b"Success\0",
        ROWSHEET_ERR_NULL_PTR => b"Null pointer argument\0",
        ROWSHEET_ERR_INTERNAL => b"Internal error\0",
        ROWSHEET_ERR_INVALID_ARGUMENT => b"Invalid argument\0",
        ROWSHEET_ERR_DOCUMENT_LOAD => b"Document could not be loaded\0",
        ROWSHEET_ERR_ENGINE => b"Document could not be updated\0",
        ROWSHEET_ERR_SHEET_NOT_FOUND => b"Sheet not found\0",
        ROWSHEET_ERR_ROW_OUT_OF_RANGE => b"Row out of range\0",
        ROWSHEET_ERR_BUFFER_TOO_SMALL => b"Buffer too small\0",
        _ => b"Unknown error\0",
    };

    msg.as_ptr() as *const c_char
}
