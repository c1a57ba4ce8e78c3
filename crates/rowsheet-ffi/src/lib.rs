//! # rowsheet-ffi
//!
//! C ABI for rowsheet.
//!
//! Two families of exports share one configuration:
//!
//! - `WriteToXlsx`, `ReadRowCount`, `ReadRow` and `SetLogPath` keep the
//!   sentinel contract for hosts that only understand `bool`/`int` results
//!   (failures go to the diagnostic log). They use the platform's system
//!   calling convention, `__stdcall` on 32-bit Windows.
//! - `rowsheet_*` functions return a status code (see [`error`]) and pass
//!   results through out-parameters.
//!
//! All strings are NUL-terminated UTF-8. No export unwinds into the caller.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};

mod coded;
mod config;
pub mod error;
mod legacy;

pub use coded::*;
pub use config::SetLogPath;
pub use error::*;
pub use legacy::*;

/// Borrow a C string argument as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn str_arg<'a>(ptr: *const c_char, what: &str) -> rowsheet::Result<&'a str> {
    if ptr.is_null() {
        return Err(rowsheet::Error::InvalidArgument(format!("{} is null", what)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| rowsheet::Error::InvalidArgument(format!("{} is not valid UTF-8", what)))
}

/// Best-effort text of a C string argument for log lines; `<null>` for null.
///
/// # Safety
/// Same as [`str_arg`].
pub(crate) unsafe fn lossy_arg(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "<null>".to_string();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Run an export body, turning a panic into `fallback` and a log line
pub(crate) fn guarded<T, F: FnOnce() -> T>(operation: &str, fallback: T, body: F) -> T {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            config::current_store()
                .diagnostics()
                .record(&format!("{} [panic]: {}", operation, message));
            fallback
        }
    }
}
