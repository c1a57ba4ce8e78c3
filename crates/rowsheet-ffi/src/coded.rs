//! Status-code exports

use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::slice;

use crate::config::current_store;
use crate::error::*;
use crate::{guarded, str_arg};

fn status<T>(result: rowsheet::Result<T>, on_ok: impl FnOnce(T)) -> c_int {
    match result {
        Ok(value) => {
            on_ok(value);
            ROWSHEET_OK
        }
        Err(e) => {
            log::debug!("rowsheet call failed: {}", e.chain());
            status_code(e.kind())
        }
    }
}

/// Append `data` as the next row of `sheet`.
///
/// `out_row` (optional) receives the 1-based row written.
#[no_mangle]
pub extern "C" fn rowsheet_write(
    path: *const c_char,
    sheet: *const c_char,
    data: *const c_char,
    out_row: *mut u32,
) -> c_int {
    if path.is_null() || sheet.is_null() || data.is_null() {
        return ROWSHEET_ERR_NULL_PTR;
    }

    guarded("rowsheet_write", ROWSHEET_ERR_INTERNAL, || {
        let result = unsafe {
            str_arg(path, "path").and_then(|p| {
                let s = str_arg(sheet, "sheet name")?;
                let d = str_arg(data, "data")?;
                current_store().append_record(Path::new(p), s, d)
            })
        };
        status(result, |row| {
            if !out_row.is_null() {
                unsafe {
                    *out_row = row;
                }
            }
        })
    })
}

/// Number of data rows in `sheet`, through `out_count`
#[no_mangle]
pub extern "C" fn rowsheet_row_count(
    path: *const c_char,
    sheet: *const c_char,
    out_count: *mut u32,
) -> c_int {
    if path.is_null() || sheet.is_null() || out_count.is_null() {
        return ROWSHEET_ERR_NULL_PTR;
    }

    guarded("rowsheet_row_count", ROWSHEET_ERR_INTERNAL, || {
        let result = unsafe {
            str_arg(path, "path").and_then(|p| {
                let s = str_arg(sheet, "sheet name")?;
                current_store().row_count(Path::new(p), s)
            })
        };
        status(result, |count| unsafe {
            *out_count = count;
        })
    })
}

/// Copy row `row` (1-based) of `sheet` into `buf` as a NUL-terminated record.
///
/// `out_len` (optional) receives the record length without the terminator,
/// also when the status is `ROWSHEET_ERR_BUFFER_TOO_SMALL`, so a caller can
/// size its buffer with a first call passing `buf = NULL, buf_size = 0`.
#[no_mangle]
pub extern "C" fn rowsheet_read_row(
    path: *const c_char,
    sheet: *const c_char,
    row: i64,
    buf: *mut c_char,
    buf_size: usize,
    out_len: *mut usize,
) -> c_int {
    if path.is_null() || sheet.is_null() || (buf.is_null() && buf_size > 0) {
        return ROWSHEET_ERR_NULL_PTR;
    }

    guarded("rowsheet_read_row", ROWSHEET_ERR_INTERNAL, || {
        let out: &mut [u8] = if buf.is_null() {
            Default::default()
        } else {
            unsafe { slice::from_raw_parts_mut(buf as *mut u8, buf_size) }
        };

        let set_len = |len: usize| {
            if !out_len.is_null() {
                unsafe {
                    *out_len = len;
                }
            }
        };

        let result = unsafe {
            str_arg(path, "path").and_then(|p| {
                let s = str_arg(sheet, "sheet name")?;
                current_store().read_row_into(Path::new(p), s, row, out)
            })
        };

        if let Err(rowsheet::Error::BufferTooSmall { needed, .. }) = &result {
            set_len(needed - 1);
        }
        status(result, set_len)
    })
}
