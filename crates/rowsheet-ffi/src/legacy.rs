//! Sentinel-contract exports

use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::slice;

use rowsheet::RowStore;

use crate::config::current_store;
use crate::{guarded, lossy_arg, str_arg};

/// Log a rejected argument in the same line format the store uses
fn report_arguments(
    store: &RowStore,
    operation: &str,
    path: *const c_char,
    sheet: *const c_char,
    error: &rowsheet::Error,
) {
    let (path, sheet) = unsafe { (lossy_arg(path), lossy_arg(sheet)) };
    store.report(operation, Path::new(&path), &sheet, error);
}

/// Append `data` as the next row of `sheet` in the document at `path`.
///
/// Returns `false` on any failure.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn WriteToXlsx(
    path: *const c_char,
    sheet: *const c_char,
    data: *const c_char,
) -> bool {
    guarded("WriteToXlsx", false, || {
        let store = current_store();
        let args = unsafe {
            str_arg(path, "path").and_then(|p| {
                let s = str_arg(sheet, "sheet name")?;
                let d = str_arg(data, "data")?;
                Ok((p, s, d))
            })
        };
        match args {
            Ok((path, sheet, data)) => store.write_record(Path::new(path), sheet, data),
            Err(e) => {
                report_arguments(&store, "WriteToXlsx", path, sheet, &e);
                false
            }
        }
    })
}

/// Number of data rows in `sheet`, `0` on any failure
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn ReadRowCount(path: *const c_char, sheet: *const c_char) -> c_int {
    guarded("ReadRowCount", 0, || {
        let store = current_store();
        let args = unsafe {
            str_arg(path, "path").and_then(|p| Ok((p, str_arg(sheet, "sheet name")?)))
        };
        match args {
            Ok((path, sheet)) => {
                let count = store.read_row_count(Path::new(path), sheet);
                c_int::try_from(count).unwrap_or(c_int::MAX)
            }
            Err(e) => {
                report_arguments(&store, "ReadRowCount", path, sheet, &e);
                0
            }
        }
    })
}

/// Copy row `row` (1-based) of `sheet` into `out` as a NUL-terminated record.
///
/// On any failure `out` receives an empty string. A null `out` or a
/// non-positive `out_size` means there is no buffer and nothing is written.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn ReadRow(
    path: *const c_char,
    sheet: *const c_char,
    row: c_int,
    out: *mut c_char,
    out_size: c_int,
) {
    guarded("ReadRow", (), || {
        let out: &mut [u8] = if out.is_null() || out_size <= 0 {
            Default::default()
        } else {
            unsafe { slice::from_raw_parts_mut(out as *mut u8, out_size as usize) }
        };

        let store = current_store();
        let args = unsafe {
            str_arg(path, "path").and_then(|p| Ok((p, str_arg(sheet, "sheet name")?)))
        };
        match args {
            Ok((path, sheet)) => {
                store.read_row_to_buffer(Path::new(path), sheet, i64::from(row), out)
            }
            Err(e) => {
                report_arguments(&store, "ReadRow", path, sheet, &e);
                if let Some(first) = out.first_mut() {
                    *first = 0;
                }
            }
        }
    })
}
