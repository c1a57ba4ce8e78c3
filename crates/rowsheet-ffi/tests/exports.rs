//! Calls through the exported C functions, as a host would make them.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;
use std::ptr;
use std::sync::Once;

use pretty_assertions::assert_eq;
use rowsheet_ffi::*;

static LOG_SETUP: Once = Once::new();

/// Every test shares one log file, so assertions on it look for test-unique text
fn log_path() -> PathBuf {
    let path = std::env::temp_dir().join(format!("rowsheet-ffi-{}.log", std::process::id()));
    LOG_SETUP.call_once(|| {
        let c = CString::new(path.to_str().unwrap()).unwrap();
        assert!(SetLogPath(c.as_ptr()));
    });
    path
}

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

fn read_legacy(path: &CString, sheet: &str, row: i32, size: usize) -> String {
    let sheet = cstr(sheet);
    let mut buf = vec![b'#' as c_char; size.max(1)];
    ReadRow(path.as_ptr(), sheet.as_ptr(), row, buf.as_mut_ptr(), size as i32);
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_legacy_write_count_read() {
    log_path();
    let dir = tempfile::tempdir().unwrap();
    let book = cstr(dir.path().join("book.xlsx").to_str().unwrap());
    let sheet = cstr("Fills");

    assert!(WriteToXlsx(book.as_ptr(), sheet.as_ptr(), cstr("EURUSD,1.0842,buy").as_ptr()));
    assert!(WriteToXlsx(book.as_ptr(), sheet.as_ptr(), cstr("GBPUSD,1.2711,sell").as_ptr()));

    assert_eq!(ReadRowCount(book.as_ptr(), sheet.as_ptr()), 2);
    assert_eq!(read_legacy(&book, "Fills", 1, 64), "EURUSD,1.0842,buy");
    assert_eq!(read_legacy(&book, "Fills", 2, 64), "GBPUSD,1.2711,sell");
}

#[test]
fn test_legacy_failures_collapse_to_sentinels() {
    let log = log_path();
    let dir = tempfile::tempdir().unwrap();
    let book = cstr(dir.path().join("legacy-missing.xlsx").to_str().unwrap());

    assert_eq!(ReadRowCount(book.as_ptr(), cstr("NoSuchSheetLegacy").as_ptr()), 0);
    assert_eq!(read_legacy(&book, "NoSuchSheetLegacy", 1, 16), "");

    let logged = std::fs::read_to_string(log).unwrap();
    assert!(logged.contains("NoSuchSheetLegacy"));
}

#[test]
fn test_legacy_null_and_invalid_arguments() {
    log_path();
    let sheet = cstr("S");

    assert!(!WriteToXlsx(ptr::null(), sheet.as_ptr(), sheet.as_ptr()));
    assert_eq!(ReadRowCount(sheet.as_ptr(), ptr::null()), 0);

    // Non-UTF-8 path
    let bad = CString::new(vec![0xffu8, 0xfe]).unwrap();
    assert!(!WriteToXlsx(bad.as_ptr(), sheet.as_ptr(), sheet.as_ptr()));

    // Whitespace-only path
    assert!(!WriteToXlsx(cstr("  ").as_ptr(), sheet.as_ptr(), sheet.as_ptr()));

    // No buffer: nothing written, nothing crashes
    ReadRow(sheet.as_ptr(), sheet.as_ptr(), 1, ptr::null_mut(), 16);
    let mut untouched = [b'#' as c_char; 4];
    ReadRow(sheet.as_ptr(), sheet.as_ptr(), 1, untouched.as_mut_ptr(), 0);
    assert_eq!(untouched, [b'#' as c_char; 4]);
}

#[test]
fn test_legacy_buffer_too_small() {
    log_path();
    let dir = tempfile::tempdir().unwrap();
    let book = cstr(dir.path().join("book.xlsx").to_str().unwrap());
    let sheet = cstr("S");
    assert!(WriteToXlsx(book.as_ptr(), sheet.as_ptr(), cstr("abcd").as_ptr()));

    assert_eq!(read_legacy(&book, "S", 1, 5), "abcd");
    assert_eq!(read_legacy(&book, "S", 1, 4), "");
}

#[test]
fn test_coded_round_trip() {
    log_path();
    let dir = tempfile::tempdir().unwrap();
    let book = cstr(dir.path().join("coded.xlsx").to_str().unwrap());
    let sheet = cstr("S");

    let mut row = 0u32;
    assert_eq!(
        rowsheet_write(book.as_ptr(), sheet.as_ptr(), cstr("a,,c").as_ptr(), &mut row),
        ROWSHEET_OK
    );
    assert_eq!(row, 1);
    assert_eq!(
        rowsheet_write(book.as_ptr(), sheet.as_ptr(), cstr("x").as_ptr(), ptr::null_mut()),
        ROWSHEET_OK
    );

    let mut count = 0u32;
    assert_eq!(
        rowsheet_row_count(book.as_ptr(), sheet.as_ptr(), &mut count),
        ROWSHEET_OK
    );
    assert_eq!(count, 2);

    // Size query first, then the real read
    let mut len = 0usize;
    assert_eq!(
        rowsheet_read_row(book.as_ptr(), sheet.as_ptr(), 1, ptr::null_mut(), 0, &mut len),
        ROWSHEET_ERR_BUFFER_TOO_SMALL
    );
    assert_eq!(len, 4);

    let mut buf = vec![0 as c_char; len + 1];
    assert_eq!(
        rowsheet_read_row(book.as_ptr(), sheet.as_ptr(), 1, buf.as_mut_ptr(), buf.len(), &mut len),
        ROWSHEET_OK
    );
    assert_eq!(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_str().unwrap(), "a,,c");
}

#[test]
fn test_coded_error_statuses() {
    log_path();
    let dir = tempfile::tempdir().unwrap();
    let book = cstr(dir.path().join("coded.xlsx").to_str().unwrap());
    let sheet = cstr("S");
    let mut count = 0u32;

    assert_eq!(
        rowsheet_row_count(book.as_ptr(), sheet.as_ptr(), &mut count),
        ROWSHEET_ERR_DOCUMENT_LOAD
    );

    rowsheet_write(book.as_ptr(), sheet.as_ptr(), cstr("v").as_ptr(), ptr::null_mut());
    assert_eq!(
        rowsheet_row_count(book.as_ptr(), cstr("s").as_ptr(), &mut count),
        ROWSHEET_ERR_SHEET_NOT_FOUND
    );

    let mut buf = [0 as c_char; 8];
    assert_eq!(
        rowsheet_read_row(book.as_ptr(), sheet.as_ptr(), 2, buf.as_mut_ptr(), 8, ptr::null_mut()),
        ROWSHEET_ERR_ROW_OUT_OF_RANGE
    );
    assert_eq!(
        rowsheet_write(book.as_ptr(), cstr("").as_ptr(), cstr("v").as_ptr(), ptr::null_mut()),
        ROWSHEET_ERR_INVALID_ARGUMENT
    );
    assert_eq!(
        rowsheet_write(book.as_ptr(), cstr("a/b").as_ptr(), cstr("v").as_ptr(), ptr::null_mut()),
        ROWSHEET_ERR_ENGINE
    );
    assert_eq!(
        rowsheet_row_count(ptr::null(), sheet.as_ptr(), &mut count),
        ROWSHEET_ERR_NULL_PTR
    );
    assert_eq!(
        rowsheet_read_row(book.as_ptr(), sheet.as_ptr(), 1, ptr::null_mut(), 8, ptr::null_mut()),
        ROWSHEET_ERR_NULL_PTR
    );
}

#[test]
fn test_error_messages() {
    let message = |code| {
        unsafe { CStr::from_ptr(rowsheet_error_message(code)) }
            .to_str()
            .unwrap()
            .to_string()
    };
    assert_eq!(message(ROWSHEET_OK), "Success");
    assert_eq!(message(ROWSHEET_ERR_SHEET_NOT_FOUND), "Sheet not found");
    assert_eq!(message(12345), "Unknown error");
}

#[test]
fn test_argument_errors_use_store_log_format() {
    let log = log_path();
    let sheet = cstr("ArgLogSheet");

    assert!(!WriteToXlsx(ptr::null(), sheet.as_ptr(), sheet.as_ptr()));

    let logged = std::fs::read_to_string(log).unwrap();
    assert!(logged.contains(
        "WriteToXlsx [InvalidArgument] (<null>, 'ArgLogSheet'): invalid argument: path is null"
    ));
}
