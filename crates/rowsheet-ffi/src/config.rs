//! Process-wide options shared by every export

use std::os::raw::c_char;
use std::path::PathBuf;
use std::sync::Mutex;

use lazy_static::lazy_static;
use rowsheet::{RowStore, StoreOptions};

use crate::{guarded, str_arg};

lazy_static! {
    static ref OPTIONS: Mutex<StoreOptions> = Mutex::new(StoreOptions::default());
}

/// A store configured from the current options; defaults if the lock is poisoned
pub(crate) fn current_store() -> RowStore {
    match OPTIONS.lock() {
        Ok(options) => RowStore::new(options.clone()),
        Err(_) => RowStore::default(),
    }
}

fn set_log_path(path: Option<PathBuf>) {
    let mut options = OPTIONS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    options.log_path = path.unwrap_or_else(|| StoreOptions::default().log_path);
}

/// Set where failures are logged. A null `path` restores the default.
///
/// Returns `false` when `path` is empty or not valid UTF-8.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn SetLogPath(path: *const c_char) -> bool {
    guarded("SetLogPath", false, || {
        if path.is_null() {
            set_log_path(None);
            return true;
        }
        match unsafe { str_arg(path, "log path") } {
            Ok(p) if !p.trim().is_empty() => {
                set_log_path(Some(PathBuf::from(p)));
                true
            }
            _ => false,
        }
    })
}
