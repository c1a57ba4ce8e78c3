//! Store options

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the default diagnostic log path
pub const LOG_PATH_ENV: &str = "ROWSHEET_LOG";

/// Default diagnostic log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "error_log.txt";

/// Options for [`RowStore`](crate::RowStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Where failure lines are appended (default: `$ROWSHEET_LOG` or `error_log.txt`)
    pub log_path: PathBuf,
    /// Create missing parent directories before saving a document (default: true)
    pub create_parent_dirs: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        let log_path = env::var_os(LOG_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        Self {
            log_path,
            create_parent_dirs: true,
        }
    }
}

impl StoreOptions {
    /// Set the diagnostic log path
    pub fn with_log_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_path = path.into();
        self
    }

    /// Enable or disable creation of missing parent directories
    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = StoreOptions::default()
            .with_log_path("/tmp/rowsheet.log")
            .with_create_parent_dirs(false);
        assert_eq!(options.log_path, PathBuf::from("/tmp/rowsheet.log"));
        assert!(!options.create_parent_dirs);
    }
}
