//! Typed row operations over XLSX documents on disk.
//!
//! Every call loads the document afresh. Only [`RowStore::append_record`]
//! writes, and it replaces the file with a single write of a fully
//! serialized package.

use std::fs;
use std::path::Path;

use rowsheet_core::worksheet::validate_cell_position;
use rowsheet_core::{CellValue, Workbook};
use rowsheet_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use crate::codec::{split, SEPARATOR};
use crate::diagnostics::DiagnosticLog;
use crate::error::{Error, Result};
use crate::locator::{next_write_row, row_count, validate_read_row};
use crate::options::StoreOptions;
use crate::resolver::{resolve_for_read, resolve_for_write};
use crate::scanner::row_record;

/// Entry point for the row operations
#[derive(Debug, Clone)]
pub struct RowStore {
    options: StoreOptions,
    log: DiagnosticLog,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl RowStore {
    pub fn new(options: StoreOptions) -> Self {
        let log = DiagnosticLog::new(options.log_path.clone());
        Self { options, log }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The diagnostic log failures are recorded in
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Append `record` as the next row of `sheet`, returning the 1-based row used.
    ///
    /// A missing document is created; a missing sheet is added last. Field `i`
    /// of the record lands in column `i + 1`.
    pub fn append_record(&self, path: &Path, sheet: &str, record: &str) -> Result<u32> {
        check_path(path)?;
        check_sheet_name(sheet)?;

        let mut workbook = if path.exists() {
            load(path)?
        } else {
            log::debug!("{} does not exist, starting a new document", path.display());
            Workbook::empty()
        };

        let row = {
            let worksheet = resolve_for_write(&mut workbook, sheet)?;
            let row = next_write_row(&*worksheet);
            let fields = split(record, SEPARATOR);

            // Bounds are checked up front so a too-wide record leaves no partial row
            let last_col = u32::try_from(fields.len() - 1).unwrap_or(u32::MAX);
            validate_cell_position(row - 1, last_col)?;

            for (i, field) in fields.into_iter().enumerate() {
                worksheet.set_cell_value_at(row - 1, i as u16, CellValue::String(field))?;
            }
            row
        };

        self.save(&workbook, path)?;
        log::debug!("appended row {} to '{}' in {}", row, sheet, path.display());
        Ok(row)
    }

    /// Number of data rows in `sheet`
    pub fn row_count(&self, path: &Path, sheet: &str) -> Result<u32> {
        check_path(path)?;
        check_sheet_name(sheet)?;

        let workbook = load(path)?;
        let worksheet = resolve_for_read(&workbook, sheet)?;
        Ok(row_count(worksheet))
    }

    /// Row `row` (1-based) of `sheet` as a delimited record
    pub fn read_row(&self, path: &Path, sheet: &str, row: i64) -> Result<String> {
        check_path(path)?;
        check_sheet_name(sheet)?;

        let workbook = load(path)?;
        let worksheet = resolve_for_read(&workbook, sheet)?;
        let row = validate_read_row(worksheet, row)?;
        Ok(row_record(worksheet, row))
    }

    /// Copy row `row` into `out` as a NUL-terminated string.
    ///
    /// Returns the record length, excluding the terminator. `out` is left
    /// untouched on error.
    pub fn read_row_into(
        &self,
        path: &Path,
        sheet: &str,
        row: i64,
        out: &mut [u8],
    ) -> Result<usize> {
        let record = self.read_row(path, sheet, row)?;
        copy_terminated(&record, out)?;
        Ok(record.len())
    }

    /// Names of all sheets in document order
    pub fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        check_path(path)?;
        let workbook = load(path)?;
        Ok(workbook.sheet_names().into_iter().map(String::from).collect())
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        let save_err = |source: XlsxError| Error::DocumentSave {
            path: path.to_path_buf(),
            source,
        };

        let bytes = XlsxWriter::to_bytes(workbook).map_err(save_err)?;

        if self.options.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| save_err(e.into()))?;
            }
        }

        fs::write(path, bytes).map_err(|e| save_err(e.into()))
    }
}

fn load(path: &Path) -> Result<Workbook> {
    XlsxReader::read_file(path).map_err(|source| Error::DocumentLoad {
        path: path.to_path_buf(),
        source,
    })
}

fn check_path(path: &Path) -> Result<()> {
    let blank = path
        .to_str()
        .map_or(path.as_os_str().is_empty(), |s| s.trim().is_empty());
    if blank {
        return Err(Error::InvalidArgument("document path is empty".into()));
    }
    Ok(())
}

fn check_sheet_name(sheet: &str) -> Result<()> {
    if sheet.is_empty() {
        return Err(Error::InvalidArgument("sheet name is empty".into()));
    }
    Ok(())
}

/// Copy `text` plus a NUL terminator into `out`, or fail without touching it
pub(crate) fn copy_terminated(text: &str, out: &mut [u8]) -> Result<()> {
    let needed = text.len() + 1;
    if needed > out.len() {
        return Err(Error::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }
    out[..text.len()].copy_from_slice(text.as_bytes());
    out[text.len()] = 0;
    Ok(())
}
