//! Sheet resolution by exact, case-sensitive name.

use rowsheet_core::{Workbook, Worksheet};

use crate::error::{Error, Result};

/// The sheet called exactly `name`, created (appended last) when absent.
///
/// Creation fails when the workbook rejects the name: too long, containing
/// `: \ / ? * [ ]`, or clashing with an existing sheet that differs only in
/// case.
pub fn resolve_for_write<'a>(
    workbook: &'a mut Workbook,
    name: &str,
) -> Result<&'a mut Worksheet> {
    let index = match workbook.sheet_index(name) {
        Some(index) => index,
        None => {
            let index = workbook.add_worksheet_with_name(name)?;
            log::debug!("created sheet '{}'", name);
            index
        }
    };
    workbook
        .worksheet_mut(index)
        .ok_or_else(|| Error::SheetNotFound(name.to_string()))
}

/// The sheet called exactly `name`
pub fn resolve_for_read<'a>(workbook: &'a Workbook, name: &str) -> Result<&'a Worksheet> {
    workbook
        .worksheet_by_name(name)
        .ok_or_else(|| Error::SheetNotFound(name.to_string()))
}
