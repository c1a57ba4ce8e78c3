use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

const FORBIDDEN_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// An ordered set of worksheets.
///
/// A new workbook has no sheets at all. Sheet order is insertion order and is
/// preserved on save.
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Lookup by exact name; `Trades` and `trades` are different sheets here
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|i| self.worksheet(i))
    }

    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheet_index(name).and_then(move |i| self.worksheet_mut(i))
    }

    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(Worksheet::name).collect()
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append an empty sheet, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    /// Whether `name` could be added as a new sheet.
    ///
    /// Names are limited to 31 characters, may not use `: \ / ? * [ ]`, may
    /// not start or end with `'`, and must differ from every existing sheet
    /// name ignoring case.
    pub fn validate_sheet_name(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidSheetName {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(invalid(format!("longer than {} characters", MAX_SHEET_NAME_LEN)));
        }
        if let Some(ch) = name.chars().find(|ch| FORBIDDEN_NAME_CHARS.contains(ch)) {
            return Err(invalid(format!("contains '{}'", ch)));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(invalid("starts or ends with an apostrophe".into()));
        }

        let folded = name.to_lowercase();
        if self.worksheets.iter().any(|ws| ws.name().to_lowercase() == folded) {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook_has_no_sheets() {
        let wb = Workbook::empty();
        assert!(wb.is_empty());
        assert_eq!(wb.sheet_count(), 0);
        assert!(wb.worksheet(0).is_none());
    }

    #[test]
    fn test_sheets_keep_insertion_order() {
        let mut wb = Workbook::empty();
        assert_eq!(wb.add_worksheet_with_name("Trades").unwrap(), 0);
        assert_eq!(wb.add_worksheet_with_name("Quotes").unwrap(), 1);

        assert_eq!(wb.sheet_names(), vec!["Trades", "Quotes"]);
        assert_eq!(wb.sheet_index("Quotes"), Some(1));
        assert_eq!(wb.worksheet_by_name("Trades").map(Worksheet::name), Some("Trades"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Trades").unwrap();
        assert!(wb.worksheet_by_name("trades").is_none());
        assert!(wb.worksheet_by_name_mut("TRADES").is_none());
        assert!(wb.worksheet_by_name_mut("Trades").is_some());
    }

    #[test]
    fn test_case_variants_clash_on_insert() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Trades").unwrap();
        assert!(matches!(
            wb.add_worksheet_with_name("TRADES"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_rejected_names() {
        let mut wb = Workbook::empty();
        let long = "x".repeat(32);
        for name in ["", "a/b", "[x]", "what?", "'quoted'", long.as_str()] {
            assert!(
                matches!(wb.add_worksheet_with_name(name), Err(Error::InvalidSheetName { .. })),
                "{name:?} should be rejected"
            );
        }
        assert!(wb.add_worksheet_with_name(&"x".repeat(31)).is_ok());
    }
}
