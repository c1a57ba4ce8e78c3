//! A1-style cell references

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// Position of a single cell, 0-based on both axes.
///
/// The text form is the usual `B7` notation. `$` markers are tolerated on
/// input and never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an `A1` reference.
    ///
    /// ```
    /// use rowsheet_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("C7").unwrap(), CellAddress::new(6, 2));
    /// assert_eq!(CellAddress::parse("$AB$12").unwrap(), CellAddress::new(11, 27));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let bad = |reason: &str| Error::InvalidAddress {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        let mut letters = String::new();
        let mut digits = String::new();
        for ch in text.trim().chars().filter(|&c| c != '$') {
            match ch {
                'A'..='Z' | 'a'..='z' if digits.is_empty() => letters.push(ch),
                '0'..='9' => digits.push(ch),
                _ => return Err(bad("unexpected character")),
            }
        }
        if letters.is_empty() {
            return Err(bad("missing column"));
        }
        if digits.is_empty() {
            return Err(bad("missing row"));
        }

        let col = column_from_label(&letters).ok_or_else(|| bad("column past XFD"))?;
        let row = match digits.parse::<u32>() {
            Ok(0) => return Err(bad("rows start at 1")),
            Ok(n) if n <= MAX_ROWS => n - 1,
            _ => return Err(bad("row past the sheet limit")),
        };

        Ok(Self { row, col })
    }

    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_label(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Rectangle between two cells, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Build from corner indices; the corners may come in any order
    pub fn from_indices(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            start: CellAddress::new(first_row.min(last_row), first_col.min(last_col)),
            end: CellAddress::new(first_row.max(last_row), first_col.max(last_col)),
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Bijective base-26: 0 is `A`, 26 is `AA`
fn column_label(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut label = Vec::with_capacity(3);
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn column_from_label(label: &str) -> Option<u16> {
    let mut n: u32 = 0;
    for b in label.bytes() {
        n = n * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
        if n > u32::from(MAX_COLS) {
            return None;
        }
    }
    u16::try_from(n.checked_sub(1)?).ok()
}
