use std::fmt;

/// What a cell holds.
///
/// `String("")` is a real value and is distinct from `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    /// Dates and times are serial numbers here too
    Number(f64),
    String(String),
    Error(CellError),
    /// Formula text (with its leading `=`) and the result cached by whichever
    /// application last calculated the file. Nothing here evaluates it.
    Formula {
        text: String,
        cached_value: Option<Box<CellValue>>,
    },
}

impl CellValue {
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// A formula cell; a missing leading `=` is added
    pub fn formula<S: Into<String>>(text: S, cached_value: Option<CellValue>) -> Self {
        let mut text = text.into();
        if !text.starts_with('=') {
            text.insert(0, '=');
        }
        CellValue::Formula {
            text,
            cached_value: cached_value.map(Box::new),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// True for anything but [`CellValue::Empty`], the empty string included
    pub fn has_value(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula { .. })
    }

    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The value itself, or the cached result for a formula
    fn resolved(&self) -> Option<&CellValue> {
        match self {
            CellValue::Formula { cached_value, .. } => cached_value.as_deref(),
            other => Some(other),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.resolved()? {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.resolved()? {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self.resolved()? {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Raw display text: `TRUE`/`FALSE`, numbers in shortest round-trip
    /// form, error codes as written (`#N/A`).
    ///
    /// A formula shows its cached result, or its own text when the file
    /// carries none.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
            CellValue::Error(e) => f.write_str(e.as_str()),
            CellValue::Formula { text, cached_value } => match cached_value {
                Some(cached) => cached.fmt(f),
                None => f.write_str(text),
            },
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

/// Error literals a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
    GettingData,
    Spill,
    Calc,
}

const ERROR_CODES: [(CellError, &str); 10] = [
    (CellError::Null, "#NULL!"),
    (CellError::Div0, "#DIV/0!"),
    (CellError::Value, "#VALUE!"),
    (CellError::Ref, "#REF!"),
    (CellError::Name, "#NAME?"),
    (CellError::Num, "#NUM!"),
    (CellError::Na, "#N/A"),
    (CellError::GettingData, "#GETTING_DATA"),
    (CellError::Spill, "#SPILL!"),
    (CellError::Calc, "#CALC!"),
];

impl CellError {
    pub fn as_str(&self) -> &'static str {
        ERROR_CODES
            .iter()
            .find(|(e, _)| e == self)
            .map_or("#VALUE!", |(_, code)| code)
    }

    /// Match an error literal, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        ERROR_CODES
            .iter()
            .find(|(_, code)| code.eq_ignore_ascii_case(s.trim()))
            .map(|(e, _)| *e)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_a_value() {
        assert!(CellValue::string("").has_value());
        assert!(!CellValue::Empty.has_value());
        assert_eq!(CellValue::from("").as_string(), Some(""));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::from(42.0).to_text(), "42");
        assert_eq!(CellValue::from(1.0842).to_text(), "1.0842");
        assert_eq!(CellValue::from(-0.5).to_text(), "-0.5");
        assert_eq!(CellValue::from(true).to_text(), "TRUE");
        assert_eq!(CellValue::from(CellError::Div0).to_text(), "#DIV/0!");
        assert_eq!(CellValue::string("a b").to_text(), "a b");
    }

    #[test]
    fn test_formula_shows_cached_result() {
        let bare = CellValue::formula("SUM(A1:A3)", None);
        assert_eq!(bare.formula_text(), Some("=SUM(A1:A3)"));
        assert_eq!(bare.to_text(), "=SUM(A1:A3)");
        assert_eq!(bare.as_number(), None);

        let cached = CellValue::formula("=A1*2", Some(CellValue::Number(8.0)));
        assert!(cached.is_formula());
        assert_eq!(cached.to_text(), "8");
        assert_eq!(cached.as_number(), Some(8.0));
        assert_eq!(cached.as_bool(), None);
    }

    #[test]
    fn test_error_literals() {
        assert_eq!(CellError::parse("#DIV/0!"), Some(CellError::Div0));
        assert_eq!(CellError::parse("#n/a"), Some(CellError::Na));
        assert_eq!(CellError::parse("oops"), None);
        for (error, code) in ERROR_CODES {
            assert_eq!(error.as_str(), code);
        }
    }
}
