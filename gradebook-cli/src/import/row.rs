//! Generic header-keyed rows produced from the first sheet

use std::collections::HashMap;
use std::fmt;

/// Value of a single decoded cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// What an absent cell reads as
static EMPTY_CELL: CellValue = CellValue::Text(String::new());

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Empty string, zero, NaN and `false` are falsy. Everything else,
    /// including whitespace and the text "0", counts as a value.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Render a number the way it is written in a sheet: whole numbers lose the
/// trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// One data row keyed by header text
///
/// Every key can be read; absent cells come back as an empty string so
/// callers only ever branch on emptiness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericRow {
    cells: HashMap<String, CellValue>,
}

impl GenericRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&EMPTY_CELL)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_as_empty_string() {
        let row = GenericRow::new().with("Code", "A1");
        assert_eq!(row.get("Name"), &CellValue::Text(String::new()));
        assert!(!row.get("Name").is_truthy());
    }

    #[test]
    fn test_truthiness() {
        assert!(!CellValue::from("").is_truthy());
        assert!(!CellValue::from(0.0).is_truthy());
        assert!(!CellValue::from(f64::NAN).is_truthy());
        assert!(!CellValue::from(false).is_truthy());

        assert!(CellValue::from(" ").is_truthy());
        assert!(CellValue::from("0").is_truthy());
        assert!(CellValue::from(-1.5).is_truthy());
        assert!(CellValue::from(true).is_truthy());
    }

    #[test]
    fn test_display_drops_trailing_zero() {
        assert_eq!(CellValue::from(1001.0).to_string(), "1001");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from(true).to_string(), "true");
    }
}
