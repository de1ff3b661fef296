//! Normalized student record handed to the rest of the application

use std::fmt;

use serde::{Deserialize, Serialize};

use super::row::{CellValue, format_number};

/// Row number as written in the sheet, or the synthesized position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ordinal {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Ordinal {
    /// 1-based position of a row in the sheet
    pub fn position(index: usize) -> Self {
        Ordinal::Int(index as i64 + 1)
    }
}

impl From<&CellValue> for Ordinal {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                Ordinal::Int(*n as i64)
            }
            CellValue::Number(n) => Ordinal::Float(*n),
            other => Ordinal::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinal::Int(i) => write!(f, "{}", i),
            Ordinal::Float(n) => write!(f, "{}", format_number(*n)),
            Ordinal::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One imported student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRow {
    #[serde(rename = "No")]
    pub no: Ordinal,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl StudentRow {
    pub fn new(no: Ordinal, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            no,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Both required fields are present
    pub fn is_complete(&self) -> bool {
        !self.code.is_empty() && !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_from_cell() {
        assert_eq!(Ordinal::from(&CellValue::from(5.0)), Ordinal::Int(5));
        assert_eq!(Ordinal::from(&CellValue::from(2.5)), Ordinal::Float(2.5));
        assert_eq!(
            Ordinal::from(&CellValue::from("12a")),
            Ordinal::Text("12a".to_string())
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let row = StudentRow::new(Ordinal::Int(1), "A1", "Jane Doe");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"No": 1, "Code": "A1", "Name": "Jane Doe"})
        );

        let row = StudentRow::new(Ordinal::Text("7b".into()), "B2", "Al Smith");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["No"], serde_json::json!("7b"));
    }

    #[test]
    fn test_is_complete() {
        assert!(StudentRow::new(Ordinal::Int(1), "A1", "Jane").is_complete());
        assert!(!StudentRow::new(Ordinal::Int(1), "", "Jane").is_complete());
        assert!(!StudentRow::new(Ordinal::Int(1), "A1", "").is_complete());
    }
}
