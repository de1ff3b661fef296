//! Row normalization: default numbering, name capitalization, completeness filter

use serde::{Deserialize, Serialize};

use super::row::GenericRow;
use super::student::{Ordinal, StudentRow};

/// Header text of the three columns the importer reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub number: String,
    pub code: String,
    pub name: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            number: "No".to_string(),
            code: "Code".to_string(),
            name: "Name".to_string(),
        }
    }
}

/// Lower-case the whole name, then upper-case the first character of every
/// space-separated token. Hyphens and apostrophes are not word breaks, and
/// acronyms do not survive ("JOHN MD" -> "John Md").
pub fn title_case_name(raw: &str) -> String {
    raw.to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Map one generic row at its 0-based sheet position onto a student record.
/// The result may be incomplete; filtering happens in [`normalize_rows`].
pub fn normalize_row(row: &GenericRow, index: usize, columns: &ColumnNames) -> StudentRow {
    let no_cell = row.get(&columns.number);
    let no = if no_cell.is_truthy() {
        Ordinal::from(no_cell)
    } else {
        Ordinal::position(index)
    };

    let code_cell = row.get(&columns.code);
    let code = if code_cell.is_truthy() {
        code_cell.to_string()
    } else {
        String::new()
    };

    let name_cell = row.get(&columns.name);
    let name = if name_cell.is_truthy() {
        title_case_name(&name_cell.to_string())
    } else {
        String::new()
    };

    StudentRow { no, code, name }
}

/// Normalize every row and drop the ones missing a code or a name.
/// Positions are taken before filtering, so a dropped row still uses up its
/// number.
pub fn normalize_rows(rows: &[GenericRow], columns: &ColumnNames) -> Vec<StudentRow> {
    let students: Vec<StudentRow> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index, columns))
        .filter(|student| {
            let keep = student.is_complete();
            if !keep {
                log::debug!(
                    "Dropping row {}: code={:?} name={:?}",
                    student.no,
                    student.code,
                    student.name
                );
            }
            keep
        })
        .collect();

    log::debug!(
        "Normalized {} of {} rows ({} dropped)",
        students.len(),
        rows.len(),
        rows.len() - students.len()
    );

    students
}
