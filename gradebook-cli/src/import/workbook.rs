//! Decode a spreadsheet payload and project its first sheet onto generic rows

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::row::{CellValue, GenericRow};
use crate::error::{ImportError, ImportResult};

/// Header text given to columns whose header cell is blank
const EMPTY_HEADER: &str = "__EMPTY";

/// Zip container: xlsx, xlsm, xlsb, ods
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound document: legacy xls
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// How a payload will be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Binary workbook handled by calamine
    Workbook,
    /// UTF-8 delimited text (CSV, semicolon or tab separated)
    DelimitedText,
}

/// Guess the payload kind from its leading bytes
pub fn sniff(bytes: &[u8]) -> Option<PayloadKind> {
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        Some(PayloadKind::Workbook)
    } else if std::str::from_utf8(bytes).is_ok() {
        Some(PayloadKind::DelimitedText)
    } else {
        None
    }
}

/// A decoded sheet: rows of optional cells, `None` meaning the cell is absent
type Grid = Vec<Vec<Option<CellValue>>>;

/// Decode `bytes` and return the first sheet as header-keyed rows.
///
/// `name` only labels errors and log lines.
pub fn read_first_sheet(name: &str, bytes: &[u8]) -> ImportResult<Vec<GenericRow>> {
    let grid = match sniff(bytes) {
        Some(PayloadKind::Workbook) => read_workbook_grid(name, bytes)?,
        Some(PayloadKind::DelimitedText) => read_delimited_grid(name, bytes)?,
        None => {
            return Err(ImportError::decode(
                name,
                "not a spreadsheet (unknown binary format)",
            ));
        }
    };

    Ok(project_rows(grid))
}

fn read_workbook_grid(name: &str, bytes: &[u8]) -> ImportResult<Grid> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| ImportError::decode(name, e))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        log::info!("{} has no sheets", name);
        return Ok(Vec::new());
    };

    log::info!("Reading sheet '{}' from {}", sheet_name, name);

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        ImportError::decode(name, format!("failed to read sheet '{}': {}", sheet_name, e))
    })?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        // Dates stay as their serial number
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

fn read_delimited_grid(name: &str, bytes: &[u8]) -> ImportResult<Grid> {
    let text = std::str::from_utf8(bytes).map_err(|e| ImportError::decode(name, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
    log::info!(
        "Reading {} as delimited text (delimiter {:?})",
        name,
        delimiter as char
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::decode(name, e))?;
        grid.push(record.iter().map(cell_from_text).collect());
    }

    Ok(grid)
}

/// Comma unless the header line has more semicolons or tabs
fn detect_delimiter(header_line: &str) -> u8 {
    let count = |c: char| header_line.matches(c).count();
    let commas = count(',');
    let semicolons = count(';');
    let tabs = count('\t');

    if tabs > commas && tabs >= semicolons {
        b'\t'
    } else if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Type a text cell: plain numbers and TRUE/FALSE are converted, anything
/// else stays text. Numbers with a leading zero ("007") stay text so codes
/// keep their padding.
fn cell_from_text(raw: &str) -> Option<CellValue> {
    if raw.is_empty() {
        return None;
    }

    if raw.eq_ignore_ascii_case("true") {
        return Some(CellValue::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Some(CellValue::Bool(false));
    }

    if looks_numeric(raw) {
        if let Ok(n) = raw.parse::<f64>() {
            return Some(CellValue::Number(n));
        }
    }

    Some(CellValue::Text(raw.to_string()))
}

fn looks_numeric(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let first_digit = digits.chars().next();

    if !matches!(first_digit, Some(c) if c.is_ascii_digit()) {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return false;
    }

    digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Turn a grid into header-keyed rows.
///
/// The first row is the header. Blank header cells are named `__EMPTY`, and a
/// repeated header gets `_1`, `_2`, ... appended. Data rows with no cells at
/// all are skipped; absent cells in kept rows read as the empty string.
fn project_rows(grid: Grid) -> Vec<GenericRow> {
    let mut rows = grid.into_iter();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let data: Vec<Vec<Option<CellValue>>> = rows
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_row.len()))
        .max()
        .unwrap_or(0);

    let headers = header_keys(&header_row, width);

    data.into_iter()
        .map(|cells| {
            let mut row = GenericRow::new();
            let mut cells = cells.into_iter();
            for key in &headers {
                let value = cells.next().flatten().unwrap_or_else(CellValue::empty);
                row.insert(key.clone(), value);
            }
            row
        })
        .collect()
}

fn header_keys(header_row: &[Option<CellValue>], width: usize) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(width);
    // Next suffix to try for each key already handed out
    let mut used: HashMap<String, usize> = HashMap::new();

    for col in 0..width {
        let base = match header_row.get(col).cloned().flatten() {
            Some(cell) => {
                let text = cell.to_string();
                if text.is_empty() {
                    EMPTY_HEADER.to_string()
                } else {
                    text
                }
            }
            None => EMPTY_HEADER.to_string(),
        };

        let key = match used.get(&base).copied() {
            None => base.clone(),
            Some(mut counter) => {
                let mut candidate = format!("{}_{}", base, counter);
                while used.contains_key(&candidate) {
                    counter += 1;
                    candidate = format!("{}_{}", base, counter);
                }
                used.insert(base.clone(), counter + 1);
                candidate
            }
        };
        used.entry(key.clone()).or_insert(1);
        keys.push(key);
    }

    keys
}
