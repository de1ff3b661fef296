//! Roster import: spreadsheet payload in, normalized student records out
//!
//! The pipeline is linear: read the file handle into memory, decode the first
//! sheet into header-keyed rows, normalize each row, and drop the ones missing
//! a code or a name. Nothing is kept between calls.

pub mod normalize;
pub mod row;
pub mod source;
pub mod student;
pub mod workbook;

pub use normalize::{ColumnNames, normalize_rows, title_case_name};
pub use row::{CellValue, GenericRow};
pub use source::{BytesSource, FileSource, PathSource};
pub use student::{Ordinal, StudentRow};

use crate::error::{ImportError, ImportResult};

/// Import students using the default `No` / `Code` / `Name` headers
pub async fn import_students<S>(source: &S) -> ImportResult<Vec<StudentRow>>
where
    S: FileSource + ?Sized,
{
    import_students_with(source, &ColumnNames::default()).await
}

/// Import students reading the given header names
///
/// An empty file resolves to an empty list. Read and decode failures are
/// returned as-is; incomplete rows are dropped silently.
pub async fn import_students_with<S>(
    source: &S,
    columns: &ColumnNames,
) -> ImportResult<Vec<StudentRow>>
where
    S: FileSource + ?Sized,
{
    let name = source.name();

    let bytes = source
        .read_all()
        .await
        .map_err(|e| ImportError::Read {
            name: name.clone(),
            source: e,
        })?;

    if bytes.is_empty() {
        log::info!("{} is empty, nothing to import", name);
        return Ok(Vec::new());
    }

    let rows = workbook::read_first_sheet(&name, &bytes)?;
    let students = normalize_rows(&rows, columns);

    log::info!(
        "Imported {} students from {} ({} rows read)",
        students.len(),
        name,
        rows.len()
    );

    Ok(students)
}
