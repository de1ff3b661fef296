//! Class roster import for the gradebook
//!
//! Reads a spreadsheet (xlsx, xls, ods or delimited text), takes its first
//! sheet and turns each row into a [`StudentRow`](import::StudentRow) with a
//! number, a student code and a title-cased name.

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod output;

pub use error::{ImportError, ImportResult};
pub use import::{StudentRow, import_students, import_students_with};
