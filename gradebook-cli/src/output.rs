//! Output sinks for imported student records

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

use crate::import::{Ordinal, StudentRow};

const HEADERS: [&str; 3] = ["No", "Code", "Name"];
const SHEET_NAME: &str = "Students";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned terminal listing
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a No,Code,Name header
    Csv,
    /// Excel workbook (requires --output)
    Xlsx,
}

/// Write `students` in `format` to `output`, or to stdout when `None`
pub fn emit(students: &[StudentRow], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    if format == OutputFormat::Xlsx {
        let Some(path) = output else {
            bail!("xlsx output needs a file: pass --output <path>");
        };
        return write_xlsx(students, path);
    }

    let rendered = match format {
        OutputFormat::Table => render_table(students),
        OutputFormat::Json => render_json(students)?,
        OutputFormat::Csv => render_csv(students)?,
        OutputFormat::Xlsx => unreachable!("handled above"),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Wrote {} students to {}", students.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Column-aligned listing with a summary line
pub fn render_table(students: &[StudentRow]) -> String {
    let cells: Vec<[String; 3]> = students
        .iter()
        .map(|s| [s.no.to_string(), s.code.clone(), s.name.clone()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = format!(
        "{:>w0$}  {:<w1$}  {:<w2$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    let _ = writeln!(out, "{}", header.trim_end().bold());

    for [no, code, name] in &cells {
        let line = format!(
            "{:>w0$}  {:<w1$}  {}",
            no,
            code,
            name,
            w0 = widths[0],
            w1 = widths[1]
        );
        let _ = writeln!(out, "{}", line);
    }

    let summary = format!("{} students", students.len());
    let _ = writeln!(out, "{}", summary.dimmed());
    out
}

pub fn render_json(students: &[StudentRow]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(students).context("Failed to serialize students")?;
    json.push('\n');
    Ok(json)
}

pub fn render_csv(students: &[StudentRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(HEADERS)
        .context("Failed to write CSV header")?;

    for student in students {
        wtr.write_record([student.no.to_string(), student.code.clone(), student.name.clone()])
            .with_context(|| format!("Failed to write student: {}", student.code))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write a single `Students` sheet with a No/Code/Name header
pub fn write_xlsx(students: &[StudentRow], path: &Path) -> Result<()> {
    let mut workbook = build_xlsx(students)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Wrote {} students to {}", students.len(), path.display());
    Ok(())
}

fn build_xlsx(students: &[StudentRow]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (row_idx, student) in students.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        match &student.no {
            Ordinal::Int(i) => {
                worksheet.write_number(row, 0, *i as f64)?;
            }
            Ordinal::Float(f) => {
                worksheet.write_number(row, 0, *f)?;
            }
            Ordinal::Text(s) => {
                worksheet.write_string(row, 0, s)?;
            }
        }
        worksheet.write_string(row, 1, &student.code)?;
        worksheet.write_string(row, 2, &student.name)?;
    }

    Ok(workbook)
}
