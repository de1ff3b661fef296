//! Import command handler

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use colored::*;
use futures::future::join_all;

use super::ImportCommands;
use crate::config::Config;
use crate::error::ImportError;
use crate::import::{ColumnNames, PathSource, StudentRow, import_students_with};
use crate::output::{OutputFormat, emit};

/// Outcome of importing several files
#[derive(Debug, Default)]
pub struct ImportBatch {
    /// Records from every successful file, in argument order
    pub students: Vec<StudentRow>,
    pub failures: Vec<(PathBuf, ImportError)>,
}

/// Import every file concurrently; each call gets its own buffer
pub async fn import_files(files: &[PathBuf], columns: &ColumnNames) -> ImportBatch {
    let sources: Vec<PathSource> = files.iter().map(PathSource::new).collect();

    let results = join_all(
        sources
            .iter()
            .map(|source| import_students_with(source, columns)),
    )
    .await;

    let mut batch = ImportBatch::default();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(students) => batch.students.extend(students),
            Err(e) => {
                log::error!("Import failed: {}", e);
                batch.failures.push((source.path().to_path_buf(), e));
            }
        }
    }

    batch
}

/// Handle the import command
pub async fn handle_import_command(args: ImportCommands, config: &Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let format = args.format.unwrap_or(config.output.format);
    if format == OutputFormat::Xlsx && args.output.is_none() {
        bail!("xlsx output needs a file: pass --output <path>");
    }

    let start = Instant::now();
    let mut batch = import_files(&args.files, &config.columns).await;
    log::info!(
        "Imported {} students from {} files in {:.2}ms",
        batch.students.len(),
        args.files.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    // A single file reports its own error
    if args.files.len() == 1 {
        if let Some((path, e)) = batch.failures.pop() {
            return Err(e).with_context(|| format!("Failed to import {}", path.display()));
        }
    }

    emit(&batch.students, format, args.output.as_deref())?;

    if !batch.failures.is_empty() {
        for (path, e) in &batch.failures {
            eprintln!("{} {}: {}", "failed".red().bold(), path.display(), e);
        }
        bail!(
            "{} of {} files failed to import",
            batch.failures.len(),
            args.files.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::Ordinal;

    fn temp_csv(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gradebook-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_files_keeps_argument_order() {
        let first = temp_csv("Code,Name\nA1,ann\n");
        let second = temp_csv("No,Code,Name\n4,B1,bob\n");
        let missing = std::env::temp_dir().join(format!("gradebook-{}.csv", uuid::Uuid::new_v4()));

        let files = vec![first.clone(), missing.clone(), second.clone()];
        let batch = import_files(&files, &ColumnNames::default()).await;

        let _ = std::fs::remove_file(&first);
        let _ = std::fs::remove_file(&second);

        assert_eq!(
            batch.students,
            vec![
                StudentRow::new(Ordinal::Int(1), "A1", "Ann"),
                StudentRow::new(Ordinal::Int(4), "B1", "Bob"),
            ]
        );
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].0, missing);
        assert!(batch.failures[0].1.is_read());
    }

    #[tokio::test]
    async fn test_handle_import_single_missing_file_errors() {
        let missing = std::env::temp_dir().join(format!("gradebook-{}.xlsx", uuid::Uuid::new_v4()));
        let args = ImportCommands {
            files: vec![missing],
            format: Some(OutputFormat::Json),
            output: None,
            no_color: true,
        };

        let err = handle_import_command(args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to import"));
    }

    #[tokio::test]
    async fn test_handle_import_writes_output_file() {
        let input = temp_csv("No,Code,Name\n,A1,jane doe\n,,john\n5,B2,AL SMITH\n");
        let output = std::env::temp_dir().join(format!("gradebook-{}.json", uuid::Uuid::new_v4()));
        let args = ImportCommands {
            files: vec![input.clone()],
            format: Some(OutputFormat::Json),
            output: Some(output.clone()),
            no_color: true,
        };

        let result = handle_import_command(args, &Config::default()).await;
        let written = std::fs::read_to_string(&output);
        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);

        result.unwrap();
        let students: Vec<StudentRow> = serde_json::from_str(&written.unwrap()).unwrap();
        assert_eq!(
            students,
            vec![
                StudentRow::new(Ordinal::Int(1), "A1", "Jane Doe"),
                StudentRow::new(Ordinal::Int(5), "B2", "Al Smith"),
            ]
        );
    }
}
