//! Configuration file handling
//!
//! Settings live in `~/.config/gradebook-cli/config.toml` (platform config
//! dir). A missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::import::ColumnNames;
use crate::output::OutputFormat;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "GRADEBOOK_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Header names of the columns to import
    pub columns: ColumnNames,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub format: OutputFormat,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradebook-cli")
            .join("config.toml")
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file at the default location yields the defaults; a missing
    /// file the user named is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file does not exist: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::default_path();
                if !path.exists() {
                    log::debug!("No config at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.columns.code, "Code");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_columns() {
        let config = Config::from_toml(
            r#"
            [columns]
            code = "Student ID"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.columns.code, "Student ID");
        assert_eq!(config.columns.name, "Name");
        assert_eq!(config.columns.number, "No");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Config::from_toml("[output]\nformat = \"pdf\"\n").is_err());
    }

    #[test]
    fn test_missing_named_file_is_error() {
        let path = std::env::temp_dir().join(format!("gradebook-{}.toml", uuid::Uuid::new_v4()));
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Config file does not exist"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("gradebook-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[columns]\nname = \"Full Name\"\n").unwrap();

        let config = Config::load(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.unwrap().columns.name, "Full Name");
    }
}
