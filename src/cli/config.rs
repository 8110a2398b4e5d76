//! TOML configuration file support.
//!
//! ```toml
//! # ndskl.toml
//! [reader]
//! comment_char = "#"
//! table_row_counts = true
//! sections = ["critical_points", "filaments"]
//!
//! [export]
//! compression_level = 15
//! row_group_size = 200000
//! write_statistics = true
//! ```
//!
//! Command line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use ndskl::export::{CompressionType, ExportConfig};
use ndskl::reader::{ReaderConfig, Section, SectionSet};

/// Root configuration structure for ndskl.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Parser settings.
    #[serde(default)]
    pub reader: ReaderSettings,

    /// Parquet export settings.
    #[serde(default)]
    pub export: ExportSettings,
}

/// `[reader]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ReaderSettings {
    /// Comment line prefix.
    pub comment_char: Option<char>,

    /// Whether data sections carry a row-count line after the column names.
    pub table_row_counts: Option<bool>,

    /// Sections to decode, by marker or snake-case name.
    pub sections: Option<Vec<String>>,
}

/// `[export]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSettings {
    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Write column chunk statistics.
    pub write_statistics: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Reader configuration; non-empty `sections` replaces the file's list.
    pub fn reader_config(&self, sections: &[Section]) -> Result<ReaderConfig> {
        let mut config = ReaderConfig::default();
        if let Some(c) = self.reader.comment_char {
            config.comment_char = c;
        }
        if let Some(counts) = self.reader.table_row_counts {
            config.table_row_counts = counts;
        }
        if !sections.is_empty() {
            config.sections = sections.iter().copied().collect();
        } else if let Some(names) = &self.reader.sections {
            config.sections = names
                .iter()
                .map(|name| name.parse::<Section>().map_err(anyhow::Error::msg))
                .collect::<Result<SectionSet>>()
                .context("Invalid [reader] sections")?;
        }
        Ok(config)
    }

    /// Export configuration starting from `base`, flag values winning over file values.
    pub fn export_config(
        &self,
        base: ExportConfig,
        compression_level: Option<i32>,
        row_group_size: Option<usize>,
    ) -> ExportConfig {
        let mut config = base;
        if let Some(level) = compression_level.or(self.export.compression_level) {
            config.compression = CompressionType::Zstd(level);
        }
        if let Some(size) = row_group_size.or(self.export.row_group_size) {
            config.row_group_size = size;
        }
        if let Some(stats) = self.export.write_statistics {
            config.write_statistics = stats;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [reader]
            comment_char = "%"
            table_row_counts = false
            sections = ["filaments", "[FILAMENTS DATA]"]

            [export]
            compression_level = 15
            row_group_size = 200000
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.reader.comment_char, Some('%'));
        assert_eq!(config.export.compression_level, Some(15));

        let reader = config.reader_config(&[]).unwrap();
        assert_eq!(reader.comment_char, '%');
        assert!(!reader.table_row_counts);
        assert!(reader.sections.contains(Section::Filaments));
        assert!(reader.sections.contains(Section::FilamentsData));
        assert!(!reader.sections.contains(Section::CriticalPoints));

        let export = config.export_config(ExportConfig::default(), None, None);
        assert_eq!(export.compression, CompressionType::Zstd(15));
        assert_eq!(export.row_group_size, 200_000);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::from_str(
            r#"
            [reader]
            sections = ["filaments"]
            [export]
            compression_level = 15
        "#,
        )
        .unwrap();

        let reader = config.reader_config(&[Section::CriticalPoints]).unwrap();
        assert!(reader.sections.contains(Section::CriticalPoints));
        assert!(!reader.sections.contains(Section::Filaments));

        let export = config.export_config(ExportConfig::fast(), Some(3), Some(10));
        assert_eq!(export.compression, CompressionType::Zstd(3));
        assert_eq!(export.row_group_size, 10);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let config = Config::from_str(
            r#"
            [reader]
            sections = ["vertices"]
        "#,
        )
        .unwrap();
        assert!(config.reader_config(&[]).is_err());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.export.compression_level, None);
        let reader = config.reader_config(&[]).unwrap();
        assert_eq!(reader.sections, SectionSet::all());
    }
}
