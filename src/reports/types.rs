//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pick from the output file extension, text otherwise
    #[default]
    Auto,
    /// Plain-text summary (ANSI colour on terminals)
    #[value(alias = "summary")]
    Text,
    /// Structured JSON with report metadata
    Json,
    /// CSV for spreadsheet import
    Csv,
    /// Self-contained HTML document
    Html,
}

impl ReportFormat {
    /// Format implied by a file extension, if any
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Conventional file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Auto | Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// File names, hashes and tool version
    pub metadata: ReportMetadata,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Also emit `addedComponents` / `deletedComponents` /
    /// `changedComponents` in JSON output
    pub legacy_keys: bool,
    /// List unchanged records when the result carries them
    pub include_unchanged: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            metadata: ReportMetadata::new(),
            pretty: true,
            legacy_keys: false,
            include_unchanged: false,
        }
    }
}

impl ReportConfig {
    /// Config carrying the two input file names
    pub fn for_files(old_file: impl Into<String>, new_file: impl Into<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                old_file: Some(old_file.into()),
                new_file: Some(new_file.into()),
                ..ReportMetadata::new()
            },
            ..Self::default()
        }
    }

    /// Title to print, falling back to a generic one
    #[must_use]
    pub fn title_or_default(&self) -> String {
        self.title.clone().unwrap_or_else(|| match (&self.metadata.old_file, &self.metadata.new_file) {
            (Some(old), Some(new)) => format!("BOM Comparison: {old} vs {new}"),
            _ => "BOM Comparison Report".to_string(),
        })
    }

    /// Old file label for display
    #[must_use]
    pub fn old_label(&self) -> &str {
        self.metadata.old_file.as_deref().unwrap_or("old")
    }

    /// New file label for display
    #[must_use]
    pub fn new_label(&self) -> &str {
        self.metadata.new_file.as_deref().unwrap_or("new")
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old input file name
    pub old_file: Option<String>,
    /// New input file name
    pub new_file: Option<String>,
    /// Content hash of the old record set
    pub old_content_hash: Option<u64>,
    /// Content hash of the new record set
    pub new_content_hash: Option<u64>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(ReportFormat::from_extension("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_extension("htm"), Some(ReportFormat::Html));
        assert_eq!(ReportFormat::from_extension("xlsx"), None);
    }

    #[test]
    fn test_title_default() {
        let config = ReportConfig::for_files("a.xml", "b.xml");
        assert_eq!(config.title_or_default(), "BOM Comparison: a.xml vs b.xml");
        assert_eq!(ReportConfig::default().title_or_default(), "BOM Comparison Report");
        assert_eq!(ReportConfig::default().old_label(), "old");
    }

    #[test]
    fn test_metadata_has_version() {
        assert_eq!(ReportMetadata::new().tool_version, env!("CARGO_PKG_VERSION"));
    }
}
