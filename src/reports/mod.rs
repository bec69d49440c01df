//! Report generation for reconciliation results.
//!
//! This module renders a [`ReconciliationResult`] (or a single record set in
//! view mode) into one of four formats:
//! - Text: counts, warnings and a per-bucket listing for the terminal
//! - JSON: the result plus file names, hashes and a timestamp
//! - CSV: one row per added/removed record, two per changed record
//! - HTML: a self-contained page with per-field highlighting
//!
//! Reporters only build strings. Writing them anywhere is the caller's job.
//!
//! # Security
//!
//! Record fields come straight from uploaded files. The [`escape`] module
//! must be used for every value embedded in HTML or printed to a terminal.

mod csv;
pub mod escape;
mod html;
mod json;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::ReconciliationResult;
use crate::model::RecordSet;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<::csv::Error> for ReportError {
    fn from(err: ::csv::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a reconciliation result
    fn generate_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a listing of a single record set (view mode)
    fn generate_view_report(
        &self,
        records: &RecordSet,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a diff report to a writer
    fn write_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Text => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

/// Render `result` in `format` without colour.
///
/// This is the plain export entry point: result in, string out.
pub fn format_report(
    result: &ReconciliationResult,
    format: ReportFormat,
    config: &ReportConfig,
) -> Result<String, ReportError> {
    create_reporter_with_options(format, false).generate_diff_report(result, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_formats() {
        for format in [
            ReportFormat::Text,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Html,
        ] {
            assert_eq!(create_reporter(format).format(), format);
        }
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Text);
    }

    #[test]
    fn test_write_diff_report() {
        let reporter = create_reporter(ReportFormat::Csv);
        let mut buf = Vec::new();
        reporter
            .write_diff_report(&ReconciliationResult::new(), &ReportConfig::default(), &mut buf)
            .expect("write");
        assert!(String::from_utf8_lossy(&buf).starts_with("\"Change Type\""));
    }
}
