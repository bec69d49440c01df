//! Pipeline orchestration for BOM operations.
//!
//! This module provides the shared read → extract → reconcile → report
//! workflow used by the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{compute_diff, determine_exit_code};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{load_pair, load_records};
pub use report_stage::{output_report, output_view_report, render_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read an input file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to extract records from an input file
    #[error("Extraction failed for {path}: {source}")]
    ExtractFailed {
        path: String,
        #[source]
        source: crate::error::BomDiffError,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success (or changes found without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// Validation warnings were produced
    pub const WARNINGS_PRESENT: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
