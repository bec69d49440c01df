//! Extractor trait definitions and error types.
//!
//! This module defines the `RecordExtractor` trait implemented by each input
//! kind, plus the confidence scale used when the kind has to be sniffed.

use crate::model::{FileKind, RecordSet};
use thiserror::Error;

/// Errors raised by an extractor in strict mode.
///
/// In the default lenient mode these are logged and turned into an empty
/// [`RecordSet`] by [`RecordExtractor::extract`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("CSV parse error: {0}")]
    CsvError(String),

    #[error("Malformed netlist: {0}")]
    NetlistError(String),

    #[error("No component records found in {0}")]
    NoRecords(String),
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlError(err.to_string())
    }
}

impl From<csv::Error> for ExtractError {
    fn from(err: csv::Error) -> Self {
        Self::CsvError(err.to_string())
    }
}

/// Confidence level for kind detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// Definitely not this kind
    pub const NONE: Self = Self(0.0);
    /// Might be this kind
    pub const LOW: Self = Self(0.25);
    /// Likely this kind
    pub const MEDIUM: Self = Self(0.5);
    /// Almost certainly this kind
    pub const HIGH: Self = Self(0.75);
    /// Definitely this kind
    pub const CERTAIN: Self = Self(1.0);

    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence is high enough to pick the extractor
    #[must_use]
    pub fn can_extract(&self) -> bool {
        self.0 >= Self::LOW.0
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Trait for input-kind specific record extractors.
///
/// Implementors provide `try_extract`; callers normally use `extract`, which
/// never fails and returns an empty set for unusable input.
pub trait RecordExtractor {
    /// The file kind this extractor understands
    fn kind(&self) -> FileKind;

    /// Extract records, reporting structural problems as errors
    fn try_extract(&self, content: &str, source: &str) -> Result<RecordSet, ExtractError>;

    /// Lenient extraction: malformed input yields an empty set
    fn extract(&self, content: &str, source: &str) -> RecordSet {
        match self.try_extract(content, source) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(
                    "Could not extract {} records from {}: {}",
                    self.kind(),
                    source,
                    err
                );
                RecordSet::new(source).with_kind(self.kind())
            }
        }
    }

    /// Lightweight content check used when the kind is not declared
    fn detect(&self, content: &str) -> FormatConfidence;
}
