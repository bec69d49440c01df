//! Library error type.
//!
//! Extractor and reporter errors are folded into [`BomDiffError`], which
//! carries a human-readable context trail built up with [`ErrorContext`].

use crate::config::ConfigFileError;
use crate::parsers::ExtractError;
use crate::reports::ReportError;
use thiserror::Error;

/// Main error type for bom-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomDiffError {
    /// An input could not be turned into records (strict mode only)
    #[error("Failed to extract records: {context}")]
    Extract {
        context: String,
        #[source]
        source: ExtractErrorKind,
    },

    /// A report could not be rendered
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Why extraction failed
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractErrorKind {
    #[error("malformed XML: {0}")]
    InvalidXml(String),

    #[error("unreadable CSV: {0}")]
    InvalidCsv(String),

    #[error("malformed netlist: {0}")]
    InvalidNetlist(String),

    #[error("no component records")]
    NoRecords,
}

/// Why report rendering failed
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("formatting failed")]
    Format(#[source] std::fmt::Error),
}

/// Convenient Result type for bom-tools operations
pub type Result<T> = std::result::Result<T, BomDiffError>;

impl BomDiffError {
    /// Create an extraction error with context
    pub fn extract(context: impl Into<String>, source: ExtractErrorKind) -> Self {
        Self::Extract {
            context: context.into(),
            source,
        }
    }

    /// The context trail, outermost first
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::Extract { context, .. } | Self::Report { context, .. } | Self::Io { context, .. } => {
                context
            }
            Self::Config(message) => message,
        }
    }

    fn push_context(self, outer: &str) -> Self {
        match self {
            Self::Extract { context, source } => Self::Extract {
                context: chain_context(outer, &context),
                source,
            },
            Self::Report { context, source } => Self::Report {
                context: chain_context(outer, &context),
                source,
            },
            Self::Io { context, source } => Self::Io {
                context: chain_context(outer, &context),
                source,
            },
            Self::Config(message) => Self::Config(chain_context(outer, &message)),
        }
    }
}

impl From<std::io::Error> for BomDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            context: String::new(),
            source: err,
        }
    }
}

impl From<ExtractError> for BomDiffError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::XmlError(msg) => Self::extract("", ExtractErrorKind::InvalidXml(msg)),
            ExtractError::CsvError(msg) => Self::extract("", ExtractErrorKind::InvalidCsv(msg)),
            ExtractError::NetlistError(msg) => {
                Self::extract("", ExtractErrorKind::InvalidNetlist(msg))
            }
            ExtractError::NoRecords(source) => {
                Self::extract(format!("in {source}"), ExtractErrorKind::NoRecords)
            }
        }
    }
}

impl From<ReportError> for BomDiffError {
    fn from(err: ReportError) -> Self {
        let source = match err {
            ReportError::IoError(e) => return Self::from(e),
            ReportError::ConfigError(msg) => return Self::Config(msg),
            ReportError::SerializationError(msg) => ReportErrorKind::Serialization(msg),
            ReportError::FormatError(e) => ReportErrorKind::Format(e),
        };
        Self::Report {
            context: String::new(),
            source,
        }
    }
}

impl From<ConfigFileError> for BomDiffError {
    fn from(err: ConfigFileError) -> Self {
        match err {
            ConfigFileError::Io(e) => Self::from(e),
            other => Self::Config(other.to_string()),
        }
    }
}

/// Extension trait for adding context to errors.
///
/// # Example
///
/// ```
/// use bom_tools::error::{ErrorContext, Result};
///
/// fn read_bom(path: &str) -> Result<String> {
///     std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
/// }
///
/// let err = read_bom("/nonexistent/bom.xml").unwrap_err();
/// assert!(err.to_string().contains("reading /nonexistent/bom.xml"));
/// ```
pub trait ErrorContext<T> {
    /// Prepend `context` to the error's context trail.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`ErrorContext::context`], evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BomDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let outer = context.into();
        self.map_err(|e| e.into().push_context(&outer))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().push_context(&f().into()))
    }
}

fn chain_context(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (_, true) => outer.to_string(),
        (true, false) => inner.to_string(),
        (false, false) => format!("{outer}: {inner}"),
    }
}
