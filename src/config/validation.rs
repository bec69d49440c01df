//! Configuration validation for bom-tools.

use super::types::{
    AppConfig, BehaviorConfig, DiffConfig, ExtractionConfig, OutputConfig, ReconciliationConfig,
    ViewConfig,
};
use crate::reports::ReportFormat;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.extraction.validate());
        errors.extend(self.reconciliation.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for ExtractionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for ReconciliationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                errors.push(ConfigError::new("output.title", "Title must not be blank"));
            }
        }

        if self.legacy_keys && !matches!(self.format, ReportFormat::Json | ReportFormat::Auto) {
            errors.push(ConfigError::new(
                "output.legacy_keys",
                format!("Legacy keys only apply to JSON output, not {}", self.format),
            ));
        }

        errors
    }
}

fn check_input(field: &str, path: &Path, errors: &mut Vec<ConfigError>) {
    if !path.exists() {
        errors.push(ConfigError::new(
            field,
            format!("File not found: {}", path.display()),
        ));
    } else if path.is_dir() {
        errors.push(ConfigError::new(
            field,
            format!("Expected a file, found a directory: {}", path.display()),
        ));
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_input("paths.old", &self.paths.old, &mut errors);
        check_input("paths.new", &self.paths.new, &mut errors);
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_input("path", &self.path, &mut errors);
        errors.extend(self.output.validate());
        errors
    }
}
