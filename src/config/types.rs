//! Configuration types for bom-tools operations.
//!
//! Provides structured configuration for diff and view operations.

use crate::diff::{DuplicatePolicy, Reconciler};
use crate::model::FileKind;
use crate::reports::{ReportConfig, ReportFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments override file settings; see [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Input extraction settings
    pub extraction: ExtractionConfig,
    /// Reconciliation settings (duplicates, unchanged records)
    pub reconciliation: ReconciliationConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Turn malformed input into an error instead of an empty record set.
    pub const fn strict(mut self, strict: bool) -> Self {
        self.config.extraction.strict = strict;
        self
    }

    /// Skip the first CSV row.
    pub const fn skip_header(mut self, skip: bool) -> Self {
        self.config.extraction.skip_header = skip;
        self
    }

    /// Set the duplicate reference policy.
    pub const fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.reconciliation.duplicate_policy = policy;
        self
    }

    /// Include unchanged records in the result.
    pub const fn include_unchanged(mut self, include: bool) -> Self {
        self.config.reconciliation.include_unchanged = include;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Emit the legacy JSON key aliases.
    pub const fn legacy_keys(mut self, legacy: bool) -> Self {
        self.config.output.legacy_keys = legacy;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable fail-on-warning mode.
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_warning = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Operation Configurations
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Explicit file kinds; sniffed from name and content when `None`
    pub old_kind: Option<FileKind>,
    pub new_kind: Option<FileKind>,
    pub extraction: ExtractionConfig,
    pub reconciliation: ReconciliationConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Combine input paths with the resolved application config.
    #[must_use]
    pub fn from_app(paths: DiffPaths, app: &AppConfig) -> Self {
        Self {
            paths,
            old_kind: None,
            new_kind: None,
            extraction: app.extraction.clone(),
            reconciliation: app.reconciliation.clone(),
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }

    /// Force the kind of both inputs.
    #[must_use]
    pub const fn with_kinds(mut self, old: Option<FileKind>, new: Option<FileKind>) -> Self {
        self.old_kind = old;
        self.new_kind = new;
        self
    }
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the old (baseline) file
    pub old: PathBuf,
    /// Path to the new file
    pub new: PathBuf,
}

/// Configuration for view operations
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Path to the BOM or netlist file
    pub path: PathBuf,
    /// Explicit file kind; sniffed when `None`
    pub kind: Option<FileKind>,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl ViewConfig {
    #[must_use]
    pub fn from_app(path: PathBuf, app: &AppConfig) -> Self {
        Self {
            path,
            kind: None,
            extraction: app.extraction.clone(),
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Input extraction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Report malformed input as an error instead of yielding no records
    pub strict: bool,
    /// Treat the first CSV row as a header and skip it
    pub skip_header: bool,
}

/// Reconciliation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// What to do with a reference designator that appears more than once in a file
    pub duplicate_policy: DuplicatePolicy,
    /// Keep unchanged records in the result
    pub include_unchanged: bool,
}

impl ReconciliationConfig {
    /// Build the reconciler these settings describe.
    #[must_use]
    pub const fn reconciler(&self) -> Reconciler {
        Reconciler::new()
            .with_duplicate_policy(self.duplicate_policy)
            .include_unchanged(self.include_unchanged)
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Report title; derived from the file names when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Disable colored output
    pub no_color: bool,
    /// Pretty-print JSON
    pub pretty: bool,
    /// Also emit `addedComponents`/`deletedComponents`/`changedComponents` in JSON
    pub legacy_keys: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            title: None,
            no_color: false,
            pretty: true,
            legacy_keys: false,
        }
    }
}

impl OutputConfig {
    /// Report settings for a comparison of `old` against `new`.
    #[must_use]
    pub fn report_config(&self, old: &str, new: &str, include_unchanged: bool) -> ReportConfig {
        let mut config = ReportConfig::for_files(old, new);
        config.title.clone_from(&self.title);
        config.pretty = self.pretty;
        config.legacy_keys = self.legacy_keys;
        config.include_unchanged = include_unchanged;
        config
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Exit with code 2 if validation warnings were produced
    pub fail_on_warning: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .strict(true)
            .duplicate_policy(DuplicatePolicy::Exclude)
            .output_format(ReportFormat::Json)
            .fail_on_warning(true)
            .build();
        assert!(config.extraction.strict);
        assert_eq!(config.reconciliation.duplicate_policy, DuplicatePolicy::Exclude);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_warning);
        assert!(!config.behavior.fail_on_change);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.output.format, ReportFormat::Auto);
        assert!(config.output.pretty);
        assert_eq!(config.reconciliation.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_report_config_from_output() {
        let output = OutputConfig {
            title: Some("Rev B".to_string()),
            legacy_keys: true,
            ..OutputConfig::default()
        };
        let report = output.report_config("a.xml", "b.xml", true);
        assert_eq!(report.title_or_default(), "Rev B");
        assert_eq!(report.old_label(), "a.xml");
        assert!(report.legacy_keys);
        assert!(report.include_unchanged);
    }

    #[test]
    fn test_yaml_partial_sections() {
        let config: AppConfig =
            serde_yaml::from_str("reconciliation:\n  duplicate_policy: first-wins\n")
                .expect("yaml");
        assert_eq!(config.reconciliation.duplicate_policy, DuplicatePolicy::FirstWins);
        assert_eq!(config.output, OutputConfig::default());
    }
}
