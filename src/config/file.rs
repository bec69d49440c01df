//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use super::ConfigPreset;
use crate::diff::DuplicatePolicy;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".bom-tools.yaml",
    ".bom-tools.yml",
    "bom-tools.yaml",
    "bom-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/bom-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) = user_config_dir().and_then(|dir| find_config_in_dir(&dir)) {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Per-user configuration directory (`~/.config/bom-tools` on Linux).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bom-tools"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file deserializes as YAML null
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Apply a config file on top of `base`.
///
/// Only keys present in the file change the result, so a file can set a
/// value back to its default after a preset moved it.
pub fn overlay_config_file(base: &AppConfig, path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(base.clone());
    }
    let overlay: serde_yaml::Value = serde_yaml::from_str(&content)?;
    let mut merged = serde_yaml::to_value(base)?;
    overlay_yaml(&mut merged, overlay);
    Ok(serde_yaml::from_value(merged)?)
}

fn overlay_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    use serde_yaml::Value;

    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => overlay_yaml(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        // A bare `key:` leaves the lower layer alone
        (_, Value::Null) => {}
        (slot, value) => *slot = value,
    }
}

/// Apply the discovered config file over `base`, or return `base` unchanged.
#[must_use]
pub fn load_over(base: AppConfig, explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (base, None);
    };
    match overlay_config_file(&base, &path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            (base, None)
        }
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge CLI overrides into this config, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults count as set, so a config
    /// built from unset flags leaves file values alone. Config files go
    /// through [`overlay_config_file`] instead.
    pub fn merge(&mut self, other: &Self) {
        if other.extraction.strict {
            self.extraction.strict = true;
        }
        if other.extraction.skip_header {
            self.extraction.skip_header = true;
        }

        if other.reconciliation.duplicate_policy != DuplicatePolicy::default() {
            self.reconciliation.duplicate_policy = other.reconciliation.duplicate_policy;
        }
        if other.reconciliation.include_unchanged {
            self.reconciliation.include_unchanged = true;
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.title.is_some() {
            self.output.title.clone_from(&other.output.title);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if !other.output.pretty {
            self.output.pretty = false;
        }
        if other.output.legacy_keys {
            self.output.legacy_keys = true;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_warning {
            self.behavior.fail_on_warning = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Effective configuration: the preset (or defaults), then the
    /// discovered config file, then CLI overrides.
    #[must_use]
    pub fn layered(
        preset: Option<ConfigPreset>,
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let base = preset.map_or_else(Self::default, Self::from_preset);
        let (mut config, loaded_from) = load_over(base, config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# BOM Diff Configuration
# Place this file at .bom-tools.yaml in your project root or ~/.config/bom-tools/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# BOM Diff Configuration File
# ============================
#
# This file configures bom-tools behavior. Place it at:
#   - .bom-tools.yaml in your project root
#   - ~/.config/bom-tools/bom-tools.yaml for global config
#
# CLI arguments always override file settings.

# Input extraction
extraction:
  # Fail on malformed XML instead of treating the file as empty
  strict: false
  # Skip the first row of CSV files
  skip_header: false

# Reconciliation
reconciliation:
  # Repeated reference designators: last-wins, first-wins, exclude
  duplicate_policy: last-wins
  # List unchanged components in reports
  include_unchanged: false

# Output configuration
output:
  # Format: auto, text, json, csv, html
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  # Report title (default: derived from file names)
  # title: Rev B vs Rev C
  no_color: false
  pretty: true
  # Also emit addedComponents/deletedComponents/changedComponents in JSON
  legacy_keys: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Exit with code 2 if validation warnings were produced
  fail_on_warning: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}
