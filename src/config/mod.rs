//! Configuration module for bom-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use bom_tools::config::{AppConfig, ConfigPreset};
//! use bom_tools::diff::DuplicatePolicy;
//!
//! // Use defaults
//! let config = AppConfig::default();
//! assert!(!config.extraction.strict);
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert!(config.extraction.strict);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .duplicate_policy(DuplicatePolicy::FirstWins)
//!     .fail_on_change(true)
//!     .build();
//! assert!(config.behavior.fail_on_change);
//! ```
//!
//! # Configuration File
//!
//! Place a `.bom-tools.yaml` file in your project root or `~/.config/bom-tools/`:
//!
//! ```yaml
//! reconciliation:
//!   duplicate_policy: exclude
//! behavior:
//!   fail_on_warning: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, ExtractionConfig,
    OutputConfig, ReconciliationConfig, ViewConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_over, overlay_config_file, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.bom-tools.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
