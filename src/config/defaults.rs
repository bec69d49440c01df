//! Named configuration presets.

use super::types::{AppConfig, BehaviorConfig, ExtractionConfig, OutputConfig, ReconciliationConfig};
use crate::diff::DuplicatePolicy;
use crate::reports::ReportFormat;

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Lenient extraction, last duplicate wins, text output
    Default,
    /// Strict extraction, duplicates excluded, fail on warnings
    Strict,
    /// JSON output without color, fail on changes
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" => Some(Self::Strict),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Lenient extraction and human-readable output",
            Self::Strict => "Reject malformed files and ambiguous reference designators",
            Self::CiCd => "Machine-readable output with a non-zero exit on any change",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Strict preset.
    ///
    /// - Malformed input is an error
    /// - Duplicated reference designators are left out of the comparison
    /// - Exit with code 2 when any warning is produced
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            extraction: ExtractionConfig {
                strict: true,
                skip_header: false,
            },
            reconciliation: ReconciliationConfig {
                duplicate_policy: DuplicatePolicy::Exclude,
                include_unchanged: false,
            },
            output: OutputConfig::default(),
            behavior: BehaviorConfig {
                fail_on_change: false,
                fail_on_warning: true,
                quiet: false,
            },
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - Compact JSON for machine parsing
    /// - Fail on any change
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            reconciliation: ReconciliationConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                no_color: true,
                pretty: false,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                fail_on_warning: false,
                quiet: true,
            },
        }
    }
}
