//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangedComponent, ReconciliationResult};
use crate::model::{ComponentRecord, FileKind, RecordSet};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output; `None` defers to the report config
    pretty: Option<bool>,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: None }
    }

    /// Force pretty printing on or off
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    fn render<T: Serialize>(&self, value: &T, config: &ReportConfig) -> Result<String, ReportError> {
        let json = if self.pretty.unwrap_or(config.pretty) {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo::current(),
                generated_at: Utc::now().to_rfc3339(),
                title: config.title.clone(),
                old_file: config.metadata.old_file.clone(),
                new_file: config.metadata.new_file.clone(),
                old_content_hash: config.metadata.old_content_hash.map(format_hash),
                new_content_hash: config.metadata.new_content_hash.map(format_hash),
            },
            comparison: JsonComparison {
                result,
                added_components: config.legacy_keys.then_some(result.added.as_slice()),
                deleted_components: config.legacy_keys.then_some(result.removed.as_slice()),
                changed_components: config.legacy_keys.then_some(result.changed.as_slice()),
            },
        };
        self.render(&report, config)
    }

    fn generate_view_report(
        &self,
        records: &RecordSet,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonViewReport {
            metadata: JsonViewMetadata {
                tool: ToolInfo::current(),
                generated_at: Utc::now().to_rfc3339(),
                file: records.source.clone(),
                kind: records.kind,
                content_hash: format_hash(records.content_hash()),
            },
            count: records.len(),
            records: records.records(),
        };
        self.render(&report, config)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

/// Hashes are emitted as fixed-width hex so JSON consumers never round them.
fn format_hash(hash: u64) -> String {
    format!("{hash:016x}")
}

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    comparison: JsonComparison<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    old_file: Option<String>,
    new_file: Option<String>,
    old_content_hash: Option<String>,
    new_content_hash: Option<String>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

impl ToolInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonComparison<'a> {
    #[serde(flatten)]
    result: &'a ReconciliationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_components: Option<&'a [ComponentRecord]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_components: Option<&'a [ComponentRecord]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changed_components: Option<&'a [ChangedComponent]>,
}

#[derive(Serialize)]
struct JsonViewReport<'a> {
    metadata: JsonViewMetadata,
    count: usize,
    records: &'a [ComponentRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonViewMetadata {
    tool: ToolInfo,
    generated_at: String,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<FileKind>,
    content_hash: String,
}
