//! Report output stage.
//!
//! Resolves the effective format and colour, builds the report config and
//! writes the rendered report to a file or stdout.

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};
use crate::config::{DiffConfig, ViewConfig};
use crate::diff::ReconciliationResult;
use crate::model::RecordSet;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat};
use anyhow::{Context, Result};

/// Render a diff report in an already-resolved format.
pub fn render_report(
    format: ReportFormat,
    use_color: bool,
    result: &ReconciliationResult,
    config: &ReportConfig,
) -> Result<String> {
    let reporter = create_reporter_with_options(format, use_color);
    reporter
        .generate_diff_report(result, config)
        .with_context(|| format!("Failed to generate {format} report"))
}

/// Colour only makes sense for text written to a terminal.
fn color_for(no_color: bool, target: &OutputTarget) -> bool {
    should_use_color(no_color) && target.is_terminal()
}

/// Output a diff report to the configured destination.
pub fn output_report(
    config: &DiffConfig,
    result: &ReconciliationResult,
    old: &RecordSet,
    new: &RecordSet,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_format = auto_detect_format(config.output.format, &output_target);

    let mut report_config = config.output.report_config(
        &config.paths.old.display().to_string(),
        &config.paths.new.display().to_string(),
        config.reconciliation.include_unchanged,
    );
    report_config.metadata.old_content_hash = Some(old.content_hash());
    report_config.metadata.new_content_hash = Some(new.content_hash());

    let use_color = color_for(config.output.no_color, &output_target);
    let report = render_report(effective_format, use_color, result, &report_config)?;

    write_output(&report, &output_target, config.behavior.quiet)
}

/// Output a single record set listing to the configured destination.
pub fn output_view_report(config: &ViewConfig, records: &RecordSet) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_format = auto_detect_format(config.output.format, &output_target);

    let report_config = ReportConfig {
        title: config.output.title.clone(),
        pretty: config.output.pretty,
        ..ReportConfig::default()
    };

    let use_color = color_for(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(effective_format, use_color);
    let report = reporter
        .generate_view_report(records, &report_config)
        .with_context(|| format!("Failed to generate {effective_format} listing"))?;

    write_output(&report, &output_target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::diff::reconcile;
    use crate::model::ComponentRecord;
    use tempfile::TempDir;

    fn sets() -> (RecordSet, RecordSet) {
        (
            RecordSet::from_records("old.csv", vec![ComponentRecord::new("R1").with_quantity(1)]),
            RecordSet::from_records("new.csv", vec![ComponentRecord::new("R1").with_quantity(2)]),
        )
    }

    #[test]
    fn test_output_report_format_from_extension() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.json");
        let app = AppConfig::builder().output_file(Some(out.clone())).quiet(true).build();
        let config = DiffConfig::from_app(
            DiffPaths {
                old: "old.csv".into(),
                new: "new.csv".into(),
            },
            &app,
        );
        let (old, new) = sets();
        let result = reconcile(&old, &new);

        output_report(&config, &result, &old, &new).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["metadata"]["oldFile"], "old.csv");
        assert_eq!(
            json["metadata"]["newContentHash"],
            format!("{:016x}", new.content_hash())
        );
        assert_eq!(json["comparison"]["statistics"]["changedCount"], 1);
    }

    #[test]
    fn test_output_view_report_csv() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("listing.csv");
        let app = AppConfig::builder().output_file(Some(out.clone())).quiet(true).build();
        let config = ViewConfig::from_app("old.csv".into(), &app);
        let (old, _) = sets();

        output_view_report(&config, &old).unwrap();

        let csv = std::fs::read_to_string(&out).unwrap();
        assert!(csv.starts_with("\"Reference\""));
        assert!(csv.contains("\"R1\""));
    }

    #[test]
    fn test_render_report_without_color() {
        let (old, new) = sets();
        let text = render_report(
            ReportFormat::Text,
            false,
            &reconcile(&old, &new),
            &ReportConfig::default(),
        )
        .unwrap();
        assert!(!text.contains('\x1b'));
        assert!(text.contains("~ R1: quantity 1 → 2"));
    }
}
