//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → reconcile → report pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use bom_tools::cli::{run_diff, run_view};
use bom_tools::config::{AppConfig, DiffConfig, DiffPaths, ExtractionConfig, ViewConfig};
use bom_tools::diff::DuplicatePolicy;
use bom_tools::model::FileKind;
use bom_tools::pipeline::{
    auto_detect_format, compute_diff, determine_exit_code, exit_codes, load_pair, load_records,
    output_report, OutputTarget, PipelineError,
};
use bom_tools::reports::ReportFormat;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn diff_config(old: &str, new: &str, app: &AppConfig) -> DiffConfig {
    DiffConfig::from_app(
        DiffPaths {
            old: fixture_path(old),
            new: fixture_path(new),
        },
        app,
    )
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("report should be written");
    serde_json::from_str(&content).expect("report should be valid JSON")
}

// ============================================================================
// Pipeline Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_xml_fixture() {
        let set = load_records(
            &fixture_path("bom_old.xml"),
            None,
            &ExtractionConfig::default(),
            true,
        )
        .expect("load should succeed");

        assert_eq!(set.kind, Some(FileKind::BomXml));
        assert_eq!(set.source, "bom_old.xml");
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn load_declared_kind_overrides_sniffing() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("upload.txt");
        std::fs::write(&path, "VCC U1:1 C1:1\n").expect("write");

        let set = load_records(&path, Some(FileKind::Csv), &ExtractionConfig::default(), true)
            .expect("load should succeed");
        assert_eq!(set.kind, Some(FileKind::Csv));
        // One field per row, so nothing qualifies as a CSV record
        assert!(set.is_empty());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = load_records(
            &fixture_path("does_not_exist.xml"),
            None,
            &ExtractionConfig::default(),
            true,
        )
        .expect_err("missing file must fail");

        let pipeline_err = err
            .downcast_ref::<PipelineError>()
            .expect("should be a PipelineError");
        assert!(matches!(pipeline_err, PipelineError::ReadFailed { .. }));
    }

    #[test]
    fn load_malformed_xml_lenient_vs_strict() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("broken.xml");
        std::fs::write(&path, "<BOM><DETAILS><RECORD><REFDES>R1</REFDES>").expect("write");

        let lenient = load_records(&path, None, &ExtractionConfig::default(), true)
            .expect("lenient load should succeed");
        assert!(lenient.is_empty());

        let strict = ExtractionConfig {
            strict: true,
            ..ExtractionConfig::default()
        };
        let err = load_records(&path, None, &strict, true).expect_err("strict load must fail");
        let pipeline_err = err
            .downcast_ref::<PipelineError>()
            .expect("should be a PipelineError");
        assert!(matches!(pipeline_err, PipelineError::ExtractFailed { .. }));
        assert!(format!("{err}").contains("broken.xml"));
    }

    #[test]
    fn load_invalid_utf8_is_replaced() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("latin1.csv");
        std::fs::write(&path, b"R1,10k,1,Widerstand 10k\xb5,Yageo,RC0603\n").expect("write");

        let set = load_records(&path, None, &ExtractionConfig::default(), true)
            .expect("load should succeed");
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].part_number, "RC0603");
    }

    #[test]
    fn load_pair_keeps_sides_apart() {
        let (old, new) = load_pair(
            (&fixture_path("board_old.net"), None),
            (&fixture_path("bom_new.csv"), None),
            &ExtractionConfig::default(),
            true,
        )
        .expect("both loads should succeed");

        assert_eq!(old.kind, Some(FileKind::NetlistText));
        assert_eq!(new.kind, Some(FileKind::Csv));
    }
}

// ============================================================================
// Pipeline Diff Stage Tests
// ============================================================================

mod diff_stage {
    use super::*;

    #[test]
    fn compute_diff_uses_configured_policy() {
        let app = AppConfig::builder()
            .duplicate_policy(DuplicatePolicy::FirstWins)
            .quiet(true)
            .build();
        let config = diff_config("bom_old.csv", "bom_new.csv", &app);
        let (old, new) = load_pair(
            (&config.paths.old, None),
            (&config.paths.new, None),
            &config.extraction,
            true,
        )
        .expect("load");

        let result = compute_diff(&config, &old, &new);
        assert_eq!(result.statistics.changed_count, 0);
        assert_eq!(result.statistics.added_count, 1);
    }

    #[test]
    fn exit_code_precedence() {
        let app = AppConfig::builder()
            .fail_on_change(true)
            .fail_on_warning(true)
            .quiet(true)
            .build();
        let config = diff_config("bom_old.csv", "bom_new.csv", &app);
        let (old, new) = load_pair(
            (&config.paths.old, None),
            (&config.paths.new, None),
            &config.extraction,
            true,
        )
        .expect("load");

        let result = compute_diff(&config, &old, &new);
        assert!(result.has_changes());
        assert!(result.has_warnings());
        assert_eq!(
            determine_exit_code(&config.behavior, &result),
            exit_codes::WARNINGS_PRESENT
        );
    }
}

// ============================================================================
// Pipeline Output Stage Tests
// ============================================================================

mod output_stage {
    use super::*;

    #[test]
    fn auto_format_follows_output_extension() {
        let target = OutputTarget::File(PathBuf::from("changes.html"));
        assert_eq!(
            auto_detect_format(ReportFormat::Auto, &target),
            ReportFormat::Html
        );
    }

    #[test]
    fn output_report_writes_csv() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("diff.csv");
        let app = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();
        let config = diff_config("bom_old.xml", "bom_new.xml", &app);
        let (old, new) = load_pair(
            (&config.paths.old, None),
            (&config.paths.new, None),
            &config.extraction,
            true,
        )
        .expect("load");
        let result = compute_diff(&config, &old, &new);

        output_report(&config, &result, &old, &new).expect("output should succeed");

        let csv = std::fs::read_to_string(&out).expect("read");
        let lines: Vec<_> = csv.lines().collect();
        assert!(lines[0].starts_with("\"Change Type\""));
        assert!(lines.iter().any(|l| l.starts_with("\"Added\",\"U2\"")));
        assert!(lines.iter().any(|l| l.starts_with("\"Removed\",\"U1\"")));
        assert!(lines.iter().any(|l| l.starts_with("\"Changed (Old)\",\"C1\"")));
        assert!(lines.iter().any(|l| l.starts_with("\"Changed (New)\",\"C1\"")));
    }
}

// ============================================================================
// CLI Command Handler Tests
// ============================================================================

mod cli_commands {
    use super::*;

    #[test]
    fn run_diff_json_report() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("diff.json");
        let app = AppConfig::builder()
            .output_file(Some(out.clone()))
            .include_unchanged(true)
            .quiet(true)
            .build();

        let code = run_diff(diff_config("bom_old.xml", "bom_new.xml", &app)).expect("diff");
        assert_eq!(code, exit_codes::SUCCESS);

        let json = read_json(&out);
        let comparison = &json["comparison"];
        assert_eq!(comparison["statistics"]["totalChanges"], 4);
        assert_eq!(comparison["added"][0]["reference"], "U2");
        assert_eq!(comparison["removed"][0]["reference"], "U1");
        assert_eq!(comparison["changed"][1]["reference"], "C1");
        assert_eq!(comparison["changed"][1]["changedFields"][0]["field"], "quantity");
        assert_eq!(comparison["unchanged"][0]["reference"], "R1");
        assert!(json["metadata"]["oldContentHash"].is_string());
    }

    #[test]
    fn run_diff_legacy_keys() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("diff.json");
        let app = AppConfig::builder()
            .output_file(Some(out.clone()))
            .legacy_keys(true)
            .quiet(true)
            .build();

        run_diff(diff_config("board_old.net", "board_new.net", &app)).expect("diff");

        let json = read_json(&out);
        assert_eq!(json["comparison"]["addedComponents"][0]["reference"], "C2");
        assert_eq!(json["comparison"]["deletedComponents"][0]["reference"], "R2");
        assert_eq!(
            json["comparison"]["changedComponents"]
                .as_array()
                .map(Vec::len),
            Some(0)
        );
    }

    #[test]
    fn run_diff_fail_on_change() {
        let tmp = TempDir::new().expect("tempdir");
        let app = AppConfig::builder()
            .output_file(Some(tmp.path().join("diff.txt")))
            .fail_on_change(true)
            .quiet(true)
            .build();

        let code = run_diff(diff_config("board_old.net", "board_new.net", &app)).expect("diff");
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let same = run_diff(diff_config("bom_new.xml", "components_new.xml", &app)).expect("diff");
        assert_eq!(same, exit_codes::SUCCESS);
    }

    #[test]
    fn run_diff_html_report() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("diff.html");
        let app = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        run_diff(diff_config("bom_old.xml", "bom_new.xml", &app)).expect("diff");

        let html = std::fs::read_to_string(&out).expect("read");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("data-ref=\"U2\""));
        assert!(html.contains("LDO 3.3V &lt;1A&gt;"));
        assert!(!html.contains("LDO 3.3V <1A>"));
    }

    #[test]
    fn run_diff_missing_input_fails_validation() {
        let app = AppConfig::builder().quiet(true).build();
        let err = run_diff(diff_config("missing.xml", "bom_new.xml", &app))
            .expect_err("missing input must fail");
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn run_view_netlist_json() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("view.json");
        let app = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        let code = run_view(ViewConfig::from_app(fixture_path("board_new.net"), &app))
            .expect("view");
        assert_eq!(code, exit_codes::SUCCESS);

        let json = read_json(&out);
        assert_eq!(json["count"], 4);
        assert_eq!(json["metadata"]["kind"], "netlist-text");
        assert_eq!(json["records"][3]["reference"], "C2");
    }
}
