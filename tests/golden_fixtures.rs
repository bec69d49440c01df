use bom_tools::config::ExtractionConfig;
use bom_tools::diff::DuplicatePolicy;
use bom_tools::model::TrackedField;
use bom_tools::{detect_kind, extract_records, FileKind, RecordSet, Reconciler};
use std::path::Path;

fn load(name: &str) -> RecordSet {
    let path = Path::new("tests/fixtures").join(name);
    let content = std::fs::read_to_string(&path).expect("failed to read fixture");
    let kind = detect_kind(name, &content);
    extract_records(&content, kind, name, &ExtractionConfig::default())
        .expect("lenient extraction never fails")
}

#[test]
fn golden_extract_details_record_xml() {
    let set = load("bom_old.xml");

    assert_eq!(set.kind, Some(FileKind::BomXml));
    assert_eq!(set.len(), 4);
    let refs: Vec<_> = set.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(refs, ["R1", "R2", "C1", "U1"]);

    let c1 = set.find("C1").expect("C1 present");
    assert_eq!(c1.part_number, "CAP-100N");
    assert_eq!(c1.quantity, 4);
    assert_eq!(c1.footprint, "0402");
    assert_eq!(c1.manufacturer, "Murata");
    assert_eq!(c1.source_file, "bom_old.xml");
}

#[test]
fn golden_extract_component_layout_xml() {
    let set = load("components_new.xml");

    assert_eq!(set.len(), 4);
    // Attribute-only element
    let c1 = set.find("C1").expect("C1 present");
    assert_eq!(c1.quantity, 6);
    assert_eq!(c1.description, "Capacitor 100n");
    // CDATA description
    assert_eq!(set.find("U2").expect("U2 present").description, "LDO 3.3V <1A>");
}

#[test]
fn golden_diff_xml_revisions() {
    let old = load("bom_old.xml");
    let new = load("bom_new.xml");

    let result = Reconciler::new().reconcile(&old, &new);
    let stats = result.statistics;

    assert_eq!(stats.old_count, 4);
    assert_eq!(stats.new_count, 4);
    assert_eq!(stats.added_count, 1);
    assert_eq!(stats.removed_count, 1);
    assert_eq!(stats.changed_count, 2);
    assert_eq!(stats.unchanged_count, 1);
    assert_eq!(stats.total_changes, 4);
    assert!(result.validation_warnings.is_empty());

    assert_eq!(result.added[0].reference, "U2");
    assert_eq!(result.removed[0].reference, "U1");

    // Changed entries follow new-file order
    let changed: Vec<_> = result.changed.iter().map(|c| c.reference.as_str()).collect();
    assert_eq!(changed, ["R2", "C1"]);

    let r2 = &result.changed[0];
    assert!(r2.differs(TrackedField::PartNumber));
    assert!(r2.differs(TrackedField::Description));
    assert!(!r2.differs(TrackedField::Quantity));

    let c1 = &result.changed[1];
    let fields: Vec<_> = c1.changed_fields().map(|d| d.field).collect();
    assert_eq!(fields, [TrackedField::Quantity]);
    assert_eq!(c1.original.quantity, 4);
    assert_eq!(c1.modified.quantity, 6);
}

#[test]
fn golden_layouts_are_interchangeable() {
    // Same design exported in both XML layouts
    let result = Reconciler::new().reconcile(&load("bom_new.xml"), &load("components_new.xml"));

    assert_eq!(result.statistics.total_changes, 0);
    assert_eq!(result.statistics.unchanged_count, 4);
}

#[test]
fn golden_csv_duplicate_policies() {
    let old = load("bom_old.csv");
    let new = load("bom_new.csv");

    assert_eq!(old.kind, Some(FileKind::Csv));
    // The two-field junk row is skipped, the empty-reference row is kept
    assert_eq!(old.len(), 4);
    assert_eq!(new.len(), 5);
    assert_eq!(
        new.find("C1").expect("C1 present").description,
        "Capacitor 100n, X7R"
    );

    let last = Reconciler::new().reconcile(&old, &new);
    assert_eq!(last.statistics.old_count, 3);
    assert_eq!(last.statistics.new_count, 4);
    assert_eq!(last.statistics.added_count, 1);
    assert_eq!(last.statistics.changed_count, 1);
    assert_eq!(last.changed[0].reference, "R2");
    assert_eq!(last.changed[0].original.part_number, "RES-1K-ALT");
    assert_eq!(
        last.validation_warnings,
        vec![
            "Duplicate reference designator 'R2' in old file (2 occurrences); last occurrence used"
                .to_string(),
            "1 record(s) in new file have no reference designator and were ignored".to_string(),
        ]
    );

    let first = Reconciler::new()
        .with_duplicate_policy(DuplicatePolicy::FirstWins)
        .reconcile(&old, &new);
    assert_eq!(first.statistics.changed_count, 0);
    assert_eq!(first.statistics.total_changes, 1);
    assert!(first.validation_warnings[0].ends_with("first occurrence used"));

    let excluded = Reconciler::new()
        .with_duplicate_policy(DuplicatePolicy::Exclude)
        .reconcile(&old, &new);
    assert_eq!(excluded.statistics.old_count, 2);
    assert_eq!(excluded.statistics.new_count, 3);
    assert_eq!(excluded.statistics.unchanged_count, 2);
    assert_eq!(excluded.classify("R2"), None);
    assert_eq!(excluded.added[0].reference, "D1");
}

#[test]
fn golden_diff_netlists() {
    let old = load("board_old.net");
    let new = load("board_new.net");

    assert_eq!(old.kind, Some(FileKind::NetlistText));
    let refs: Vec<_> = old.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(refs, ["U1", "C1", "R1", "R2"]);
    assert!(old.iter().all(|r| r.quantity == 1));

    let result = Reconciler::new().reconcile(&old, &new);
    assert_eq!(result.added.len(), 1);
    assert_eq!(result.added[0].reference, "C2");
    assert_eq!(result.removed.len(), 1);
    assert_eq!(result.removed[0].reference, "R2");
    assert!(result.changed.is_empty());
    assert_eq!(result.statistics.unchanged_count, 3);
}

#[test]
fn golden_empty_side_warning() {
    let old = load("empty.xml");
    let new = load("bom_new.xml");
    assert!(old.is_empty());

    let result = Reconciler::new().reconcile(&old, &new);
    assert_eq!(result.statistics.added_count, 4);
    assert_eq!(
        result.validation_warnings,
        vec![
            "Old file contains no components while new file has 4; the old file may have failed to parse"
                .to_string()
        ]
    );
}
