#![no_main]
use bom_tools::model::FileKind;
use bom_tools::{extract, Reconciler};
use libfuzzer_sys::fuzz_target;

/// Extract both halves of the input as CSV and reconcile them, checking
/// that the statistics stay consistent with the buckets.
fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let (old, new) = s.split_once("\n\n").unwrap_or((&s, ""));
    let old = extract(old, FileKind::Csv, "old.csv");
    let new = extract(new, FileKind::Csv, "new.csv");

    let result = Reconciler::new().reconcile(&old, &new);
    let stats = result.statistics;
    assert_eq!(stats.added_count, result.added.len());
    assert_eq!(stats.removed_count, result.removed.len());
    assert_eq!(
        stats.added_count + stats.changed_count + stats.unchanged_count,
        stats.new_count
    );
});
