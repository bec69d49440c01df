//! Statistics and validation warnings.
//!
//! Pure summarization over the indexes and buckets the reconciler already
//! built. Nothing in here can fail.

use super::index::{DuplicatePolicy, RecordIndex, Side};
use super::result::{ReconciliationResult, Statistics};

/// Fill in `result.statistics` from the two indexes and the buckets.
pub fn compute_statistics(
    result: &mut ReconciliationResult,
    old: &RecordIndex<'_>,
    new: &RecordIndex<'_>,
    unchanged_count: usize,
) {
    let added_count = result.added.len();
    let removed_count = result.removed.len();
    let changed_count = result.changed.len();
    result.statistics = Statistics {
        old_count: old.len(),
        new_count: new.len(),
        added_count,
        removed_count,
        changed_count,
        unchanged_count,
        total_changes: added_count + removed_count + changed_count,
    };
}

/// Warnings about data quality in the two inputs, old side first.
#[must_use]
pub fn collect_warnings(
    old: &RecordIndex<'_>,
    new: &RecordIndex<'_>,
    policy: DuplicatePolicy,
) -> Vec<String> {
    let mut warnings = Vec::new();

    for index in [old, new] {
        for (reference, count) in index.duplicates() {
            warnings.push(duplicate_warning(reference, index.side(), *count, policy));
        }
    }

    for index in [old, new] {
        if index.missing_reference() > 0 {
            warnings.push(missing_reference_warning(index.side(), index.missing_reference()));
        }
    }

    // A side emptied by exclusion still had components
    if let Some(warning) = empty_side_warning(old.keyed_count(), new.keyed_count()) {
        warnings.push(warning);
    }

    warnings
}

#[must_use]
pub fn duplicate_warning(
    reference: &str,
    side: Side,
    occurrences: usize,
    policy: DuplicatePolicy,
) -> String {
    format!(
        "Duplicate reference designator '{reference}' in {} file ({occurrences} occurrences); {}",
        side.label(),
        policy.outcome()
    )
}

#[must_use]
pub fn missing_reference_warning(side: Side, count: usize) -> String {
    format!(
        "{count} record(s) in {} file have no reference designator and were ignored",
        side.label()
    )
}

/// Warning for one side being empty while the other is not.
#[must_use]
pub fn empty_side_warning(old_count: usize, new_count: usize) -> Option<String> {
    match (old_count, new_count) {
        (0, n) if n > 0 => Some(format!(
            "Old file contains no components while new file has {n}; the old file may have failed to parse"
        )),
        (n, 0) if n > 0 => Some(format!(
            "New file contains no components while old file has {n}; the new file may have failed to parse"
        )),
        _ => None,
    }
}
