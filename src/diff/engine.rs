//! Reconciliation engine implementation.

use super::index::{DuplicatePolicy, RecordIndex, Side};
use super::result::{ChangedComponent, FieldDelta, ReconciliationResult};
use super::stats::{collect_warnings, compute_statistics};
use crate::model::{ComponentRecord, RecordSet, TrackedField};
use indexmap::IndexSet;

/// Matches two record sets by reference designator and classifies every
/// reference as added, removed, changed or unchanged.
///
/// The reconciler holds only configuration; every call to
/// [`Reconciler::reconcile`] is independent and total.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    duplicate_policy: DuplicatePolicy,
    include_unchanged: bool,
}

impl Reconciler {
    /// Create a reconciler with default settings (last-wins, unchanged
    /// records counted but not kept)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::LastWins,
            include_unchanged: false,
        }
    }

    /// Set how repeated references within one input are resolved
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Keep unchanged records in the result
    #[must_use]
    pub const fn include_unchanged(mut self, include: bool) -> Self {
        self.include_unchanged = include;
        self
    }

    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Compare `old` against `new`.
    pub fn reconcile(&self, old: &RecordSet, new: &RecordSet) -> ReconciliationResult {
        let policy = self.duplicate_policy;
        let mut old_index = RecordIndex::build(old, Side::Old, policy);
        let mut new_index = RecordIndex::build(new, Side::New, policy);

        if policy == DuplicatePolicy::Exclude {
            let excluded: IndexSet<&str> = old_index
                .duplicates()
                .keys()
                .chain(new_index.duplicates().keys())
                .copied()
                .collect();
            if !excluded.is_empty() {
                old_index.exclude(&excluded);
                new_index.exclude(&excluded);
            }
        }

        let mut result = ReconciliationResult::new();
        let mut unchanged = Vec::new();

        for (reference, record) in new_index.iter() {
            match old_index.get(reference) {
                None => result.added.push(record.clone()),
                Some(original) => {
                    if original.differs_from(record) {
                        result.changed.push(changed_component(reference, original, record));
                    } else {
                        unchanged.push(record);
                    }
                }
            }
        }

        for (reference, record) in old_index.iter() {
            if !new_index.contains(reference) {
                result.removed.push(record.clone());
            }
        }

        compute_statistics(&mut result, &old_index, &new_index, unchanged.len());
        result.validation_warnings = collect_warnings(&old_index, &new_index, policy);
        if self.include_unchanged {
            result.unchanged = Some(unchanged.into_iter().cloned().collect());
        }

        tracing::debug!(
            "Reconciled {} old / {} new references: {} added, {} removed, {} changed, {} unchanged",
            result.statistics.old_count,
            result.statistics.new_count,
            result.statistics.added_count,
            result.statistics.removed_count,
            result.statistics.changed_count,
            result.statistics.unchanged_count
        );

        result
    }
}

/// Reconcile with default settings.
pub fn reconcile(old: &RecordSet, new: &RecordSet) -> ReconciliationResult {
    Reconciler::new().reconcile(old, new)
}

/// Per-field comparison of every tracked field.
#[must_use]
pub fn field_deltas(original: &ComponentRecord, modified: &ComponentRecord) -> Vec<FieldDelta> {
    TrackedField::ALL
        .iter()
        .map(|&field| FieldDelta {
            field,
            differs: original.field_differs(modified, field),
            old: original.field_text(field).into_owned(),
            new: modified.field_text(field).into_owned(),
        })
        .collect()
}

fn changed_component(
    reference: &str,
    original: &ComponentRecord,
    modified: &ComponentRecord,
) -> ChangedComponent {
    ChangedComponent {
        reference: reference.to_string(),
        original: original.clone(),
        modified: modified.clone(),
        fields: field_deltas(original, modified),
    }
}
