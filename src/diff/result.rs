//! Reconciliation result structures.

use crate::model::{ComponentRecord, TrackedField};
use serde::{Deserialize, Serialize, Serializer};

/// Complete result of one reconciliation.
///
/// Built fresh for every call and never mutated by consumers. The serialized
/// shape is `{added, removed, changed, unchanged?, validation_warnings,
/// statistics}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ReconciliationResult {
    /// Records present only in the new set, in new-set encounter order
    pub added: Vec<ComponentRecord>,
    /// Records present only in the old set, in old-set encounter order
    pub removed: Vec<ComponentRecord>,
    /// Matched pairs whose tracked fields differ, in new-set encounter order
    pub changed: Vec<ChangedComponent>,
    /// Matched pairs with identical tracked fields (new-side copy), only
    /// when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unchanged: Option<Vec<ComponentRecord>>,
    /// Human-readable data-quality warnings
    #[serde(default)]
    pub validation_warnings: Vec<String>,
    pub statistics: Statistics,
}

impl ReconciliationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any record was added, removed or changed
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.statistics.total_changes > 0
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.validation_warnings.is_empty()
    }

    /// Whether both inputs were empty, i.e. nothing could be compared.
    ///
    /// Distinguishes "nothing parseable" from "no differences found".
    #[must_use]
    pub fn is_empty_comparison(&self) -> bool {
        self.statistics.old_count == 0 && self.statistics.new_count == 0
    }

    /// Find a changed entry by reference designator
    #[must_use]
    pub fn find_changed(&self, reference: &str) -> Option<&ChangedComponent> {
        self.changed.iter().find(|c| c.reference == reference)
    }

    /// Which bucket a reference ended up in, if it was compared at all.
    ///
    /// Unchanged references are only known when the result carries the
    /// unchanged list.
    #[must_use]
    pub fn classify(&self, reference: &str) -> Option<ChangeKind> {
        if self.added.iter().any(|r| r.reference == reference) {
            Some(ChangeKind::Added)
        } else if self.removed.iter().any(|r| r.reference == reference) {
            Some(ChangeKind::Removed)
        } else if self.find_changed(reference).is_some() {
            Some(ChangeKind::Changed)
        } else if self
            .unchanged
            .as_ref()
            .is_some_and(|u| u.iter().any(|r| r.reference == reference))
        {
            Some(ChangeKind::Unchanged)
        } else {
            None
        }
    }
}

/// Bucket a reference designator falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl ChangeKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::Changed => "Changed",
            Self::Unchanged => "Unchanged",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A matched pair whose tracked fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedComponent {
    pub reference: String,
    pub original: ComponentRecord,
    pub modified: ComponentRecord,
    /// Per-field comparison for every tracked field; serialized as the
    /// differing subset only
    #[serde(
        rename = "changedFields",
        serialize_with = "serialize_differing",
        default
    )]
    pub fields: Vec<FieldDelta>,
}

impl ChangedComponent {
    /// Iterate over the tracked fields that differ
    pub fn changed_fields(&self) -> impl Iterator<Item = &FieldDelta> {
        self.fields.iter().filter(|d| d.differs)
    }

    /// Whether `field` differs between the two records
    #[must_use]
    pub fn differs(&self, field: TrackedField) -> bool {
        self.fields.iter().any(|d| d.field == field && d.differs)
    }
}

fn serialize_differing<S: Serializer>(fields: &[FieldDelta], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(fields.iter().filter(|d| d.differs))
}

/// Comparison of one tracked field between the old and new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub field: TrackedField,
    pub differs: bool,
    pub old: String,
    pub new: String,
}

/// Summary counts for a reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Distinct keyed references on the old side
    pub old_count: usize,
    /// Distinct keyed references on the new side
    pub new_count: usize,
    pub added_count: usize,
    pub removed_count: usize,
    pub changed_count: usize,
    #[serde(default)]
    pub unchanged_count: usize,
    /// `added + removed + changed`
    pub total_changes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(field: TrackedField, old: &str, new: &str) -> FieldDelta {
        FieldDelta {
            field,
            differs: old != new,
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn test_changed_fields_serialize_only_differing() {
        let change = ChangedComponent {
            reference: "C1".to_string(),
            original: ComponentRecord::new("C1").with_quantity(5),
            modified: ComponentRecord::new("C1").with_quantity(10),
            fields: vec![
                delta(TrackedField::PartNumber, "", ""),
                delta(TrackedField::Quantity, "5", "10"),
            ],
        };
        let json = serde_json::to_value(&change).expect("serialize");
        let fields = json["changedFields"].as_array().expect("array");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["field"], "quantity");
        assert_eq!(fields[0]["old"], "5");
        assert_eq!(json["original"]["quantity"], 5);
        assert_eq!(json["modified"]["quantity"], 10);
        assert!(change.differs(TrackedField::Quantity));
        assert!(!change.differs(TrackedField::PartNumber));
    }

    #[test]
    fn test_result_shape() {
        let result = ReconciliationResult::new();
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("added").is_some());
        assert!(json.get("removed").is_some());
        assert!(json.get("changed").is_some());
        assert!(json.get("validation_warnings").is_some());
        assert!(json.get("unchanged").is_none());
        assert_eq!(json["statistics"]["totalChanges"], 0);
        assert_eq!(json["statistics"]["oldCount"], 0);
        assert!(result.is_empty_comparison());
    }

    #[test]
    fn test_classify() {
        let mut result = ReconciliationResult::new();
        result.added.push(ComponentRecord::new("R3"));
        result.removed.push(ComponentRecord::new("R1"));
        result.unchanged = Some(vec![ComponentRecord::new("R4")]);
        assert_eq!(result.classify("R3"), Some(ChangeKind::Added));
        assert_eq!(result.classify("R1"), Some(ChangeKind::Removed));
        assert_eq!(result.classify("R4"), Some(ChangeKind::Unchanged));
        assert_eq!(result.classify("R9"), None);
    }
}
