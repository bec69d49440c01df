//! Ordered record collection produced by one extraction.

use super::{ComponentRecord, FileKind};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// The records extracted from one input file, in source order.
///
/// Owning the records means the set can be iterated any number of times
/// without touching the source text again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Source tag, usually the input file name
    pub source: String,
    /// Kind the records were extracted from, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    records: Vec<ComponentRecord>,
}

impl RecordSet {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: None,
            records: Vec::new(),
        }
    }

    /// Build a set from already-extracted records.
    #[must_use]
    pub fn from_records(source: impl Into<String>, records: Vec<ComponentRecord>) -> Self {
        Self {
            source: source.into(),
            kind: None,
            records,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: FileKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn push(&mut self, record: ComponentRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ComponentRecord> {
        self.records
    }

    /// Look up the first record with the given reference designator.
    #[must_use]
    pub fn find(&self, reference: &str) -> Option<&ComponentRecord> {
        self.records.iter().find(|r| r.reference == reference)
    }

    /// Stable hash over the tracked content of every record, in order.
    ///
    /// The source tag and display-only extras are not hashed, so the same
    /// BOM saved under two names hashes identically.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for record in &self.records {
            for part in [
                record.reference.as_str(),
                record.part_number.as_str(),
                record.footprint.as_str(),
                record.description.as_str(),
                record.manufacturer.as_str(),
            ] {
                hasher.update(part.as_bytes());
                hasher.update(&[0x1f]);
            }
            hasher.update(&record.quantity.to_le_bytes());
            hasher.update(&[0x1e]);
        }
        hasher.digest()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ComponentRecord;
    type IntoIter = std::slice::Iter<'a, ComponentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = ComponentRecord;
    type IntoIter = std::vec::IntoIter<ComponentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<ComponentRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = ComponentRecord>>(iter: I) -> Self {
        Self::from_records(String::new(), iter.into_iter().collect())
    }
}
