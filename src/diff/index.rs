//! Reference-designator index over one record set.

use crate::model::{ComponentRecord, RecordSet};
use clap::ValueEnum;
use indexmap::{IndexMap, IndexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How repeated reference designators within one file are resolved.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Later occurrences overwrite earlier ones
    #[default]
    LastWins,
    /// The first occurrence is kept
    FirstWins,
    /// Duplicated references are left out of the comparison entirely
    Exclude,
}

impl DuplicatePolicy {
    /// Wording used in duplicate warnings
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::LastWins => "last occurrence used",
            Self::FirstWins => "first occurrence used",
            Self::Exclude => "excluded from comparison",
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWins => write!(f, "last-wins"),
            Self::FirstWins => write!(f, "first-wins"),
            Self::Exclude => write!(f, "exclude"),
        }
    }
}

/// Which input a record set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl Side {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

/// Insertion-ordered map from reference designator to record.
///
/// Key order is the order each reference was first encountered, whatever
/// the policy; only the stored record depends on the policy.
#[derive(Debug)]
pub struct RecordIndex<'a> {
    side: Side,
    map: IndexMap<&'a str, &'a ComponentRecord>,
    /// References seen more than once, with their occurrence count
    duplicates: IndexMap<&'a str, usize>,
    /// Records skipped because their reference was empty
    missing_reference: usize,
    /// Distinct non-empty references before any exclusion
    keyed: usize,
}

impl<'a> RecordIndex<'a> {
    /// Index `records` under `policy`.
    ///
    /// `Exclude` is applied separately through [`RecordIndex::exclude`],
    /// since a reference duplicated on one side is dropped from both.
    pub fn build(records: &'a RecordSet, side: Side, policy: DuplicatePolicy) -> Self {
        let mut map: IndexMap<&'a str, &'a ComponentRecord> = IndexMap::with_capacity(records.len());
        let mut occurrences: IndexMap<&'a str, usize> = IndexMap::new();
        let mut missing_reference = 0;

        for record in records {
            if !record.has_reference() {
                missing_reference += 1;
                continue;
            }
            let key = record.reference.as_str();
            *occurrences.entry(key).or_insert(0) += 1;
            match policy {
                DuplicatePolicy::FirstWins => {
                    map.entry(key).or_insert(record);
                }
                DuplicatePolicy::LastWins | DuplicatePolicy::Exclude => {
                    map.insert(key, record);
                }
            }
        }

        let keyed = occurrences.len();
        occurrences.retain(|_, count| *count > 1);

        Self {
            side,
            map,
            duplicates: occurrences,
            missing_reference,
            keyed,
        }
    }

    /// Remove `references` from the index, keeping the order of the rest.
    pub fn exclude(&mut self, references: &IndexSet<&str>) {
        self.map.retain(|key, _| !references.contains(*key));
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&'a ComponentRecord> {
        self.map.get(reference).copied()
    }

    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.map.contains_key(reference)
    }

    /// Number of distinct keyed references
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a ComponentRecord)> + '_ {
        self.map.iter().map(|(k, v)| (*k, *v))
    }

    /// Duplicated references and their occurrence counts, in first-seen order
    #[must_use]
    pub const fn duplicates(&self) -> &IndexMap<&'a str, usize> {
        &self.duplicates
    }

    #[must_use]
    pub const fn missing_reference(&self) -> usize {
        self.missing_reference
    }

    /// Distinct references the file supplied, counted before exclusion
    #[must_use]
    pub const fn keyed_count(&self) -> usize {
        self.keyed
    }
}
