//! Reference-designator reconciliation.
//!
//! This module matches two [`RecordSet`](crate::model::RecordSet)s by
//! reference designator and partitions every reference into exactly one of
//! added, removed, changed or unchanged.
//!
//! # Algorithm
//!
//! 1. Each side is indexed by reference ([`RecordIndex`]). Key order is the
//!    order references were first encountered; repeated references are
//!    resolved by the [`DuplicatePolicy`] and reported as warnings.
//! 2. New-side keys missing from the old index are `added`, old-side keys
//!    missing from the new index are `removed`.
//! 3. Shared keys are compared over the fixed tracked-field set with plain
//!    value equality; any difference makes the pair `changed`.
//!
//! The whole pass is O(n + m) and holds no state between calls.
//!
//! # Example
//!
//! ```
//! use bom_tools::diff::Reconciler;
//! use bom_tools::model::{ComponentRecord, RecordSet};
//!
//! let old = RecordSet::from_records("old.csv", vec![
//!     ComponentRecord::new("R1").with_part_number("P1").with_quantity(1),
//!     ComponentRecord::new("R2").with_part_number("P2").with_quantity(2),
//! ]);
//! let new = RecordSet::from_records("new.csv", vec![
//!     ComponentRecord::new("R2").with_part_number("P2").with_quantity(3),
//!     ComponentRecord::new("R3").with_part_number("P3").with_quantity(1),
//! ]);
//!
//! let result = Reconciler::new().reconcile(&old, &new);
//! assert_eq!(result.statistics.total_changes, 3);
//! ```

mod engine;
mod index;
mod result;
pub mod stats;

pub use engine::{field_deltas, reconcile, Reconciler};
pub use index::{DuplicatePolicy, RecordIndex, Side};
pub use result::{ChangeKind, ChangedComponent, FieldDelta, ReconciliationResult, Statistics};
