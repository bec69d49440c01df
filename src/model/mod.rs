//! Component record model shared by every stage of the tool.
//!
//! Extractors normalize each input file into a [`RecordSet`] of
//! [`ComponentRecord`]s carrying only canonical field names. The reconciler,
//! statistics and reporters never see source-format field aliases.

mod kind;
mod record;
mod record_set;

pub use kind::*;
pub use record::*;
pub use record_set::*;
