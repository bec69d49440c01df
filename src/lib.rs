//! **A library for comparing electronic Bills of Materials and netlists.**
//!
//! `bom-tools` extracts component records from BOM exports and netlists,
//! reconciles two revisions by reference designator, and renders the result
//! as text, JSON, CSV or HTML. It powers both the `bom-tools` command-line
//! tool and programmatic integration into your own applications.
//!
//! ## Key Features
//!
//! - **Multi-Format Extraction**: BOM XML (`DETAILS/RECORD` and `Component`
//!   layouts with aliased field names), positional CSV, and whitespace
//!   netlist text, with kind sniffing from file name and content.
//! - **Reference-Designator Reconciliation**: Partitions components into
//!   added, removed, changed and unchanged, with per-field deltas for the
//!   five tracked fields and a configurable duplicate policy.
//! - **Validation Warnings**: Duplicate designators, records without a
//!   designator, and one-sided empty inputs are reported, never fatal.
//! - **Flexible Reporting**: Terminal summary, JSON, CSV and self-contained HTML.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`ComponentRecord`] and [`RecordSet`], the canonical form every input is
//!   extracted into.
//! - **[`parsers`]**: One [`RecordExtractor`](parsers::RecordExtractor) per [`FileKind`].
//! - **[`diff`]**: The [`Reconciler`] and its [`ReconciliationResult`].
//! - **[`reports`]**: Report generators for each [`ReportFormat`].
//! - **[`pipeline`]**: File-level read → extract → reconcile → report glue used by the CLI.
//! - **[`config`]**: YAML configuration, presets and validation.
//!
//! ## Getting Started
//!
//! ```
//! use bom_tools::{detect_kind, extract, Reconciler};
//!
//! let old_csv = "R1,10k,1,Resistor,Yageo,RC0603\nC1,100n,2,Capacitor,Murata,GRM155\n";
//! let new_csv = "R1,10k,1,Resistor,Yageo,RC0603\nC1,100n,4,Capacitor,Murata,GRM155\n";
//!
//! let kind = detect_kind("rev_a.csv", old_csv);
//! let old = extract(old_csv, kind, "rev_a.csv");
//! let new = extract(new_csv, kind, "rev_b.csv");
//!
//! let result = Reconciler::new().reconcile(&old, &new);
//! assert_eq!(result.statistics.changed_count, 1);
//! assert_eq!(result.changed[0].reference, "C1");
//! ```
//!
//! ### Rendering a Report
//!
//! ```
//! use bom_tools::model::{ComponentRecord, RecordSet};
//! use bom_tools::reports::{format_report, ReportConfig, ReportFormat};
//! use bom_tools::reconcile;
//!
//! let old = RecordSet::from_records("a.xml", vec![ComponentRecord::new("U1")]);
//! let new = RecordSet::from_records("b.xml", vec![]);
//! let result = reconcile(&old, &new);
//!
//! let csv = format_report(&result, ReportFormat::Csv, &ReportConfig::default()).unwrap();
//! assert!(csv.contains("\"Removed\",\"U1\""));
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `bom-tools` library crate. For the
//! command-line tool run `bom-tools --help`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are not written for every fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BehaviorConfig, ExtractionConfig, OutputConfig, ReconciliationConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, ViewConfig};
pub use diff::{reconcile, DuplicatePolicy, Reconciler, ReconciliationResult};
pub use error::{BomDiffError, ErrorContext, Result};
pub use model::{ComponentRecord, FileKind, RecordSet, TrackedField};
pub use parsers::{detect_kind, extract, extract_records};
pub use reports::{ReportFormat, ReportGenerator};
