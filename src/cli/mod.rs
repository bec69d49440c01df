//! Subcommand handlers.
//!
//! `main.rs` resolves flags and config files into a [`DiffConfig`] or
//! [`ViewConfig`]; the handlers here validate it, run the pipeline and
//! return the process exit code.

mod diff;
mod view;

pub use diff::run_diff;
pub use view::run_view;

pub use crate::config::{DiffConfig, ViewConfig};
