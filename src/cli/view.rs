//! View command handler.
//!
//! Implements the `view` subcommand for listing the records of a single file.

use crate::config::{Validatable, ViewConfig};
use crate::pipeline::{exit_codes, load_records, output_view_report};
use anyhow::{bail, Result};

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
    if let Some(error) = config.validate().into_iter().next() {
        bail!("{error}");
    }

    let records = load_records(
        &config.path,
        config.kind,
        &config.extraction,
        config.behavior.quiet,
    )?;

    output_view_report(&config, &records)?;

    Ok(exit_codes::SUCCESS)
}
