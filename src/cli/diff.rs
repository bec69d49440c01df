//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two BOM or netlist files.

use crate::config::{DiffConfig, Validatable};
use crate::pipeline::{compute_diff, determine_exit_code, load_pair, output_report};
use anyhow::{bail, Result};

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if let Some(first) = errors.first() {
        for error in &errors[1..] {
            tracing::error!("{}", error);
        }
        bail!("{first}");
    }

    let quiet = config.behavior.quiet;
    let (old, new) = load_pair(
        (&config.paths.old, config.old_kind),
        (&config.paths.new, config.new_kind),
        &config.extraction,
        quiet,
    )?;

    let result = compute_diff(&config, &old, &new);
    let exit_code = determine_exit_code(&config.behavior, &result);

    output_report(&config, &result, &old, &new)?;

    Ok(exit_code)
}
