//! Input loading stage.
//!
//! Reads a file, settles its kind and extracts its records.

use super::PipelineError;
use crate::config::ExtractionConfig;
use crate::error::ErrorContext;
use crate::model::{FileKind, RecordSet};
use crate::parsers::{detect_kind, extract_records};
use anyhow::Result;
use std::path::Path;

/// Load the records of one input file.
///
/// `kind` overrides sniffing. Invalid UTF-8 is replaced rather than
/// rejected, so a stray byte in a description does not lose the file.
pub fn load_records(
    path: &Path,
    kind: Option<FileKind>,
    config: &ExtractionConfig,
    quiet: bool,
) -> Result<RecordSet> {
    let path_label = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| PipelineError::ReadFailed {
        path: path_label.clone(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_label.clone());
    let kind = kind.unwrap_or_else(|| detect_kind(&file_name, &content));

    if !quiet {
        tracing::info!("Extracting {} as {}", path_label, kind);
    }

    let set = extract_records(&content, kind, &file_name, config)
        .with_context(|| format!("reading {kind} input"))
        .map_err(|source| PipelineError::ExtractFailed {
            path: path_label.clone(),
            source,
        })?;

    if set.is_empty() {
        tracing::warn!("No component records found in {}", path_label);
    } else if !quiet {
        tracing::info!("Extracted {} records from {}", set.len(), path_label);
    }

    Ok(set)
}

/// Load both sides of a comparison in parallel.
pub fn load_pair(
    old: (&Path, Option<FileKind>),
    new: (&Path, Option<FileKind>),
    config: &ExtractionConfig,
    quiet: bool,
) -> Result<(RecordSet, RecordSet)> {
    let (old_set, new_set) = rayon::join(
        || load_records(old.0, old.1, config, quiet),
        || load_records(new.0, new.1, config, quiet),
    );
    Ok((old_set?, new_set?))
}
