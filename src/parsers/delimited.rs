//! Positional CSV BOM extractor.
//!
//! Columns are read by position, never by header name:
//! `reference, value, quantity, description, manufacturer, partNumber`.
//! Rows with fewer than three fields are skipped. There is no header
//! detection; set `skip_header` when the first row is a header.

use super::traits::{ExtractError, FormatConfidence, RecordExtractor};
use crate::model::{parse_quantity, ComponentRecord, FileKind, RecordSet};

const COL_REFERENCE: usize = 0;
const COL_VALUE: usize = 1;
const COL_QUANTITY: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_MANUFACTURER: usize = 4;
const COL_PART_NUMBER: usize = 5;

/// Minimum number of fields for a row to count as a record
pub const MIN_FIELDS: usize = 3;

/// Extractor for comma-separated BOMs
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExtractor {
    skip_header: bool,
}

impl CsvExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self { skip_header: false }
    }

    /// Treat the first row as a header and ignore it
    #[must_use]
    pub const fn skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }
}

impl RecordExtractor for CsvExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Csv
    }

    fn try_extract(&self, content: &str, source: &str) -> Result<RecordSet, ExtractError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.skip_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut set = RecordSet::new(source).with_kind(FileKind::Csv);
        let mut skipped = 0usize;

        for (idx, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!("Skipping unreadable CSV row {} in {}: {}", idx + 1, source, err);
                    skipped += 1;
                    continue;
                }
            };
            if row.len() < MIN_FIELDS {
                skipped += 1;
                continue;
            }
            let field = |i: usize| row.get(i).unwrap_or_default().to_string();
            set.push(ComponentRecord {
                reference: field(COL_REFERENCE),
                value: field(COL_VALUE),
                quantity: parse_quantity(&field(COL_QUANTITY)),
                description: field(COL_DESCRIPTION),
                manufacturer: field(COL_MANUFACTURER),
                part_number: field(COL_PART_NUMBER),
                source_file: source.to_string(),
                ..ComponentRecord::default()
            });
        }

        tracing::debug!(
            "Extracted {} CSV record(s) from {} ({} row(s) skipped)",
            set.len(),
            source,
            skipped
        );
        Ok(set)
    }

    fn detect(&self, content: &str) -> FormatConfidence {
        let Some(first) = content.lines().find(|line| !line.trim().is_empty()) else {
            return FormatConfidence::NONE;
        };
        if first.trim_start().starts_with('<') {
            return FormatConfidence::NONE;
        }
        match first.matches(',').count() {
            0 => FormatConfidence::NONE,
            1 => FormatConfidence::LOW,
            _ => FormatConfidence::HIGH,
        }
    }
}
