//! CSV report generator.
//!
//! Diff reports have one row per added or removed record and two rows
//! (old, new) per changed record. Every field is double-quoted.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::ReconciliationResult;
use crate::model::{ComponentRecord, RecordSet};
use ::csv::{QuoteStyle, Writer, WriterBuilder};

/// Column header of the diff export
pub const DIFF_HEADER: [&str; 6] = [
    "Change Type",
    "Reference",
    "Part Number",
    "Quantity",
    "Package",
    "Description",
];

/// Column header of the view export
pub const VIEW_HEADER: [&str; 6] = [
    "Reference",
    "Part Number",
    "Quantity",
    "Package",
    "Description",
    "Manufacturer",
];

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn new_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new())
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::SerializationError(e.to_string()))
}

fn write_change_row(
    writer: &mut Writer<Vec<u8>>,
    change_type: &str,
    record: &ComponentRecord,
) -> Result<(), ReportError> {
    let quantity = record.quantity.to_string();
    writer.write_record([
        change_type,
        record.reference.as_str(),
        record.part_number.as_str(),
        quantity.as_str(),
        record.footprint.as_str(),
        record.description.as_str(),
    ])?;
    Ok(())
}

impl ReportGenerator for CsvReporter {
    fn generate_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut writer = new_writer();
        writer.write_record(DIFF_HEADER)?;

        for record in &result.added {
            write_change_row(&mut writer, "Added", record)?;
        }
        for record in &result.removed {
            write_change_row(&mut writer, "Removed", record)?;
        }
        for change in &result.changed {
            write_change_row(&mut writer, "Changed (Old)", &change.original)?;
            write_change_row(&mut writer, "Changed (New)", &change.modified)?;
        }
        if config.include_unchanged {
            for record in result.unchanged.iter().flatten() {
                write_change_row(&mut writer, "Unchanged", record)?;
            }
        }

        finish(writer)
    }

    fn generate_view_report(
        &self,
        records: &RecordSet,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut writer = new_writer();
        writer.write_record(VIEW_HEADER)?;

        for record in records {
            let quantity = record.quantity.to_string();
            writer.write_record([
                record.reference.as_str(),
                record.part_number.as_str(),
                quantity.as_str(),
                record.footprint.as_str(),
                record.description.as_str(),
                record.manufacturer.as_str(),
            ])?;
        }

        finish(writer)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Reconciler;

    fn scenario() -> ReconciliationResult {
        let old = RecordSet::from_records(
            "old.csv",
            vec![
                ComponentRecord::new("R1").with_part_number("P1").with_quantity(1),
                ComponentRecord::new("R2").with_part_number("P2").with_quantity(2),
            ],
        );
        let new = RecordSet::from_records(
            "new.csv",
            vec![
                ComponentRecord::new("R2").with_part_number("P2").with_quantity(3),
                ComponentRecord::new("R3")
                    .with_part_number("P3")
                    .with_quantity(1)
                    .with_description("Res \"thin\", 1%"),
            ],
        );
        Reconciler::new().reconcile(&old, &new)
    }

    #[test]
    fn test_diff_export_snapshot() {
        let csv = CsvReporter::new()
            .generate_diff_report(&scenario(), &ReportConfig::default())
            .expect("csv");
        insta::assert_snapshot!(csv.trim_end(), @r###"
        "Change Type","Reference","Part Number","Quantity","Package","Description"
        "Added","R3","P3","1","","Res ""thin"", 1%"
        "Removed","R1","P1","1","",""
        "Changed (Old)","R2","P2","2","",""
        "Changed (New)","R2","P2","3","",""
        "###);
    }

    #[test]
    fn test_row_counts() {
        let csv = CsvReporter::new()
            .generate_diff_report(&scenario(), &ReportConfig::default())
            .expect("csv");
        assert_eq!(csv.lines().count(), 1 + 1 + 1 + 2);
    }

    #[test]
    fn test_unchanged_rows_only_when_requested() {
        let old = RecordSet::from_records("a", vec![ComponentRecord::new("R1")]);
        let result = Reconciler::new().include_unchanged(true).reconcile(&old, &old);
        let config = ReportConfig {
            include_unchanged: true,
            ..ReportConfig::default()
        };
        let csv = CsvReporter::new().generate_diff_report(&result, &config).expect("csv");
        assert!(csv.contains("\"Unchanged\",\"R1\""));

        let csv = CsvReporter::new()
            .generate_diff_report(&result, &ReportConfig::default())
            .expect("csv");
        assert!(!csv.contains("Unchanged"));
    }

    #[test]
    fn test_view_export() {
        let set = RecordSet::from_records(
            "bom.csv",
            vec![ComponentRecord::new("U1").with_manufacturer("TI").with_quantity(1)],
        );
        let csv = CsvReporter::new()
            .generate_view_report(&set, &ReportConfig::default())
            .expect("csv");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("\"Reference\",\"Part Number\",\"Quantity\",\"Package\",\"Description\",\"Manufacturer\"")
        );
        assert_eq!(lines.next(), Some("\"U1\",\"\",\"1\",\"\",\"\",\"TI\""));
    }
}
