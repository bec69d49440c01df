//! Record extractors.
//!
//! This module turns raw input text into a [`RecordSet`] of canonical
//! [`ComponentRecord`](crate::model::ComponentRecord)s. Three input kinds are
//! supported:
//!
//! - **BOM XML** (`DETAILS/RECORD` or `Component` layouts, aliased field names)
//! - **CSV** (positional columns)
//! - **Netlist text** (`NET REF:PIN ...` lines)
//!
//! Extraction is lenient by default: malformed input produces an empty set
//! and a logged warning, never an error. Strict mode turns structural
//! problems into [`ExtractError`]s.
//!
//! ## Usage
//!
//! ```
//! use bom_tools::config::ExtractionConfig;
//! use bom_tools::model::FileKind;
//! use bom_tools::parsers::{detect_kind, extract_records};
//!
//! let content = "R1,10k,2,Resistor,Yageo,RC0603\n";
//! let kind = detect_kind("rev_a.csv", content);
//! assert_eq!(kind, FileKind::Csv);
//!
//! let set = extract_records(content, kind, "rev_a.csv", &ExtractionConfig::default()).unwrap();
//! assert_eq!(set.records()[0].part_number, "RC0603");
//! ```

mod bom_xml;
mod delimited;
mod detection;
mod netlist;
mod traits;

pub use bom_xml::{
    BomXmlExtractor, DESCRIPTION_ALIASES, FOOTPRINT_ALIASES, MANUFACTURER_ALIASES,
    PART_NUMBER_ALIASES, QUANTITY_ALIASES, REFERENCE_ALIASES,
};
pub use delimited::{CsvExtractor, MIN_FIELDS};
pub use detection::{detect_kind, detect_kind_detailed, DetectionResult};
pub use netlist::{split_node, NetlistExtractor};
pub use traits::{ExtractError, FormatConfidence, RecordExtractor};

use crate::config::ExtractionConfig;
use crate::model::{FileKind, RecordSet};

/// Build the extractor for `kind`, configured from `config`.
#[must_use]
pub fn extractor_for(kind: FileKind, config: &ExtractionConfig) -> Box<dyn RecordExtractor> {
    match kind {
        FileKind::BomXml => Box::new(BomXmlExtractor::new()),
        FileKind::Csv => Box::new(CsvExtractor::new().skip_header(config.skip_header)),
        FileKind::NetlistText => Box::new(NetlistExtractor::new()),
    }
}

/// Extract the records of one input.
///
/// In lenient mode (the default) this never fails: unusable content yields
/// an empty set. With `config.strict` set, structural problems are returned
/// as errors.
pub fn extract_records(
    content: &str,
    kind: FileKind,
    source: &str,
    config: &ExtractionConfig,
) -> Result<RecordSet, ExtractError> {
    let extractor = extractor_for(kind, config);
    if config.strict {
        extractor.try_extract(content, source)
    } else {
        Ok(extractor.extract(content, source))
    }
}

/// Extract with the default lenient configuration.
#[must_use]
pub fn extract(content: &str, kind: FileKind, source: &str) -> RecordSet {
    extractor_for(kind, &ExtractionConfig::default()).extract(content, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_extraction_never_fails() {
        let config = ExtractionConfig::default();
        let set = extract_records("<broken", FileKind::BomXml, "x.xml", &config);
        assert!(set.map(|s| s.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_strict_extraction_reports_errors() {
        let config = ExtractionConfig {
            strict: true,
            ..ExtractionConfig::default()
        };
        let result = extract_records("<DETAILS><RECORD>", FileKind::BomXml, "x.xml", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_skip_header_passed_through() {
        let config = ExtractionConfig {
            skip_header: true,
            ..ExtractionConfig::default()
        };
        let content = "Ref,Value,Qty\nR1,10k,1\n";
        let set = extract_records(content, FileKind::Csv, "a.csv", &config).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_extract_helper() {
        let set = extract("VCC U1:1 R1:2", FileKind::NetlistText, "a.net");
        assert_eq!(set.len(), 2);
        assert_eq!(set.kind, Some(FileKind::NetlistText));
    }
}
