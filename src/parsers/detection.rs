//! File-kind sniffing for undeclared inputs.
//!
//! The file name is consulted first (extension, then well-known words in the
//! name), then the content. Content checks reuse each extractor's
//! `detect()` so the heuristics live next to the code that parses the kind.

use super::traits::{FormatConfidence, RecordExtractor};
use super::{BomXmlExtractor, CsvExtractor, NetlistExtractor};
use crate::model::FileKind;
use std::path::Path;

/// Result of kind detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub kind: FileKind,
    pub confidence: FormatConfidence,
    /// Short human-readable reason, logged at debug level
    pub reason: &'static str,
}

impl DetectionResult {
    const fn new(kind: FileKind, confidence: FormatConfidence, reason: &'static str) -> Self {
        Self {
            kind,
            confidence,
            reason,
        }
    }
}

/// Detect the kind of an input from its file name and content.
///
/// Always returns a kind; when nothing matches, content with a comma on the
/// first non-empty line is treated as CSV and everything else as a netlist.
#[must_use]
pub fn detect_kind(file_name: &str, content: &str) -> FileKind {
    let result = detect_kind_detailed(file_name, content);
    tracing::debug!(
        "Detected {} as {} ({}, confidence {:.2})",
        file_name,
        result.kind,
        result.reason,
        result.confidence.value()
    );
    result.kind
}

/// Like [`detect_kind`] but also reports confidence and the deciding rule.
#[must_use]
pub fn detect_kind_detailed(file_name: &str, content: &str) -> DetectionResult {
    let path = Path::new(file_name);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name)
        .to_lowercase();
    let starts_with_markup = content
        .trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with('<');

    if extension.as_deref() == Some("xml") {
        return DetectionResult::new(FileKind::BomXml, FormatConfidence::CERTAIN, "xml extension");
    }
    if starts_with_markup {
        return DetectionResult::new(
            FileKind::BomXml,
            BomXmlExtractor::new().detect(content),
            "markup content",
        );
    }
    if extension.as_deref() == Some("csv") {
        return DetectionResult::new(FileKind::Csv, FormatConfidence::CERTAIN, "csv extension");
    }
    if stem.contains("bom") {
        return DetectionResult::new(FileKind::Csv, FormatConfidence::MEDIUM, "bom in file name");
    }
    if matches!(extension.as_deref(), Some("net" | "netlist")) {
        return DetectionResult::new(
            FileKind::NetlistText,
            FormatConfidence::CERTAIN,
            "netlist extension",
        );
    }
    if stem.contains("net") {
        return DetectionResult::new(
            FileKind::NetlistText,
            FormatConfidence::MEDIUM,
            "net in file name",
        );
    }

    let csv = CsvExtractor::new().detect(content);
    let netlist = NetlistExtractor::new().detect(content);
    if csv.can_extract() && csv >= netlist {
        DetectionResult::new(FileKind::Csv, csv, "comma-separated content")
    } else if netlist.can_extract() {
        DetectionResult::new(FileKind::NetlistText, netlist, "REF:PIN nodes in content")
    } else {
        DetectionResult::new(FileKind::NetlistText, FormatConfidence::LOW, "fallback")
    }
}
