#![no_main]
use bom_tools::model::FileKind;
use bom_tools::parsers::{BomXmlExtractor, RecordExtractor};
use libfuzzer_sys::fuzz_target;

/// Fuzz the XML extractor in both strict and lenient mode.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = BomXmlExtractor::new().try_extract(s, "fuzz.xml");
        let _ = bom_tools::extract(s, FileKind::BomXml, "fuzz.xml");
    }
});
