#![no_main]
use bom_tools::parsers::{NetlistExtractor, RecordExtractor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = NetlistExtractor::new().try_extract(s, "fuzz.net");
    }
});
