#![no_main]
use bom_tools::parsers::{CsvExtractor, RecordExtractor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let _ = CsvExtractor::new().try_extract(&s, "fuzz.csv");
    let _ = CsvExtractor::new().skip_header(true).try_extract(&s, "fuzz.csv");
});
