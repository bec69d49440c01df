#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz kind sniffing.
///
/// The first line is used as the file name, the rest as content, so both
/// the name rules and the content heuristics are reached.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (name, content) = s.split_once('\n').unwrap_or((s, ""));
        let _ = bom_tools::parsers::detect_kind_detailed(name, content);
    }
});
