#![no_main]

use libfuzzer_sys::fuzz_target;
use zlog_pipeline::parse_filter;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // 같은 입력은 항상 같은 결과
        let first = parse_filter(raw);
        let second = parse_filter(raw);
        assert_eq!(first, second);
    }
});
