#![no_main]

use libfuzzer_sys::fuzz_target;
use zlog_core::types::Level;
use zlog_pipeline::normalize;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let entry = normalize(&line);

    // 디코딩 실패는 항상 plain
    if entry.parse_error.is_some() {
        assert_eq!(entry.level, Level::Plain);
        assert!(entry.fields.is_none());
    }
});
