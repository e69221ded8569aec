#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zlog_pipeline::{FilterSet, normalize};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 필터 문자열 목록
    filters: Vec<String>,
    /// 정규화할 입력 라인
    line: String,
}

fuzz_target!(|input: FuzzInput| {
    if input.filters.len() > 8 {
        return;
    }
    let Ok(set) = FilterSet::parse(&input.filters) else {
        return;
    };
    let entry = normalize(&input.line);
    let _ = set.matches(&entry);
});
