//! 필터 엔진 벤치마크
//!
//! 필터 파싱 비용과 저장소 스냅샷 전체에 대한 매칭 처리량을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use zlog_pipeline::{FilterSet, LogStore, normalize, parse_filter};

const FILTERS: &[(&str, &str)] = &[
    ("exists", ".http.status"),
    ("numeric", ".http.status >= 500"),
    ("string_op", ".http.path startswith /api"),
    ("bracket", ".tags[0] == \"db\""),
    ("message_contains", "timeout"),
    ("regex", "/time(d)?out|refused/i"),
];

fn sample_line(i: usize) -> String {
    match i % 3 {
        0 => format!(
            r#"{{"level":"info","msg":"request {i}","http":{{"path":"/api/v1/items/{i}","status":{}}},"tags":["db","cache"]}}"#,
            200 + (i % 4) * 100
        ),
        1 => format!(r#"{{"level":50,"msg":"upstream timeout after {i}ms","channel":"proxy"}}"#),
        _ => format!("plain line {i} connection refused"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_parse");
    group.throughput(Throughput::Elements(1));
    for (name, raw) in FILTERS {
        group.bench_with_input(BenchmarkId::new("parse", name), raw, |b, raw| {
            b.iter(|| parse_filter(black_box(raw)).unwrap())
        });
    }
    group.finish();
}

fn bench_match_snapshot(c: &mut Criterion) {
    let store = LogStore::new(10_000);
    for i in 0..10_000 {
        store.add(normalize(&sample_line(i)));
    }
    let snapshot = store.list();

    let mut group = c.benchmark_group("filter_match");
    group.throughput(Throughput::Elements(snapshot.len() as u64));
    for (name, raw) in FILTERS {
        let filters = FilterSet::parse([*raw]).unwrap();
        group.bench_with_input(BenchmarkId::new("snapshot_10k", name), &filters, |b, filters| {
            b.iter(|| snapshot.iter().filter(|e| filters.matches(e)).count())
        });
    }

    let combined = FilterSet::parse([".level == error", ".channel == proxy", "/timeout/"]).unwrap();
    group.bench_function("snapshot_10k/combined", |b| {
        b.iter(|| snapshot.iter().filter(|e| combined.matches(e)).count())
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_match_snapshot);
criterion_main!(benches);
