//! 통합 테스트 -- 파이프라인 전체 흐름 검증
//!
//! 입력 스트림에서 정규화, 저장, 브로드캐스트, 필터링까지의 흐름을 검증합니다.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use zlog_core::pipeline::{HealthStatus, Pipeline};
use zlog_core::types::{Level, LogEntry};
use zlog_pipeline::{
    FilterSet, Hub, LineIngestor, LogPipelineBuilder, LogStore, PipelineConfigBuilder,
    SyntaxError, normalize,
};

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// 입력 -> 저장소 -> 구독자 흐름 테스트
#[tokio::test]
async fn test_stream_to_subscriber_flow() {
    let (mut writer, reader) = tokio::io::duplex(4096);
    let config = PipelineConfigBuilder::new()
        .max_entries(100)
        .subscriber_buffer(16)
        .build()
        .unwrap();
    let mut pipeline = LogPipelineBuilder::new()
        .config(config)
        .source(BufReader::new(reader))
        .build()
        .unwrap();
    let store = pipeline.store();
    let hub = pipeline.hub();

    pipeline.start().await.unwrap();
    let mut sub = hub.subscribe().await.unwrap();

    writer
        .write_all(b"{\"level\":\"warn\",\"msg\":\"low disk\",\"ts\":1700000000}\nserver started\n")
        .await
        .unwrap();

    let first = sub.recv().await.unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(first.level, Level::Warn);
    assert_eq!(first.level_rank, Some(40));
    assert_eq!(first.message, "low disk");
    assert!(first.event_time.is_some());

    let second = sub.recv().await.unwrap();
    assert_eq!(second.id, 2);
    assert_eq!(second.level, Level::Plain);
    assert!(second.parse_error.is_some());

    assert_eq!(store.len(), 2);
    assert!(pipeline.health_check().await.is_healthy());

    // 입력 종료 후에도 저장소와 허브는 유지
    drop(writer);
    wait_until(|| pipeline.ingest_finished()).await;
    assert!(matches!(pipeline.health_check().await, HealthStatus::Degraded(_)));
    assert!(hub.subscribe().await.is_ok());

    pipeline.stop().await.unwrap();
    assert_eq!(sub.recv().await, None);
}

/// 저장소 용량 초과 시 마지막 max개만 유지
#[tokio::test]
async fn test_store_bound_through_pipeline() {
    let input: String = (0..25).map(|i| format!("{{\"msg\":\"m{i}\"}}\n")).collect();
    let config = PipelineConfigBuilder::new().max_entries(10).build().unwrap();
    let mut pipeline = LogPipelineBuilder::new()
        .config(config)
        .source(std::io::Cursor::new(input.into_bytes()))
        .build()
        .unwrap();
    pipeline.start().await.unwrap();
    wait_until(|| pipeline.ingest_finished()).await;

    let list = pipeline.store().list();
    assert_eq!(list.len(), 10);
    let ids: Vec<i64> = list.iter().map(|e| e.id).collect();
    assert_eq!(ids, (16..=25).collect::<Vec<_>>());
    assert_eq!(list[0].message, "m15");

    pipeline.stop().await.unwrap();
}

/// 저장소 스냅샷에 필터 적용
#[test]
fn test_filter_store_snapshot() {
    let store = LogStore::new(100);
    for line in [
        r#"{"level":"info","msg":"GET /api/users","http":{"status":200}}"#,
        r#"{"level":"error","msg":"GET /api/orders","http":{"status":503}}"#,
        r#"{"level":"error","msg":"db timeout","channel":"db"}"#,
        "worker crashed: connection refused",
    ] {
        store.add(normalize(line));
    }
    let snapshot = store.list();
    let count = |filters: &[&str]| {
        let set = FilterSet::parse(filters).unwrap();
        snapshot.iter().filter(|e| set.matches(e)).count()
    };

    assert_eq!(count(&[]), 4);
    assert_eq!(count(&[".level == error"]), 2);
    assert_eq!(count(&[".http.status >= 500"]), 1);
    assert_eq!(count(&[".chanel == db"]), 1);
    assert_eq!(count(&["refused"]), 1);
    assert_eq!(count(&["/get \\/api/i", ".level != error"]), 1);
    assert_eq!(count(&[".parseError"]), 1);
}

/// 하나라도 잘못된 필터가 있으면 전체 실패
#[test]
fn test_invalid_filter_rejects_whole_set() {
    let err = FilterSet::parse([".level == error", ".a["]).unwrap_err();
    assert_eq!(err.syntax(), Some(&SyntaxError::UnclosedBracket));
    assert!(err.to_string().contains(".a["));

    let err = FilterSet::parse(["select(.level == \"error\")"]).unwrap_err();
    assert_eq!(err.syntax(), Some(&SyntaxError::SelectUnsupported));
}

/// 느린 구독자가 수집을 막지 않음
#[tokio::test]
async fn test_slow_subscriber_does_not_stall_ingest() {
    let store = Arc::new(LogStore::new(1000));
    let cancel = CancellationToken::new();
    let (hub, handle) = Hub::<Arc<LogEntry>>::new(8, 2, cancel.clone());
    tokio::spawn(hub.run());

    let mut slow = handle.subscribe().await.unwrap();
    let ingestor = LineIngestor::new(Arc::clone(&store), handle.clone(), 1024);

    let input: String = (0..200).map(|i| format!("line {i}\n")).collect();
    let stats = tokio::time::timeout(
        Duration::from_secs(2),
        ingestor.run(input.as_bytes(), cancel.clone()),
    )
    .await
    .expect("ingest stalled")
    .unwrap();
    assert_eq!(stats.lines, 200);
    assert_eq!(store.len(), 200);

    // 명령 순서 보장: 모든 브로드캐스트 처리 후 해제
    handle.subscriber_count().await.unwrap();
    slow.unregister().await.unwrap();
    let mut received = Vec::new();
    while let Some(entry) = slow.recv().await {
        received.push(entry.id);
    }
    assert_eq!(received, vec![1, 2]);

    cancel.cancel();
}
