//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`
//! 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `zlog_`
//! - 구성 요소: `ingest_`, `store_`, `hub_`
//! - 접미어: `_total` (counter), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(zlog_core::metrics::INGEST_LINES_TOTAL).increment(1);
//! ```

// ─── Ingest 메트릭 ────────────────────────────────────────────────

/// Ingest: 수신한 전체 라인 수 (counter)
pub const INGEST_LINES_TOTAL: &str = "zlog_ingest_lines_total";

/// Ingest: JSON 디코딩에 실패한 라인 수 (counter)
pub const INGEST_PARSE_ERRORS_TOTAL: &str = "zlog_ingest_parse_errors_total";

/// Ingest: 최대 길이를 넘어 버려진 라인 수 (counter)
pub const INGEST_OVERSIZED_LINES_TOTAL: &str = "zlog_ingest_oversized_lines_total";

// ─── Store 메트릭 ─────────────────────────────────────────────────

/// Store: 용량 초과로 제거된 엔트리 수 (counter)
pub const STORE_EVICTED_TOTAL: &str = "zlog_store_evicted_total";

/// Store: 현재 보관 중인 엔트리 수 (gauge)
pub const STORE_ENTRIES: &str = "zlog_store_entries";

// ─── Hub 메트릭 ───────────────────────────────────────────────────

/// Hub: 현재 등록된 구독자 수 (gauge)
pub const HUB_SUBSCRIBERS: &str = "zlog_hub_subscribers";

/// Hub: 구독자 버퍼가 가득 차 버려진 메시지 수 (counter)
pub const HUB_DROPPED_TOTAL: &str = "zlog_hub_dropped_total";

/// Hub: 브로드캐스트된 메시지 수 (counter)
pub const HUB_BROADCAST_TOTAL: &str = "zlog_hub_broadcast_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다. 레코더가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge};

    // Ingest
    describe_counter!(
        INGEST_LINES_TOTAL,
        "Total number of input lines read from the line source"
    );
    describe_counter!(
        INGEST_PARSE_ERRORS_TOTAL,
        "Lines that were not a JSON object and were kept as plain entries"
    );
    describe_counter!(
        INGEST_OVERSIZED_LINES_TOTAL,
        "Lines skipped because they exceeded the maximum line length"
    );

    // Store
    describe_counter!(
        STORE_EVICTED_TOTAL,
        "Entries evicted from the in-memory store because of the capacity bound"
    );
    describe_gauge!(STORE_ENTRIES, "Entries currently retained in the store");

    // Hub
    describe_gauge!(HUB_SUBSCRIBERS, "Currently registered live subscribers");
    describe_counter!(
        HUB_DROPPED_TOTAL,
        "Messages dropped for a subscriber whose delivery buffer was full"
    );
    describe_counter!(HUB_BROADCAST_TOTAL, "Messages broadcast by the hub");
}
