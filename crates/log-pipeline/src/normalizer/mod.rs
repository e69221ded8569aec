//! 로그 정규화 -- 원시 라인을 [`LogEntry`]로 변환
//!
//! 입력 한 줄을 JSON 객체로 디코딩해 보고, 성공하면 메시지, 심각도,
//! 이벤트 시각을 추출합니다. 실패해도 라인은 버려지지 않고
//! `plain` 엔트리로 보존되며 디코딩 에러가 `parse_error`에 남습니다.
//!
//! # 추출 키 (우선순위 순)
//! - 메시지: `msg`, `message`, `event`, `error`, `err`
//! - 심각도: `level`, `severity`, `lvl`, `level_name` ([`level`])
//! - 시각: `time`, `timestamp`, `ts`, `@timestamp` ([`time`])
//!
//! # 사용 예시
//! ```ignore
//! let entry = normalize(r#"{"level":"warn","msg":"low disk","ts":1700000000}"#);
//! assert_eq!(entry.level, Level::Warn);
//! assert_eq!(entry.level_rank, Some(40));
//! ```

pub mod level;
pub mod time;

pub use level::{extract_level, level_from_value};
pub use time::{DISPLAY_FORMAT, extract_time, format_display};

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use zlog_core::types::{Level, LogEntry};

use crate::filter::value::render;

/// 메시지를 찾는 키 (우선순위 순)
pub const MESSAGE_KEYS: &[&str] = &["msg", "message", "event", "error", "err"];

/// 현재 시각을 수신 시각으로 사용해 라인을 정규화합니다.
pub fn normalize(line: &str) -> LogEntry {
    normalize_at(line, Local::now())
}

/// 지정한 수신 시각으로 라인을 정규화합니다.
///
/// 끝의 `\r`은 제거됩니다. 반환되는 엔트리의 `id`는 0이며
/// 저장소에 추가될 때 부여됩니다.
pub fn normalize_at(line: &str, ingested: DateTime<Local>) -> LogEntry {
    let line = line.trim_end_matches('\r');
    let ingested_at = format_display(&ingested);

    if line.trim().is_empty() {
        return LogEntry::plain(line, "", ingested_at);
    }

    let fields = match serde_json::from_str::<Map<String, Value>>(line) {
        Ok(fields) => fields,
        Err(e) => {
            let mut entry = LogEntry::plain(line, line, ingested_at);
            entry.parse_error = Some(e.to_string());
            return entry;
        }
    };

    let message = pick_message(&fields).unwrap_or_else(|| line.to_owned());
    let (level, rank) = extract_level(&fields).unwrap_or((Level::Unknown, 0));
    let event_time = extract_time(&fields);

    LogEntry {
        id: 0,
        event_time,
        ingested_at,
        sent_ms: None,
        level,
        level_rank: (rank != 0).then_some(rank),
        message,
        raw: line.to_owned(),
        fields: Some(fields),
        parse_error: None,
    }
}

/// 첫 번째로 유효한 메시지 값을 찾습니다.
///
/// null과 공백뿐인 문자열은 건너뛰고, 문자열이 아닌 값은 문자열 표현을 사용합니다.
fn pick_message(fields: &Map<String, Value>) -> Option<String> {
    MESSAGE_KEYS.iter().find_map(|key| match fields.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(render(value).into_owned()),
    })
}
