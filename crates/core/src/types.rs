//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 입력 한 줄은 정규화를 거쳐 [`LogEntry`] 하나가 됩니다.
//! 저장소, 허브, HTTP 계층은 모두 이 타입을 주고받습니다.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 정규화된 심각도 레벨
///
/// JSON 직렬화 시 소문자 이름(`"warn"`, `"plain"` 등)으로 표현됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// trace (10)
    Trace,
    /// debug (20)
    Debug,
    /// info (30)
    Info,
    /// warn (40)
    Warn,
    /// error (50)
    Error,
    /// fatal (60)
    Fatal,
    /// 심각도를 판별할 수 없음
    #[default]
    Unknown,
    /// JSON이 아닌 일반 텍스트 라인
    Plain,
}

impl Level {
    /// 숫자 랭크를 임계값 구간으로 분류합니다.
    ///
    /// `fatal(>=60) error(>=50) warn(>=40) info(>=30) debug(>=20) trace(>=10)`,
    /// 그 미만은 `Unknown`입니다.
    pub fn from_rank(rank: i64) -> Self {
        match rank {
            r if r >= 60 => Self::Fatal,
            r if r >= 50 => Self::Error,
            r if r >= 40 => Self::Warn,
            r if r >= 30 => Self::Info,
            r if r >= 20 => Self::Debug,
            r if r >= 10 => Self::Trace,
            _ => Self::Unknown,
        }
    }

    /// 이름 테이블에서 레벨을 찾습니다.
    ///
    /// 입력은 이미 소문자로 정규화되어 있어야 합니다.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trace" => Some(Self::Trace),
            "debug" | "dbg" => Some(Self::Debug),
            "info" | "information" | "notice" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            "fatal" | "panic" | "critical" | "crit" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// 레벨의 대표 랭크. `Unknown`, `Plain`은 0입니다.
    pub fn nominal_rank(&self) -> i64 {
        match self {
            Self::Trace => 10,
            Self::Debug => 20,
            Self::Info => 30,
            Self::Warn => 40,
            Self::Error => 50,
            Self::Fatal => 60,
            Self::Unknown | Self::Plain => 0,
        }
    }

    /// 직렬화 이름과 동일한 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Unknown => "unknown",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 로그 엔트리
///
/// 입력 한 줄에서 만들어진 정규화 레코드입니다.
/// `id`는 저장소가 삽입 시점에 부여하며, 그 전까지는 0입니다.
/// `fields`는 입력이 JSON 객체로 디코딩된 경우에만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 저장소가 부여한 단조 증가 ID
    pub id: i64,
    /// 페이로드에서 추출한 이벤트 시각 (표시 형식)
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    /// 수신 시각 (표시 형식)
    #[serde(rename = "ingested")]
    pub ingested_at: String,
    /// 브로드캐스트 시각 (epoch ms, 지연 측정 모드에서만)
    #[serde(rename = "sentMs", default, skip_serializing_if = "Option::is_none")]
    pub sent_ms: Option<i64>,
    /// 정규화된 심각도
    pub level: Level,
    /// 숫자 랭크 (0이면 생략)
    #[serde(rename = "levelNum", default, skip_serializing_if = "Option::is_none")]
    pub level_rank: Option<i64>,
    /// 사람이 읽을 메시지
    #[serde(rename = "msg")]
    pub message: String,
    /// 원본 라인
    pub raw: String,
    /// 디코딩된 JSON 페이로드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    /// JSON 디코딩 실패 사유
    #[serde(rename = "parseError", default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl LogEntry {
    /// 일반 텍스트 엔트리를 생성합니다.
    pub fn plain(raw: impl Into<String>, message: impl Into<String>, ingested_at: String) -> Self {
        Self {
            id: 0,
            event_time: None,
            ingested_at,
            sent_ms: None,
            level: Level::Plain,
            level_rank: None,
            message: message.into(),
            raw: raw.into(),
            fields: None,
            parse_error: None,
        }
    }

    /// `fields`에서 채널 값을 찾습니다. `channel`이 없으면 `chanel`을 봅니다.
    pub fn channel(&self) -> Option<&Value> {
        let fields = self.fields.as_ref()?;
        fields.get("channel").or_else(|| fields.get("chanel"))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.id, self.level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_rank_thresholds() {
        assert_eq!(Level::from_rank(60), Level::Fatal);
        assert_eq!(Level::from_rank(75), Level::Fatal);
        assert_eq!(Level::from_rank(59), Level::Error);
        assert_eq!(Level::from_rank(40), Level::Warn);
        assert_eq!(Level::from_rank(30), Level::Info);
        assert_eq!(Level::from_rank(20), Level::Debug);
        assert_eq!(Level::from_rank(10), Level::Trace);
        assert_eq!(Level::from_rank(9), Level::Unknown);
        assert_eq!(Level::from_rank(-3), Level::Unknown);
    }

    #[test]
    fn level_from_name_table() {
        assert_eq!(Level::from_name("dbg"), Some(Level::Debug));
        assert_eq!(Level::from_name("notice"), Some(Level::Info));
        assert_eq!(Level::from_name("warning"), Some(Level::Warn));
        assert_eq!(Level::from_name("err"), Some(Level::Error));
        assert_eq!(Level::from_name("crit"), Some(Level::Fatal));
        assert_eq!(Level::from_name("verbose"), None);
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::Plain).unwrap();
        assert_eq!(json, "\"plain\"");
        let parsed: Level = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(parsed, Level::Fatal);
    }

    #[test]
    fn log_entry_omits_absent_members() {
        let entry = LogEntry::plain("server started", "server started", "2024-01-01 00:00:00.000".to_owned());
        let json = serde_json::to_value(&entry).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["level"], "plain");
        assert_eq!(obj["msg"], "server started");
        assert_eq!(obj["ingested"], "2024-01-01 00:00:00.000");
        for absent in ["time", "sentMs", "levelNum", "fields", "parseError"] {
            assert!(!obj.contains_key(absent), "{absent} should be omitted");
        }
    }

    #[test]
    fn log_entry_uses_wire_names() {
        let mut fields = Map::new();
        fields.insert("chanel".to_owned(), Value::from("api"));
        let entry = LogEntry {
            id: 7,
            event_time: Some("2024-01-01 00:00:00.000".to_owned()),
            ingested_at: "2024-01-01 00:00:01.000".to_owned(),
            sent_ms: Some(1_700_000_000_000),
            level: Level::Warn,
            level_rank: Some(40),
            message: "low disk".to_owned(),
            raw: "{}".to_owned(),
            fields: Some(fields),
            parse_error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["time"], "2024-01-01 00:00:00.000");
        assert_eq!(json["sentMs"], 1_700_000_000_000i64);
        assert_eq!(json["levelNum"], 40);
        assert_eq!(entry.channel(), Some(&Value::from("api")));
    }

    #[test]
    fn log_entry_display() {
        let entry = LogEntry::plain("boot", "boot", String::new());
        assert_eq!(entry.to_string(), "#0 [plain] boot");
    }
}
