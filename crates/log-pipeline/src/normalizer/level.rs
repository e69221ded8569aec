//! 심각도 추출
//!
//! 숫자 값은 임계값 구간으로, 문자열 값은 고정 테이블로 매핑합니다.

use serde_json::{Map, Value};

use zlog_core::types::Level;

/// 심각도를 찾는 키 (우선순위 순)
pub const LEVEL_KEYS: &[&str] = &["level", "severity", "lvl", "level_name"];

/// 페이로드에서 심각도와 랭크를 추출합니다.
///
/// 첫 번째로 존재하는 키의 값만 사용합니다. 키가 없으면 `None`입니다.
pub fn extract_level(fields: &Map<String, Value>) -> Option<(Level, i64)> {
    LEVEL_KEYS
        .iter()
        .find_map(|key| fields.get(*key))
        .map(level_from_value)
}

/// 값 하나를 심각도로 변환합니다.
pub fn level_from_value(value: &Value) -> (Level, i64) {
    match value {
        Value::Number(n) => {
            // 실수는 0 방향으로 절삭
            let rank = n
                .as_i64()
                .unwrap_or_else(|| n.as_f64().map_or(0, |f| f as i64));
            (Level::from_rank(rank), rank)
        }
        Value::String(s) => level_from_str(s),
        _ => (Level::Unknown, 0),
    }
}

/// 문자열 심각도를 변환합니다. 대소문자와 앞뒤 공백은 무시합니다.
pub fn level_from_str(raw: &str) -> (Level, i64) {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return (Level::Unknown, 0);
    }
    if let Ok(rank) = name.parse::<i64>() {
        return (Level::from_rank(rank), rank);
    }
    match Level::from_name(&name) {
        Some(level) => (level, level.nominal_rank()),
        None => (Level::Unknown, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn numeric_levels_keep_original_rank() {
        assert_eq!(level_from_value(&json!(30)), (Level::Info, 30));
        assert_eq!(level_from_value(&json!(55)), (Level::Error, 55));
        assert_eq!(level_from_value(&json!(49.9)), (Level::Warn, 49));
        assert_eq!(level_from_value(&json!(5)), (Level::Unknown, 5));
        assert_eq!(level_from_value(&json!(70)), (Level::Fatal, 70));
    }

    #[test]
    fn string_levels() {
        assert_eq!(level_from_str("WARNING"), (Level::Warn, 40));
        assert_eq!(level_from_str(" notice "), (Level::Info, 30));
        assert_eq!(level_from_str("panic"), (Level::Fatal, 60));
        assert_eq!(level_from_str("dbg"), (Level::Debug, 20));
        assert_eq!(level_from_str("50"), (Level::Error, 50));
        assert_eq!(level_from_str("verbose"), (Level::Unknown, 0));
        assert_eq!(level_from_str("  "), (Level::Unknown, 0));
    }

    #[test]
    fn other_types_are_unknown() {
        assert_eq!(level_from_value(&json!(true)), (Level::Unknown, 0));
        assert_eq!(level_from_value(&Value::Null), (Level::Unknown, 0));
        assert_eq!(level_from_value(&json!({"name": "info"})), (Level::Unknown, 0));
    }

    #[test]
    fn first_present_key_wins() {
        let f = fields(json!({"severity": "error", "lvl": "debug"}));
        assert_eq!(extract_level(&f), Some((Level::Error, 50)));

        // 첫 키의 값이 쓸모없어도 다음 키로 넘어가지 않음
        let f = fields(json!({"level": null, "severity": "error"}));
        assert_eq!(extract_level(&f), Some((Level::Unknown, 0)));

        let f = fields(json!({"msg": "no level"}));
        assert_eq!(extract_level(&f), None);
    }
}
