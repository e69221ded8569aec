//! 이벤트 시각 추출 및 표시 형식
//!
//! 숫자 타임스탬프는 크기로 단위를 추정합니다.
//!
//! | 범위 | 단위 |
//! |------|------|
//! | > 1e17 | 나노초 |
//! | > 1e14 | 마이크로초 |
//! | > 1e11 | 밀리초 |
//! | > 1e9 | 초 |
//!
//! 그 이하는 타임스탬프로 보지 않습니다.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// 이벤트 시각을 찾는 키 (우선순위 순)
pub const TIME_KEYS: &[&str] = &["time", "timestamp", "ts", "@timestamp"];

/// 로컬 시간, 밀리초 정밀도 표시 형식
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// 시각을 로컬 표시 형식으로 변환합니다.
pub fn format_display<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

/// 페이로드에서 이벤트 시각을 추출합니다.
///
/// 키 순서대로 시도하며 렌더링 결과가 비어 있으면 다음 키로 넘어갑니다.
pub fn extract_time(fields: &Map<String, Value>) -> Option<String> {
    TIME_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(format_time_value)
}

/// 시각 값 하나를 렌더링합니다.
///
/// 파싱할 수 없는 문자열은 그대로 통과시킵니다.
/// 숫자로 인식되지 않는 숫자나 문자열/숫자가 아닌 값은 `None`입니다.
pub fn format_time_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(time_from_number)
            .map(|t| format_display(&t)),
        Value::String(s) => {
            if let Some(rendered) = parse_time_string(s) {
                return Some(rendered);
            }
            if let Some(t) = s.parse::<f64>().ok().and_then(time_from_number) {
                return Some(format_display(&t));
            }
            (!s.is_empty()).then(|| s.clone())
        }
        _ => None,
    }
}

/// epoch 기준 숫자를 시각으로 변환합니다.
pub fn time_from_number(num: f64) -> Option<DateTime<Utc>> {
    if !num.is_finite() || num <= 0.0 {
        return None;
    }
    // f64 -> i64 변환은 포화(saturating)
    let whole = num as i64;
    if num > 1e17 {
        Some(DateTime::from_timestamp_nanos(whole))
    } else if num > 1e14 {
        DateTime::from_timestamp_micros(whole)
    } else if num > 1e11 {
        DateTime::from_timestamp_millis(whole)
    } else if num > 1e9 {
        DateTime::from_timestamp(whole, 0)
    } else {
        None
    }
}

/// RFC 3339 또는 `YYYY-MM-DD HH:MM:SS[.fff]`(UTC) 형식을 파싱합니다.
fn parse_time_string(raw: &str) -> Option<String> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(format_display(&t));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| format_display(&naive.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expected(secs: i64, nanos: u32) -> String {
        format_display(&DateTime::from_timestamp(secs, nanos).unwrap())
    }

    #[test]
    fn numeric_magnitudes() {
        let want = expected(1_700_000_000, 0);
        assert_eq!(format_time_value(&json!(1_700_000_000)), Some(want.clone()));
        assert_eq!(format_time_value(&json!(1_700_000_000_000_i64)), Some(want.clone()));
        assert_eq!(format_time_value(&json!(1_700_000_000_000_000_i64)), Some(want.clone()));
        assert_eq!(
            format_time_value(&json!(1_700_000_000_000_000_000_i64)),
            Some(want)
        );
        assert_eq!(
            format_time_value(&json!(1_700_000_000.5)),
            Some(expected(1_700_000_000, 0))
        );
    }

    #[test]
    fn small_or_invalid_numbers_are_rejected() {
        assert_eq!(format_time_value(&json!(12345)), None);
        assert_eq!(format_time_value(&json!(-1_700_000_000)), None);
        assert_eq!(format_time_value(&json!(0)), None);
        assert_eq!(time_from_number(f64::NAN), None);
        assert_eq!(time_from_number(f64::INFINITY), None);
    }

    #[test]
    fn string_layouts() {
        assert_eq!(
            format_time_value(&json!("2023-11-14T22:13:20Z")),
            Some(expected(1_700_000_000, 0))
        );
        assert_eq!(
            format_time_value(&json!("2023-11-14T22:13:20.123456789Z")),
            Some(expected(1_700_000_000, 123_456_789))
        );
        assert_eq!(
            format_time_value(&json!("2023-11-15T07:13:20+09:00")),
            Some(expected(1_700_000_000, 0))
        );
        assert_eq!(
            format_time_value(&json!("2023-11-14 22:13:20")),
            Some(expected(1_700_000_000, 0))
        );
        assert_eq!(
            format_time_value(&json!("2023-11-14 22:13:20.250")),
            Some(expected(1_700_000_000, 250_000_000))
        );
    }

    #[test]
    fn numeric_strings_are_reinterpreted() {
        assert_eq!(
            format_time_value(&json!("1700000000000")),
            Some(expected(1_700_000_000, 0))
        );
    }

    #[test]
    fn unparseable_strings_pass_through() {
        assert_eq!(format_time_value(&json!("yesterday")), Some("yesterday".to_owned()));
        assert_eq!(format_time_value(&json!("42")), Some("42".to_owned()));
        assert_eq!(format_time_value(&json!("")), None);
        assert_eq!(format_time_value(&json!(true)), None);
    }

    #[test]
    fn falls_through_to_next_key() {
        let Value::Object(fields) = json!({"time": 3, "ts": 1_700_000_000}) else {
            unreachable!()
        };
        assert_eq!(extract_time(&fields), Some(expected(1_700_000_000, 0)));

        let Value::Object(fields) = json!({"level": "info"}) else {
            unreachable!()
        };
        assert_eq!(extract_time(&fields), None);
    }

    #[test]
    fn display_has_millisecond_precision() {
        let rendered = expected(1_700_000_000, 987_654_321);
        assert_eq!(rendered.len(), "2023-11-14 22:13:20.987".len());
        assert!(rendered.ends_with(".987"));
    }
}
