//! 값 모델 -- 경로 해석, 숫자 변환, 문자열 표현, 값 동등성
//!
//! 로그 필드와 필터 리터럴은 모두 [`serde_json::Value`]로 표현됩니다.
//! 이 모듈은 비교 연산에 필요한 변환 규칙을 한곳에 모읍니다.
//!
//! # 규칙
//! - 숫자 변환: 숫자는 그대로, 문자열은 trim 후 `-?\d+(\.\d+)?` 형태일 때만 숫자로 취급
//! - 문자열 표현: 문자열은 그대로, 정수는 소수점 없이, 실수는 최단 표현,
//!   불리언은 `true`/`false`, null은 `null`, 배열/객체는 압축 JSON
//! - 값 동등성: 양쪽이 숫자로 변환되면 수치 비교, 둘 다 불리언이면 불리언 비교,
//!   그 외에는 문자열 표현 비교

use std::borrow::Cow;

use serde_json::{Number, Value};

use super::types::{FieldPath, PathSegment};

/// 스코프에서 경로를 따라 값을 찾습니다.
///
/// 키 세그먼트는 객체만, 인덱스 세그먼트는 배열만 통과합니다.
/// 누락, 타입 불일치, 범위 밖 인덱스, null 값은 모두 `None`입니다.
pub fn resolve<'a>(scope: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = scope;
    for segment in path.segments() {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(index), Value::Array(items)) => {
                let index = usize::try_from(*index).ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// 값을 숫자로 변환합니다.
///
/// 불리언, null, 배열, 객체, 숫자 형태가 아닌 문자열은 변환되지 않습니다.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if is_decimal_literal(trimmed) {
                trimmed.parse::<f64>().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// `-?\d+(\.\d+)?` 형태인지 검사합니다.
pub fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

/// `-?\d+` 형태인지 검사합니다.
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// 값의 문자열 표현
pub fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(render_number(n)),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 Display는 정수값 실수를 소수점 없이 출력
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// 배열 `contains`에 쓰이는 값 동등성
pub fn values_equal(actual: &Value, expected: &Value) -> bool {
    if let (Some(l), Some(r)) = (coerce_number(actual), coerce_number(expected)) {
        return l == r;
    }
    if let (Value::Bool(l), Value::Bool(r)) = (actual, expected) {
        return l == r;
    }
    render(actual) == render(expected)
}
