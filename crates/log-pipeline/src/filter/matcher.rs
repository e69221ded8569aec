//! 필터 평가 -- 스코프 구성 및 표현식 매칭
//!
//! [`matches`]는 엔트리 하나에 대해 스코프를 한 번 만들고
//! 모든 표현식을 AND로 평가합니다. 하나라도 실패하면 즉시 false를 반환합니다.
//! 평가는 절대 실패하지 않습니다. 경로 누락이나 타입 불일치는 false로 귀결됩니다.

use serde_json::{Map, Value};

use zlog_core::types::LogEntry;

use super::types::{CompareOp, FilterExpression};
use super::value::{coerce_number, render, resolve, values_equal};

/// 엔트리가 모든 표현식을 만족하는지 검사합니다.
///
/// 표현식이 비어 있으면 true입니다.
pub fn matches(entry: &LogEntry, expressions: &[FilterExpression]) -> bool {
    if expressions.is_empty() {
        return true;
    }
    let scope = build_scope(entry);
    expressions.iter().all(|expr| evaluate(expr, &scope))
}

/// 필터가 평가되는 속성 뷰를 구성합니다.
///
/// 디코딩된 페이로드 필드가 먼저 들어가고, 메타데이터는 같은 이름의 키가
/// 없을 때만 추가됩니다. `channel`/`chanel`은 페이로드의 채널 값이 있을 때만 노출됩니다.
/// 페이로드 전체는 `fields`로도 접근할 수 있습니다 (`.fields.x`).
pub fn build_scope(entry: &LogEntry) -> Value {
    let mut scope = entry.fields.clone().unwrap_or_default();

    // 값이 없으면 null로 둔다: `.time`/`.parseError`의 exists는 값이 있을 때만 참
    let optional = |value: &Option<String>| value.clone().map(Value::String).unwrap_or(Value::Null);
    assign_if_missing(&mut scope, "level", Value::from(entry.level.as_str()));
    assign_if_missing(&mut scope, "time", optional(&entry.event_time));
    assign_if_missing(&mut scope, "ingested", Value::from(entry.ingested_at.as_str()));
    assign_if_missing(&mut scope, "msg", Value::from(entry.message.as_str()));
    assign_if_missing(&mut scope, "message", Value::from(entry.message.as_str()));
    assign_if_missing(&mut scope, "raw", Value::from(entry.raw.as_str()));
    assign_if_missing(&mut scope, "parseError", optional(&entry.parse_error));

    if let Some(channel) = entry.channel().filter(|v| !v.is_null()) {
        assign_if_missing(&mut scope, "channel", channel.clone());
        assign_if_missing(&mut scope, "chanel", channel.clone());
    }
    if let Some(fields) = &entry.fields {
        assign_if_missing(&mut scope, "fields", Value::Object(fields.clone()));
    }

    Value::Object(scope)
}

fn assign_if_missing(scope: &mut Map<String, Value>, key: &str, value: Value) {
    if !scope.contains_key(key) {
        scope.insert(key.to_owned(), value);
    }
}

/// 표현식 하나를 스코프에 대해 평가합니다.
pub fn evaluate(expr: &FilterExpression, scope: &Value) -> bool {
    match expr {
        FilterExpression::Exists { path } => resolve(scope, path).is_some(),
        FilterExpression::Regex { path, regex } => {
            resolve(scope, path).is_some_and(|value| regex.is_match(&render(value)))
        }
        FilterExpression::Compare { path, op, value } => {
            resolve(scope, path).is_some_and(|actual| compare(actual, *op, value))
        }
    }
}

/// 실제 값과 리터럴을 연산자로 비교합니다.
pub fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    match op {
        CompareOp::Contains => match actual {
            Value::Array(items) => items.iter().any(|item| values_equal(item, expected)),
            _ => render(actual).contains(render(expected).as_ref()),
        },
        CompareOp::StartsWith => render(actual).starts_with(render(expected).as_ref()),
        CompareOp::EndsWith => render(actual).ends_with(render(expected).as_ref()),
        _ => {
            if let (Some(l), Some(r)) = (coerce_number(actual), coerce_number(expected)) {
                return relational(op, &l, &r);
            }
            relational(op, render(actual).as_ref(), render(expected).as_ref())
        }
    }
}

fn relational<T: PartialOrd + ?Sized>(op: CompareOp, l: &T, r: &T) -> bool {
    match op {
        CompareOp::Eq => l == r,
        CompareOp::Ne => l != r,
        CompareOp::Gt => l > r,
        CompareOp::Lt => l < r,
        CompareOp::Ge => l >= r,
        CompareOp::Le => l <= r,
        CompareOp::Contains | CompareOp::StartsWith | CompareOp::EndsWith => false,
    }
}
