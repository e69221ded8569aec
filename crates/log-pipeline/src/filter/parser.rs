//! 필터 표현식 파서
//!
//! 재귀 하강 방식으로 필터 문자열을 [`FilterExpression`]으로 컴파일합니다.
//!
//! # 문법
//! ```text
//! filter     := shorthand | regex | path [ '?' ] [ operator value ]
//! shorthand  := '.' 또는 '/'로 시작하지 않는 토큰      -> .message contains <토큰>
//! regex      := '/' pattern [ '/' flags ]              -> .message =~ pattern
//! path       := '.' segment { ('.' segment) | bracket } [ '?' ]
//! segment    := ident | quoted
//! bracket    := '[' ( quoted | integer | token ) ']'
//! operator   := contains | startswith | endswith | == | != | >= | <= | > | < | =
//! value      := quoted | bare-token
//! ```
//!
//! 입력은 바이트 단위로 스캔합니다. 구분자가 모두 ASCII이므로
//! 슬라이스 경계는 항상 UTF-8 문자 경계에 놓입니다.

use regex::Regex;
use serde_json::{Number, Value};

use super::types::{CompareOp, FieldPath, FilterExpression, PathSegment};
use super::value::{is_decimal_literal, is_integer_literal};
use crate::error::LogPipelineError;

/// 필터 문법 에러 사유
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("filter is empty")]
    Empty,
    #[error("select syntax is not supported")]
    SelectUnsupported,
    #[error("regex pattern is empty")]
    EmptyRegex,
    #[error("invalid regex")]
    InvalidRegex,
    #[error("filters must start with a '.' path")]
    MissingPath,
    #[error("unexpected token in path")]
    UnexpectedPathToken,
    #[error("unclosed bracket in path")]
    UnclosedBracket,
    #[error("empty bracket segment")]
    EmptyBracket,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("missing operator")]
    MissingOperator,
    #[error("expected an operator")]
    ExpectedOperator,
    #[error("missing value")]
    MissingValue,
    #[error("unexpected token after quoted value")]
    TrailingAfterQuoted,
    #[error("unexpected token after value")]
    TrailingAfterValue,
}

const WORD_OPERATORS: [(&str, CompareOp); 3] = [
    ("contains", CompareOp::Contains),
    ("startswith", CompareOp::StartsWith),
    ("endswith", CompareOp::EndsWith),
];

// 긴 기호가 먼저 와야 `>=`가 `>`로 잘리지 않음
const SYMBOL_OPERATORS: [(&str, CompareOp); 7] = [
    ("==", CompareOp::Eq),
    ("!=", CompareOp::Ne),
    (">=", CompareOp::Ge),
    ("<=", CompareOp::Le),
    (">", CompareOp::Gt),
    ("<", CompareOp::Lt),
    ("=", CompareOp::Eq),
];

/// 여러 필터 문자열을 파싱합니다.
///
/// 빈 문자열(공백만 있는 경우 포함)은 건너뜁니다.
/// 하나라도 실패하면 전체가 실패하며, 에러에는 trim된 필터 문자열이 포함됩니다.
pub fn parse_filters<I, S>(filters: I) -> Result<Vec<FilterExpression>, LogPipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expressions = Vec::new();
    for raw in filters {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let expr = parse_filter(trimmed).map_err(|reason| LogPipelineError::Filter {
            filter: trimmed.to_owned(),
            reason,
        })?;
        expressions.push(expr);
    }
    Ok(expressions)
}

/// 필터 문자열 하나를 파싱합니다.
pub fn parse_filter(input: &str) -> Result<FilterExpression, SyntaxError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(SyntaxError::Empty);
    }
    if raw
        .as_bytes()
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"select("))
    {
        return Err(SyntaxError::SelectUnsupported);
    }
    if let Some(expr) = message_contains_shorthand(raw) {
        return Ok(expr);
    }
    if raw.starts_with('/') {
        return regex_shorthand(raw);
    }

    let (path, rest) = parse_path(raw)?;
    let mut rest = rest.trim();
    if let Some(stripped) = rest.strip_prefix('?') {
        rest = stripped.trim();
    }
    if rest.is_empty() {
        return Ok(FilterExpression::Exists { path });
    }
    let (op, value) = parse_operator_and_value(rest)?;
    Ok(FilterExpression::Compare { path, op, value })
}

/// `error` -> `.message contains "error"`
fn message_contains_shorthand(raw: &str) -> Option<FilterExpression> {
    if raw.starts_with('.') || raw.starts_with('/') {
        return None;
    }
    let bytes = raw.as_bytes();
    let mut value = raw;
    if bytes.len() > 1 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            value = &raw[1..raw.len() - 1];
        }
    }
    Some(FilterExpression::Compare {
        path: FieldPath::key("message"),
        op: CompareOp::Contains,
        value: Value::String(value.to_owned()),
    })
}

/// `/pattern/flags` -> `.message =~ pattern`
fn regex_shorthand(raw: &str) -> Result<FilterExpression, SyntaxError> {
    if raw == "/" {
        return Err(SyntaxError::EmptyRegex);
    }
    let mut pattern = &raw[1..];
    let mut flags = "";
    if let Some(last) = find_last_unescaped_slash(raw).filter(|&idx| idx > 0) {
        let tail = &raw[last + 1..];
        if tail.bytes().all(|b| b"gimsuy".contains(&b)) {
            pattern = &raw[1..last];
            flags = tail;
        }
    }
    if pattern.is_empty() {
        return Err(SyntaxError::EmptyRegex);
    }
    let regex = compile_regex(pattern, flags).map_err(|_| SyntaxError::InvalidRegex)?;
    Ok(FilterExpression::Regex {
        path: FieldPath::key("message"),
        regex,
    })
}

/// `i`, `m`, `s` 플래그만 의미가 있고 `g`, `u`, `y`는 무시합니다.
fn compile_regex(pattern: &str, flags: &str) -> Result<Regex, regex::Error> {
    let mut prefix = String::new();
    for (flag, inline) in [('i', "(?i)"), ('m', "(?m)"), ('s', "(?s)")] {
        if flags.contains(flag) {
            prefix.push_str(inline);
        }
    }
    Regex::new(&format!("{prefix}{pattern}"))
}

fn find_last_unescaped_slash(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    (0..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'/' && (i == 0 || bytes[i - 1] != b'\\'))
}

/// 경로를 파싱하고 남은 입력을 돌려줍니다.
fn parse_path(input: &str) -> Result<(FieldPath, &str), SyntaxError> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'.') {
        return Err(SyntaxError::MissingPath);
    }

    let mut segments = Vec::new();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'.' {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        match bytes[i] {
            b'[' => {
                let (segment, next) = parse_bracket_segment(input, i)?;
                segments.push(segment);
                i = next;
            }
            b'\'' | b'"' => {
                let (key, next) = parse_quoted(input, i)?;
                segments.push(PathSegment::Key(key));
                i = next;
            }
            b if is_identifier_byte(b) => {
                let start = i;
                while i < bytes.len() && is_identifier_byte(bytes[i]) {
                    i += 1;
                }
                segments.push(PathSegment::Key(input[start..i].to_owned()));
            }
            _ => break,
        }

        // 옵셔널 체이닝 표시는 의미 없음
        if bytes.get(i) == Some(&b'?') {
            i += 1;
        }
        let Some(&next) = bytes.get(i) else {
            break;
        };
        if next == b'.' || next == b'[' {
            continue;
        }
        if is_operator_start(next) || is_whitespace(next) {
            break;
        }
        return Err(SyntaxError::UnexpectedPathToken);
    }

    Ok((FieldPath::new(segments), &input[i..]))
}

fn parse_bracket_segment(input: &str, index: usize) -> Result<(PathSegment, usize), SyntaxError> {
    let bytes = input.as_bytes();
    let mut i = skip_whitespace(bytes, index + 1);
    if i >= bytes.len() {
        return Err(SyntaxError::UnclosedBracket);
    }

    let segment = if bytes[i] == b'"' || bytes[i] == b'\'' {
        let (key, next) = parse_quoted(input, i)?;
        i = next;
        PathSegment::Key(key)
    } else {
        let start = i;
        while i < bytes.len() && !is_whitespace(bytes[i]) && bytes[i] != b']' {
            i += 1;
        }
        let token = &input[start..i];
        if token.is_empty() {
            return Err(SyntaxError::EmptyBracket);
        }
        if is_integer_literal(token) {
            // 범위를 넘는 인덱스는 어차피 해석되지 않으므로 포화시킴
            let index = token.parse::<i64>().unwrap_or(if token.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            });
            PathSegment::Index(index)
        } else {
            PathSegment::Key(token.to_owned())
        }
    };

    i = skip_whitespace(bytes, i);
    if bytes.get(i) != Some(&b']') {
        return Err(SyntaxError::UnclosedBracket);
    }
    Ok((segment, i + 1))
}

/// `index` 위치의 따옴표로 시작하는 문자열을 읽습니다.
///
/// `\` 다음 문자는 그대로 취합니다. 닫는 따옴표 다음 위치를 함께 반환합니다.
fn parse_quoted(input: &str, index: usize) -> Result<(String, usize), SyntaxError> {
    let bytes = input.as_bytes();
    let quote = bytes[index];
    let mut out = Vec::new();
    let mut i = index + 1;
    while i < bytes.len() {
        let ch = bytes[i];
        if ch == b'\\' && i + 1 < bytes.len() {
            out.push(bytes[i + 1]);
            i += 2;
            continue;
        }
        if ch == quote {
            return Ok((String::from_utf8_lossy(&out).into_owned(), i + 1));
        }
        out.push(ch);
        i += 1;
    }
    Err(SyntaxError::UnterminatedString)
}

fn parse_operator_and_value(input: &str) -> Result<(CompareOp, Value), SyntaxError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SyntaxError::MissingOperator);
    }

    for (word, op) in WORD_OPERATORS {
        if let Some(rest) = strip_word(trimmed, word) {
            return Ok((op, parse_value_literal(rest)?));
        }
    }
    for (symbol, op) in SYMBOL_OPERATORS {
        if let Some(rest) = trimmed.strip_prefix(symbol) {
            return Ok((op, parse_value_literal(rest)?));
        }
    }
    Err(SyntaxError::ExpectedOperator)
}

/// 대소문자 무시 단어 접두어. 뒤에 단어 문자가 이어지면 매칭하지 않습니다.
fn strip_word<'a>(input: &'a str, word: &str) -> Option<&'a str> {
    let bytes = input.as_bytes();
    let head = bytes.get(..word.len())?;
    if !head.eq_ignore_ascii_case(word.as_bytes()) {
        return None;
    }
    match bytes.get(word.len()) {
        Some(&b) if b.is_ascii_alphanumeric() || b == b'_' => None,
        _ => Some(&input[word.len()..]),
    }
}

fn parse_value_literal(input: &str) -> Result<Value, SyntaxError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SyntaxError::MissingValue);
    }

    if trimmed.starts_with('"') || trimmed.starts_with('\'') {
        let (value, next) = parse_quoted(trimmed, 0)?;
        if !trimmed[next..].trim().is_empty() {
            return Err(SyntaxError::TrailingAfterQuoted);
        }
        return Ok(Value::String(value));
    }

    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
    if !trimmed[token.len()..].trim().is_empty() {
        return Err(SyntaxError::TrailingAfterValue);
    }
    Ok(coerce_literal(token))
}

/// 따옴표 없는 값 토큰의 타입을 결정합니다.
fn coerce_literal(token: &str) -> Value {
    if token.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if token.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if is_decimal_literal(token) {
        if let Some(number) = token.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }
    }
    Value::String(token.to_owned())
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_whitespace(bytes[i]) {
        i += 1;
    }
    i
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'@' || b == b'-'
}

fn is_operator_start(b: u8) -> bool {
    matches!(b, b'=' | b'!' | b'>' | b'<')
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compare(path: FieldPath, op: CompareOp, value: Value) -> FilterExpression {
        FilterExpression::Compare { path, op, value }
    }

    fn keys(keys: &[&str]) -> FieldPath {
        FieldPath::new(keys.iter().map(|k| PathSegment::from(*k)).collect())
    }

    // --- shorthand ---

    #[test]
    fn bare_word_is_message_contains() {
        let expr = parse_filter("error").unwrap();
        assert_eq!(
            expr,
            compare(FieldPath::key("message"), CompareOp::Contains, json!("error"))
        );
        assert_eq!(expr, parse_filter(".message contains \"error\"").unwrap());
    }

    #[test]
    fn bare_word_strips_matching_quotes() {
        let expr = parse_filter("'disk full'").unwrap();
        assert_eq!(
            expr,
            compare(FieldPath::key("message"), CompareOp::Contains, json!("disk full"))
        );
        // 짝이 맞지 않으면 그대로
        let expr = parse_filter("\"half'").unwrap();
        assert_eq!(
            expr,
            compare(FieldPath::key("message"), CompareOp::Contains, json!("\"half'"))
        );
        // 한 글자짜리 따옴표는 벗기지 않음
        let expr = parse_filter("\"").unwrap();
        assert_eq!(
            expr,
            compare(FieldPath::key("message"), CompareOp::Contains, json!("\""))
        );
    }

    #[test]
    fn select_prefix_is_rejected_before_shorthand() {
        assert_eq!(
            parse_filter("select(.level == \"error\")").unwrap_err(),
            SyntaxError::SelectUnsupported
        );
        assert_eq!(
            parse_filter("SELECT(x)").unwrap_err(),
            SyntaxError::SelectUnsupported
        );
    }

    // --- regex ---

    #[test]
    fn regex_with_flags() {
        let FilterExpression::Regex { path, regex } = parse_filter("/fail(ed)?/i").unwrap() else {
            panic!("expected regex expression");
        };
        assert_eq!(path, FieldPath::key("message"));
        assert!(regex.is_match("it failed"));
        assert!(regex.is_match("FAILED"));
        assert!(!regex.is_match("success"));
    }

    #[test]
    fn regex_without_closing_slash_uses_whole_remainder() {
        let FilterExpression::Regex { regex, .. } = parse_filter("/abc").unwrap() else {
            panic!("expected regex expression");
        };
        assert_eq!(regex.as_str(), "abc");
    }

    #[test]
    fn regex_with_non_flag_tail_keeps_slash_in_pattern() {
        let FilterExpression::Regex { regex, .. } = parse_filter("/a/b").unwrap() else {
            panic!("expected regex expression");
        };
        assert_eq!(regex.as_str(), "a/b");
    }

    #[test]
    fn regex_escaped_slash_is_not_terminator() {
        let FilterExpression::Regex { regex, .. } = parse_filter(r"/a\/b/").unwrap() else {
            panic!("expected regex expression");
        };
        assert_eq!(regex.as_str(), r"a\/b");
        assert!(regex.is_match("a/b"));
    }

    #[test]
    fn regex_inert_flags_are_accepted() {
        let FilterExpression::Regex { regex, .. } = parse_filter("/x/guy").unwrap() else {
            panic!("expected regex expression");
        };
        assert_eq!(regex.as_str(), "x");
    }

    #[test]
    fn regex_multiline_and_dotall_flags() {
        let FilterExpression::Regex { regex, .. } = parse_filter("/^b.c$/ms").unwrap() else {
            panic!("expected regex expression");
        };
        assert!(regex.is_match("a\nb\nc"));
    }

    #[test]
    fn regex_errors() {
        assert_eq!(parse_filter("/").unwrap_err(), SyntaxError::EmptyRegex);
        assert_eq!(parse_filter("//i").unwrap_err(), SyntaxError::EmptyRegex);
        assert_eq!(parse_filter("/(unclosed/").unwrap_err(), SyntaxError::InvalidRegex);
    }

    // --- path ---

    #[test]
    fn dotted_path_is_exists() {
        let expr = parse_filter(".fields.user.name").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Exists {
                path: keys(&["fields", "user", "name"])
            }
        );
    }

    #[test]
    fn bracket_segments() {
        let expr = parse_filter(".a[0]['b c'][\"d\"][ -1 ][key]").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Exists {
                path: FieldPath::new(vec![
                    "a".into(),
                    PathSegment::Index(0),
                    "b c".into(),
                    "d".into(),
                    PathSegment::Index(-1),
                    "key".into(),
                ])
            }
        );
    }

    #[test]
    fn quoted_segment_after_dot() {
        let expr = parse_filter(".\"with space\".x").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Exists {
                path: keys(&["with space", "x"])
            }
        );
    }

    #[test]
    fn identifier_characters() {
        let expr = parse_filter(".@timestamp").unwrap();
        assert_eq!(expr.path(), &FieldPath::key("@timestamp"));
        let expr = parse_filter(".request-id_2").unwrap();
        assert_eq!(expr.path(), &FieldPath::key("request-id_2"));
    }

    #[test]
    fn optional_markers_are_ignored() {
        let plain = parse_filter(".a.b == 1").unwrap();
        assert_eq!(parse_filter(".a?.b? == 1").unwrap(), plain);
        assert_eq!(
            parse_filter(".a?").unwrap(),
            FilterExpression::Exists {
                path: FieldPath::key("a")
            }
        );
        assert_eq!(
            parse_filter(".a ?").unwrap(),
            FilterExpression::Exists {
                path: FieldPath::key("a")
            }
        );
    }

    #[test]
    fn path_errors() {
        assert_eq!(parse_filter(".a[").unwrap_err(), SyntaxError::UnclosedBracket);
        assert_eq!(parse_filter(".a[0").unwrap_err(), SyntaxError::UnclosedBracket);
        assert_eq!(parse_filter(".a['x'").unwrap_err(), SyntaxError::UnclosedBracket);
        assert_eq!(parse_filter(".a[]").unwrap_err(), SyntaxError::EmptyBracket);
        assert_eq!(parse_filter(".a['x").unwrap_err(), SyntaxError::UnterminatedString);
        assert_eq!(parse_filter(".a+b").unwrap_err(), SyntaxError::UnexpectedPathToken);
        assert_eq!(parse_filter(".a$").unwrap_err(), SyntaxError::UnexpectedPathToken);
    }

    // --- operators & values ---

    #[test]
    fn symbol_operators() {
        let cases = [
            (".n == 1", CompareOp::Eq),
            (".n = 1", CompareOp::Eq),
            (".n != 1", CompareOp::Ne),
            (".n >= 1", CompareOp::Ge),
            (".n <= 1", CompareOp::Le),
            (".n > 1", CompareOp::Gt),
            (".n < 1", CompareOp::Lt),
            (".n>=1", CompareOp::Ge),
        ];
        for (input, expected) in cases {
            let expr = parse_filter(input).unwrap();
            assert_eq!(
                expr,
                compare(FieldPath::key("n"), expected, json!(1.0)),
                "input: {input}"
            );
        }
    }

    #[test]
    fn word_operators_are_case_insensitive() {
        let expr = parse_filter(".msg CONTAINS disk").unwrap();
        assert_eq!(expr, compare(FieldPath::key("msg"), CompareOp::Contains, json!("disk")));
        let expr = parse_filter(".path StartsWith '/api'").unwrap();
        assert_eq!(
            expr,
            compare(FieldPath::key("path"), CompareOp::StartsWith, json!("/api"))
        );
        let expr = parse_filter(".file endswith .log").unwrap();
        assert_eq!(expr, compare(FieldPath::key("file"), CompareOp::EndsWith, json!(".log")));
    }

    #[test]
    fn word_operator_needs_boundary() {
        assert_eq!(
            parse_filter(".a containsx 1").unwrap_err(),
            SyntaxError::ExpectedOperator
        );
    }

    #[test]
    fn literal_coercion() {
        let value_of = |input: &str| match parse_filter(input).unwrap() {
            FilterExpression::Compare { value, .. } => value,
            other => panic!("expected compare, got {other:?}"),
        };
        assert_eq!(value_of(".a == TRUE"), json!(true));
        assert_eq!(value_of(".a == false"), json!(false));
        assert_eq!(value_of(".a == Null"), Value::Null);
        assert_eq!(value_of(".a == -3.25"), json!(-3.25));
        assert_eq!(value_of(".a == 42"), json!(42.0));
        assert_eq!(value_of(".a == 1e3"), json!("1e3"));
        assert_eq!(value_of(".a == v1.2"), json!("v1.2"));
        assert_eq!(value_of(".a == \"42\""), json!("42"));
        assert_eq!(value_of(r#".a == "say \"hi\"""#), json!("say \"hi\""));
        assert_eq!(value_of(r".a == 'it\'s'"), json!("it's"));
    }

    #[test]
    fn operator_and_value_errors() {
        assert_eq!(parse_filter(".a ~ 1").unwrap_err(), SyntaxError::ExpectedOperator);
        assert_eq!(parse_filter(".a ==").unwrap_err(), SyntaxError::MissingValue);
        assert_eq!(parse_filter(".a contains").unwrap_err(), SyntaxError::MissingValue);
        assert_eq!(parse_filter(".a == 'x").unwrap_err(), SyntaxError::UnterminatedString);
        assert_eq!(
            parse_filter(".a == 'x' y").unwrap_err(),
            SyntaxError::TrailingAfterQuoted
        );
        assert_eq!(
            parse_filter(".a == x y").unwrap_err(),
            SyntaxError::TrailingAfterValue
        );
    }

    // --- parse_filters ---

    #[test]
    fn parse_filters_skips_blank_entries() {
        let exprs = parse_filters(["", "   ", "error", ".level == warn"]).unwrap();
        assert_eq!(exprs.len(), 2);
        assert!(parse_filters(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn parse_filters_fails_whole_set_and_names_input() {
        let err = parse_filters(["error", "  .a[  "]).unwrap_err();
        assert_eq!(err.to_string(), "\".a[\": unclosed bracket in path");
    }

    #[test]
    fn parse_is_deterministic() {
        for input in ["error", "/x+/i", ".a[0].b >= 3", ".x?", ".m contains 'q'"] {
            assert_eq!(parse_filter(input).unwrap(), parse_filter(input).unwrap());
        }
    }

    #[test]
    fn empty_input_is_error() {
        assert_eq!(parse_filter("   ").unwrap_err(), SyntaxError::Empty);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics(input in ".{0,64}") {
                let _ = parse_filter(&input);
            }

            #[test]
            fn never_panics_on_path_like_input(input in "\\.[a-z\\[\\]'\"0-9 .?=!<>-]{0,32}") {
                let _ = parse_filter(&input);
            }

            #[test]
            fn deterministic(input in "[.a-z\\[\\]'0-9 =<>]{1,24}") {
                let first = parse_filter(&input);
                let second = parse_filter(&input);
                prop_assert_eq!(first, second);
            }
        }
    }
}
