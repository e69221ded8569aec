//! 필터 표현식 데이터 타입
//!
//! 파서가 만들어내는 컴파일된 표현식과 경로 세그먼트를 정의합니다.
//! 모든 타입은 생성 후 불변이며 스레드 간에 자유롭게 공유할 수 있습니다.

use std::fmt;

use regex::Regex;
use serde_json::Value;

/// 경로 세그먼트 -- 문자열 키 또는 정수 인덱스
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// 객체 키 (`.name`, `['name']`)
    Key(String),
    /// 배열 인덱스 (`[0]`, `[-1]`)
    Index(i64),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

/// 스코프 루트에서 시작하는 세그먼트 시퀀스
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// 세그먼트 목록으로 경로를 생성합니다.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// 단일 키 경로 (`.message` 등)
    pub fn key(key: &str) -> Self {
        Self(vec![PathSegment::from(key)])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// 비교 연산자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==` (`=`는 `==`로 정규화)
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `contains`
    Contains,
    /// `startswith`
    StartsWith,
    /// `endswith`
    EndsWith,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 컴파일된 필터 표현식
///
/// 세 가지 형태 중 하나입니다.
/// - [`FilterExpression::Exists`]: 경로가 null이 아닌 값으로 해석되면 참
/// - [`FilterExpression::Compare`]: 경로 값과 리터럴을 연산자로 비교
/// - [`FilterExpression::Regex`]: 경로 값의 문자열 표현에 정규식 매칭
#[derive(Debug, Clone)]
pub enum FilterExpression {
    /// 존재 검사
    Exists {
        /// 검사할 경로
        path: FieldPath,
    },
    /// 비교
    Compare {
        /// 비교 대상 경로
        path: FieldPath,
        /// 연산자
        op: CompareOp,
        /// 리터럴 값 (문자열, 숫자, 불리언, null)
        value: Value,
    },
    /// 정규식 매칭
    Regex {
        /// 매칭 대상 경로
        path: FieldPath,
        /// 컴파일된 패턴
        regex: Regex,
    },
}

impl FilterExpression {
    /// 표현식이 참조하는 경로
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Exists { path } | Self::Compare { path, .. } | Self::Regex { path, .. } => path,
        }
    }
}

impl PartialEq for FilterExpression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exists { path: a }, Self::Exists { path: b }) => a == b,
            (
                Self::Compare {
                    path: pa,
                    op: oa,
                    value: va,
                },
                Self::Compare {
                    path: pb,
                    op: ob,
                    value: vb,
                },
            ) => pa == pb && oa == ob && va == vb,
            (Self::Regex { path: pa, regex: ra }, Self::Regex { path: pb, regex: rb }) => {
                pa == pb && ra.as_str() == rb.as_str()
            }
            _ => false,
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists { path } => write!(f, "{path}"),
            Self::Compare { path, op, value } => write!(f, "{path} {op} {value}"),
            Self::Regex { path, regex } => write!(f, "{path} =~ /{}/", regex.as_str()),
        }
    }
}
