//! 필터 엔진 -- 표현식 파싱 및 로그 엔트리 매칭
//!
//! 사용자가 입력한 필터 문자열을 컴파일하여
//! [`LogEntry`]에 대해 AND 조건으로 평가합니다.
//!
//! # 표현식 형식
//! ```text
//! .fields.user                 존재 검사
//! .status >= 500               비교 (==, =, !=, >, <, >=, <=)
//! .path startswith /api        문자열 연산 (contains, startswith, endswith)
//! .items[0]['first name']      대괄호 세그먼트
//! /timeout|refused/i           메시지 정규식
//! "disk full"                  메시지 부분 문자열
//! ```
//!
//! # 아키텍처
//! - [`FilterSet`]: 컴파일된 표현식 목록 (AND 결합)
//! - [`parser`]: 필터 문자열 파서
//! - [`matcher`]: 스코프 구성 및 평가 로직
//! - [`value`]: 경로 해석, 숫자 변환, 문자열 표현
//! - [`types`]: 표현식 데이터 구조 정의

pub mod matcher;
pub mod parser;
pub mod types;
pub mod value;

pub use matcher::{build_scope, matches};
pub use parser::{SyntaxError, parse_filter, parse_filters};
pub use types::{CompareOp, FieldPath, FilterExpression, PathSegment};

use zlog_core::types::LogEntry;

use crate::error::LogPipelineError;

/// 컴파일된 필터 집합
///
/// 구독자 하나 또는 조회 요청 하나에 대응합니다.
/// 비어 있으면 모든 엔트리를 통과시킵니다.
///
/// # 사용 예시
/// ```ignore
/// let filters = FilterSet::parse([".level == error", "/timeout/i"])?;
/// let hits: Vec<_> = store.list().into_iter().filter(|e| filters.matches(e)).collect();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    expressions: Vec<FilterExpression>,
}

impl FilterSet {
    /// 필터 문자열 목록을 파싱합니다.
    ///
    /// 공백뿐인 문자열은 건너뜁니다. 하나라도 실패하면 전체가 실패합니다.
    pub fn parse<I, S>(raws: I) -> Result<Self, LogPipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            expressions: parse_filters(raws)?,
        })
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        matches(entry, &self.expressions)
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn expressions(&self) -> &[FilterExpression] {
        &self.expressions
    }
}

impl From<Vec<FilterExpression>> for FilterSet {
    fn from(expressions: Vec<FilterExpression>) -> Self {
        Self { expressions }
    }
}
