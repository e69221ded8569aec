//! # zlog-pipeline
//!
//! 로그 뷰어의 핵심 처리 계층입니다. 입력 라인을 정규화해 저장하고,
//! 라이브 구독자에게 브로드캐스트하며, 필터 표현식으로 결과를 좁힙니다.
//!
//! # 모듈 구성
//!
//! - [`filter`]: 필터 표현식 파서와 평가기
//! - [`normalizer`]: 원시 라인을 [`LogEntry`](zlog_core::types::LogEntry)로 변환
//! - [`store`]: 용량 제한 인메모리 저장소
//! - [`hub`]: 구독자 집합을 소유하는 브로드캐스트 액터
//! - [`ingest`]: 입력 스트림 수집기
//! - [`pipeline`]: 전체 파이프라인 오케스트레이션 (Pipeline trait 구현)
//! - [`config`]: 파이프라인 설정 (core 설정에서 파생)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! stdin -> LineIngestor -> normalize -> LogStore -> Hub -> Subscription
//!                                          |                  |
//!                                     list + FilterSet   FilterSet (구독자별)
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod hub;
pub mod ingest;
pub mod normalizer;
pub mod pipeline;
pub mod store;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{LineSource, LogPipeline, LogPipelineBuilder};

// 설정
pub use config::{PipelineConfig, PipelineConfigBuilder};

// 에러
pub use error::LogPipelineError;

// 필터
pub use filter::{FilterExpression, FilterSet, SyntaxError, parse_filter, parse_filters};

// 정규화
pub use normalizer::{normalize, normalize_at};

// 저장소와 허브
pub use hub::{Hub, HubHandle, SubscriberId, Subscription};
pub use store::LogStore;

// 수집
pub use ingest::{IngestStats, LineIngestor};
