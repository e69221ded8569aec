//! zlog 공통 크레이트
//!
//! 모든 zlog 크레이트가 공유하는 도메인 타입, 에러, 설정, 메트릭 이름을 정의합니다.
//!
//! # 모듈 구성
//!
//! - [`types`]: 정규화된 로그 레코드 ([`LogEntry`])와 심각도 ([`Level`])
//! - [`error`]: 최상위 에러 타입
//! - [`config`]: `zlog.toml` 파싱 및 환경변수 오버라이드
//! - [`pipeline`]: 생명주기 trait ([`Pipeline`])
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, PipelineError, ZlogError};

// 설정
pub use config::ZlogConfig;

// 파이프라인 trait
pub use pipeline::{HealthStatus, Pipeline};

// 도메인 타입
pub use types::{Level, LogEntry};
