//! 로그 파이프라인 설정
//!
//! [`PipelineConfig`]는 core의 [`ZlogConfig`](zlog_core::config::ZlogConfig)에서
//! 저장소, 허브, 수집 관련 값만 모아 파이프라인 전용 설정으로 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use zlog_core::config::ZlogConfig;
//! use zlog_pipeline::config::PipelineConfig;
//!
//! let core_config = ZlogConfig::default();
//! let config = PipelineConfig::from_core(&core_config);
//! ```

use serde::{Deserialize, Serialize};

use zlog_core::config::{DEFAULT_MAX_ENTRIES, DEFAULT_MAX_LINE_BYTES, MAX_STORE_ENTRIES, ZlogConfig};

use crate::error::LogPipelineError;

/// 로그 파이프라인 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 저장소 최대 보관 개수 (0은 1로 보정)
    pub max_entries: usize,
    /// 구독자별 전달 버퍼 크기
    pub subscriber_buffer: usize,
    /// 허브 명령 큐 크기
    pub broadcast_buffer: usize,
    /// 입력 한 줄의 최대 바이트 수
    pub max_line_bytes: usize,
    /// 브로드캐스트 시각(`sentMs`)을 엔트리에 포함할지 여부
    pub debug_latency: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            subscriber_buffer: 64,
            broadcast_buffer: 256,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            debug_latency: false,
        }
    }
}

impl PipelineConfig {
    /// core 설정에서 파이프라인 설정을 생성합니다.
    pub fn from_core(core: &ZlogConfig) -> Self {
        Self {
            max_entries: core.store.max_entries,
            subscriber_buffer: core.hub.subscriber_buffer,
            broadcast_buffer: core.hub.broadcast_buffer,
            max_line_bytes: core.ingest.max_line_bytes,
            debug_latency: core.server.debug_latency,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPipelineError> {
        if self.max_entries > MAX_STORE_ENTRIES {
            return Err(LogPipelineError::Config {
                field: "max_entries".to_owned(),
                reason: format!("must be at most {}", MAX_STORE_ENTRIES),
            });
        }

        if self.subscriber_buffer == 0 {
            return Err(LogPipelineError::Config {
                field: "subscriber_buffer".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.broadcast_buffer == 0 {
            return Err(LogPipelineError::Config {
                field: "broadcast_buffer".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.max_line_bytes == 0 {
            return Err(LogPipelineError::Config {
                field: "max_line_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        Ok(())
    }
}

/// 파이프라인 설정 빌더
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 최대 보관 개수를 설정합니다.
    pub fn max_entries(mut self, max: usize) -> Self {
        self.config.max_entries = max;
        self
    }

    /// 구독자별 버퍼 크기를 설정합니다.
    pub fn subscriber_buffer(mut self, size: usize) -> Self {
        self.config.subscriber_buffer = size;
        self
    }

    /// 허브 명령 큐 크기를 설정합니다.
    pub fn broadcast_buffer(mut self, size: usize) -> Self {
        self.config.broadcast_buffer = size;
        self
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn max_line_bytes(mut self, bytes: usize) -> Self {
        self.config.max_line_bytes = bytes;
        self
    }

    /// 지연 측정 모드를 설정합니다.
    pub fn debug_latency(mut self, enabled: bool) -> Self {
        self.config.debug_latency = enabled;
        self
    }

    /// 설정을 검증하고 `PipelineConfig`를 생성합니다.
    pub fn build(self) -> Result<PipelineConfig, LogPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
