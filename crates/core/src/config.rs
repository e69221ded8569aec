//! 설정 관리 -- zlog.toml 파싱 및 런타임 설정
//!
//! [`ZlogConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`ZLOG_SERVER_PORT=9000` 형식)
//! 3. 설정 파일 (`zlog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), zlog_core::error::ZlogError> {
//! use zlog_core::config::ZlogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ZlogConfig::load("zlog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ZlogConfig::parse("[store]\nmax_entries = 500")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ZlogError};

/// 기본 HTTP 포트
pub const DEFAULT_PORT: u16 = 8037;
/// 기본 저장소 용량
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;
/// 저장소 용량 상한
pub const MAX_STORE_ENTRIES: usize = 10_000_000;
/// 입력 한 줄의 기본 최대 길이 (10MB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// zlog 통합 설정
///
/// `zlog.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZlogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로그 저장소 설정
    #[serde(default)]
    pub store: StoreConfig,
    /// 브로드캐스트 허브 설정
    #[serde(default)]
    pub hub: HubConfig,
    /// 입력 수집 설정
    #[serde(default)]
    pub ingest: IngestConfig,
    /// 메트릭 설정
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ZlogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ZlogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 기본값에 환경변수 오버라이드만 적용합니다 (설정 파일 없이 실행할 때).
    pub fn from_env() -> Result<Self, ZlogError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ZlogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ZlogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ZlogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ZlogError> {
        toml::from_str(toml_str).map_err(|e| {
            ZlogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `ZLOG_{SECTION}_{FIELD}`
    /// 예: `ZLOG_STORE_MAX_ENTRIES=50000`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "ZLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "ZLOG_GENERAL_LOG_FORMAT");

        // Server
        override_string(&mut self.server.host, "ZLOG_SERVER_HOST");
        override_u16(&mut self.server.port, "ZLOG_SERVER_PORT");
        override_bool(&mut self.server.debug_latency, "ZLOG_SERVER_DEBUG_LATENCY");

        // Store
        override_usize(&mut self.store.max_entries, "ZLOG_STORE_MAX_ENTRIES");

        // Hub
        override_usize(
            &mut self.hub.subscriber_buffer,
            "ZLOG_HUB_SUBSCRIBER_BUFFER",
        );
        override_usize(&mut self.hub.broadcast_buffer, "ZLOG_HUB_BROADCAST_BUFFER");

        // Ingest
        override_usize(&mut self.ingest.max_line_bytes, "ZLOG_INGEST_MAX_LINE_BYTES");

        // Metrics
        override_bool(&mut self.metrics.enabled, "ZLOG_METRICS_ENABLED");
        override_string(&mut self.metrics.listen_addr, "ZLOG_METRICS_LISTEN_ADDR");
        override_u16(&mut self.metrics.port, "ZLOG_METRICS_PORT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ZlogError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host", "must not be empty".to_owned()));
        }

        // 0은 저장소에서 1로 보정되므로 상한만 검사
        if self.store.max_entries > MAX_STORE_ENTRIES {
            return Err(invalid(
                "store.max_entries",
                format!("must be at most {}", MAX_STORE_ENTRIES),
            ));
        }

        if self.hub.subscriber_buffer == 0 {
            return Err(invalid(
                "hub.subscriber_buffer",
                "must be greater than 0".to_owned(),
            ));
        }

        if self.hub.broadcast_buffer == 0 {
            return Err(invalid(
                "hub.broadcast_buffer",
                "must be greater than 0".to_owned(),
            ));
        }

        if self.ingest.max_line_bytes == 0 {
            return Err(invalid(
                "ingest.max_line_bytes",
                "must be greater than 0".to_owned(),
            ));
        }

        if self.metrics.enabled && self.metrics.listen_addr.trim().is_empty() {
            return Err(invalid(
                "metrics.listen_addr",
                "must not be empty when metrics are enabled".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ZlogError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// HTTP 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인드 호스트
    pub host: String,
    /// 바인드 포트
    pub port: u16,
    /// 브로드캐스트 페이로드에 `sentMs`를 포함할지 여부
    pub debug_latency: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            debug_latency: false,
        }
    }
}

/// 로그 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 메모리에 보관할 최대 엔트리 수
    pub max_entries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// 브로드캐스트 허브 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// 구독자별 전달 버퍼 크기
    pub subscriber_buffer: usize,
    /// 허브 입력(브로드캐스트) 큐 크기
    pub broadcast_buffer: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: 64,
            broadcast_buffer: 256,
        }
    }
}

/// 입력 수집 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// 입력 한 줄의 최대 길이 (바이트)
    pub max_line_bytes: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Prometheus 메트릭 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 리슨 주소
    pub listen_addr: String,
    /// 리슨 포트
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: "127.0.0.1".to_owned(),
            port: 9137,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u16(target: &mut u16, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u16>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u16 from env var, ignoring"
            ),
        }
    }
}
