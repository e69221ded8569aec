//! 파이프라인 오케스트레이션 -- 수집/저장/브로드캐스트의 전체 흐름을 관리합니다.
//!
//! [`LogPipeline`]은 core의 [`Pipeline`](zlog_core::pipeline::Pipeline) trait을 구현하여
//! `zlog-daemon`에서 동일한 생명주기(start/stop/health_check)로 관리됩니다.
//!
//! # 내부 아키텍처
//! ```text
//! LineSource -> LineIngestor -> LogStore
//!                    |
//!                    +--> Hub -> Subscription (구독자마다 bounded 채널)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

use zlog_core::error::{PipelineError, ZlogError};
use zlog_core::pipeline::{HealthStatus, Pipeline};
use zlog_core::types::LogEntry;

use crate::config::PipelineConfig;
use crate::error::LogPipelineError;
use crate::hub::{Hub, HubHandle};
use crate::ingest::LineIngestor;
use crate::store::LogStore;

/// 라인 입력 소스 (보통 표준 입력)
pub type LineSource = Box<dyn AsyncBufRead + Send + Unpin>;

/// 파이프라인 실행 상태
#[derive(Debug, Clone, PartialEq, Eq)]
enum PipelineState {
    /// 초기화됨, 아직 시작하지 않음
    Initialized,
    /// 실행 중
    Running,
    /// 정지됨
    Stopped,
}

/// 로그 파이프라인
///
/// 저장소와 허브는 빌드 시점에 생성되므로 시작 전에도
/// [`LogPipeline::store`], [`LogPipeline::hub`]로 HTTP 계층에 넘길 수 있습니다.
///
/// # 사용 예시
/// ```ignore
/// use zlog_pipeline::{LogPipeline, LogPipelineBuilder};
///
/// let mut pipeline = LogPipelineBuilder::new()
///     .config(config)
///     .source(BufReader::new(tokio::io::stdin()))
///     .build()?;
///
/// let store = pipeline.store();
/// let hub = pipeline.hub();
/// pipeline.start().await?;
/// ```
pub struct LogPipeline {
    /// 파이프라인 설정
    config: PipelineConfig,
    /// 현재 상태
    state: PipelineState,
    /// 엔트리 저장소
    store: Arc<LogStore>,
    /// 시작 전까지 보관하는 허브 루프
    hub: Option<Hub<Arc<LogEntry>>>,
    /// 허브 핸들
    hub_handle: HubHandle<Arc<LogEntry>>,
    /// 입력 소스 (start 시 수집 태스크로 이동)
    source: Mutex<Option<LineSource>>,
    /// 백그라운드 태스크 취소 토큰
    cancel: CancellationToken,
    /// 백그라운드 태스크 핸들
    tasks: Vec<tokio::task::JoinHandle<()>>,
    /// 입력 스트림이 끝났는지 여부
    ingest_finished: Arc<AtomicBool>,
}

impl LogPipeline {
    /// 현재 상태를 반환합니다.
    pub fn state_name(&self) -> &str {
        match self.state {
            PipelineState::Initialized => "initialized",
            PipelineState::Running => "running",
            PipelineState::Stopped => "stopped",
        }
    }

    /// 저장소 핸들
    pub fn store(&self) -> Arc<LogStore> {
        Arc::clone(&self.store)
    }

    /// 허브 핸들
    pub fn hub(&self) -> HubHandle<Arc<LogEntry>> {
        self.hub_handle.clone()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 입력 스트림이 끝났는지 확인합니다.
    pub fn ingest_finished(&self) -> bool {
        self.ingest_finished.load(Ordering::Acquire)
    }

    fn spawn_ingest(&mut self, source: LineSource) {
        let ingestor = LineIngestor::new(
            Arc::clone(&self.store),
            self.hub_handle.clone(),
            self.config.max_line_bytes,
        )
        .with_debug_latency(self.config.debug_latency);
        let cancel = self.cancel.clone();
        let finished = Arc::clone(&self.ingest_finished);

        self.tasks.push(tokio::spawn(async move {
            match ingestor.run(source, cancel).await {
                Ok(stats) => tracing::info!(
                    lines = stats.lines,
                    parse_errors = stats.parse_errors,
                    oversized = stats.oversized,
                    "ingestion finished"
                ),
                Err(e) => tracing::error!(error = %e, "ingestion failed"),
            }
            finished.store(true, Ordering::Release);
        }));
    }
}

impl Pipeline for LogPipeline {
    async fn start(&mut self) -> Result<(), ZlogError> {
        match self.state {
            PipelineState::Running => return Err(PipelineError::AlreadyRunning.into()),
            PipelineState::Stopped => {
                return Err(PipelineError::InitFailed(
                    "log pipeline cannot be restarted after stop".to_owned(),
                )
                .into());
            }
            PipelineState::Initialized => {}
        }

        tracing::info!(
            max_entries = self.store.capacity(),
            subscriber_buffer = self.config.subscriber_buffer,
            "starting log pipeline"
        );

        // 1. 허브 루프
        let hub = self
            .hub
            .take()
            .ok_or_else(|| PipelineError::InitFailed("hub already consumed".to_owned()))?;
        self.tasks.push(tokio::spawn(hub.run()));

        // 2. 수집 태스크
        let source = self.source.lock().take();
        match source {
            Some(source) => self.spawn_ingest(source),
            None => tracing::warn!("no line source configured, ingestion disabled"),
        }

        self.state = PipelineState::Running;
        tracing::info!("log pipeline started");
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), ZlogError> {
        if self.state != PipelineState::Running {
            return Err(PipelineError::NotRunning.into());
        }

        tracing::info!("stopping log pipeline");
        self.cancel.cancel();

        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "pipeline task ended abnormally");
            }
        }

        self.state = PipelineState::Stopped;
        tracing::info!(retained = self.store.len(), "log pipeline stopped");
        Ok(())
    }

    async fn health_check(&self) -> HealthStatus {
        match self.state {
            PipelineState::Running => {
                if self.hub_handle.is_closed() {
                    HealthStatus::Unhealthy("hub stopped".to_owned())
                } else if self.ingest_finished() {
                    HealthStatus::Degraded("input stream closed".to_owned())
                } else {
                    HealthStatus::Healthy
                }
            }
            PipelineState::Initialized => HealthStatus::Unhealthy("not started".to_owned()),
            PipelineState::Stopped => HealthStatus::Unhealthy("stopped".to_owned()),
        }
    }
}

/// 로그 파이프라인 빌더
pub struct LogPipelineBuilder {
    config: PipelineConfig,
    source: Option<LineSource>,
    cancel: Option<CancellationToken>,
}

impl LogPipelineBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            source: None,
            cancel: None,
        }
    }

    /// 파이프라인 설정을 지정합니다.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// 라인 입력 소스를 지정합니다.
    pub fn source<R>(mut self, reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        self.source = Some(Box::new(reader));
        self
    }

    /// 상위 취소 토큰을 지정합니다. 파이프라인은 자식 토큰을 사용합니다.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// 파이프라인을 빌드합니다.
    pub fn build(self) -> Result<LogPipeline, LogPipelineError> {
        self.config.validate()?;

        let cancel = self
            .cancel
            .map(|parent| parent.child_token())
            .unwrap_or_default();
        let store = Arc::new(LogStore::new(self.config.max_entries));
        let (hub, hub_handle) = Hub::new(
            self.config.broadcast_buffer,
            self.config.subscriber_buffer,
            cancel.clone(),
        );

        Ok(LogPipeline {
            config: self.config,
            state: PipelineState::Initialized,
            store,
            hub: Some(hub),
            hub_handle,
            source: Mutex::new(self.source),
            cancel,
            tasks: Vec::new(),
            ingest_finished: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl Default for LogPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
