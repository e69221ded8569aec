//! 라인 수집 -- 입력 스트림을 읽어 정규화, 저장, 브로드캐스트
//!
//! [`LineIngestor`]는 파이프라인의 유일한 생산자입니다.
//! 입력을 한 줄씩 읽어 [`normalize`]로 변환한 뒤 저장소에 추가하고
//! ID가 부여된 엔트리를 허브로 브로드캐스트합니다.
//!
//! 최대 길이를 넘는 라인은 메모리에 모두 올리지 않고 건너뜁니다.
//! 입력이 끝나면(EOF) 수집만 멈추고 저장소와 허브는 계속 동작합니다.

use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use zlog_core::types::LogEntry;

use crate::error::LogPipelineError;
use crate::hub::HubHandle;
use crate::normalizer::normalize;
use crate::store::LogStore;

/// 수집 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// 저장된 라인 수
    pub lines: u64,
    /// JSON 디코딩에 실패한 라인 수
    pub parse_errors: u64,
    /// 길이 초과로 건너뛴 라인 수
    pub oversized: u64,
}

/// 라인 수집기
pub struct LineIngestor {
    store: Arc<LogStore>,
    hub: HubHandle<Arc<LogEntry>>,
    max_line_bytes: usize,
    debug_latency: bool,
}

impl LineIngestor {
    pub fn new(store: Arc<LogStore>, hub: HubHandle<Arc<LogEntry>>, max_line_bytes: usize) -> Self {
        Self {
            store,
            hub,
            max_line_bytes: max_line_bytes.max(1),
            debug_latency: false,
        }
    }

    /// 브로드캐스트하는 엔트리에 `sent_ms`를 기록합니다.
    ///
    /// 저장소의 엔트리에는 기록하지 않습니다.
    pub fn with_debug_latency(mut self, enabled: bool) -> Self {
        self.debug_latency = enabled;
        self
    }

    /// EOF 또는 취소될 때까지 입력을 처리합니다.
    pub async fn run<R>(
        &self,
        mut reader: R,
        cancel: CancellationToken,
    ) -> Result<IngestStats, LogPipelineError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = IngestStats::default();
        let mut buf = Vec::with_capacity(4096);

        loop {
            buf.clear();
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!("ingest cancelled");
                    break;
                }
                outcome = read_bounded_line(&mut reader, &mut buf, self.max_line_bytes) => outcome?,
            };

            match outcome {
                LineRead::Eof => {
                    tracing::info!(lines = stats.lines, "input stream closed, ingestion stopped");
                    break;
                }
                LineRead::Oversized(len) => {
                    stats.oversized += 1;
                    metrics::counter!(zlog_core::metrics::INGEST_OVERSIZED_LINES_TOTAL)
                        .increment(1);
                    tracing::warn!(
                        bytes = len,
                        max = self.max_line_bytes,
                        "skipping line longer than max_line_bytes"
                    );
                }
                LineRead::Line => {
                    let line = String::from_utf8_lossy(&buf);
                    if !self.ingest_line(&line, &mut stats).await {
                        tracing::warn!("hub stopped, ingestion stopped");
                        break;
                    }
                }
            }
        }

        Ok(stats)
    }

    /// 라인 하나를 처리합니다. 허브가 종료되었으면 false를 반환합니다.
    async fn ingest_line(&self, line: &str, stats: &mut IngestStats) -> bool {
        metrics::counter!(zlog_core::metrics::INGEST_LINES_TOTAL).increment(1);
        stats.lines += 1;

        let entry = normalize(line);
        if entry.parse_error.is_some() {
            stats.parse_errors += 1;
            metrics::counter!(zlog_core::metrics::INGEST_PARSE_ERRORS_TOTAL).increment(1);
        }

        let stored = self.store.add(entry);
        tracing::trace!(id = stored.id, level = %stored.level, "entry stored");

        let outgoing = if self.debug_latency {
            let mut stamped = LogEntry::clone(&stored);
            stamped.sent_ms = Some(Utc::now().timestamp_millis());
            Arc::new(stamped)
        } else {
            stored
        };
        self.hub.broadcast(outgoing).await.is_ok()
    }
}

enum LineRead {
    Line,
    Oversized(usize),
    Eof,
}

/// 줄바꿈까지 최대 `max + 2` 바이트만 읽습니다.
///
/// 줄 끝의 `\r`을 제외한 내용이 `max`를 넘으면 줄의 나머지를 버리고
/// `Oversized`를 반환합니다. 줄바꿈 문자는 `buf`에 남기지 않습니다.
async fn read_bounded_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max: usize,
) -> Result<LineRead, LogPipelineError>
where
    R: AsyncBufRead + Unpin,
{
    // 내용 + '\r' + '\n'
    let limit = max as u64 + 2;
    let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if read as u64 >= limit {
        return skip_rest(reader, buf).await;
    }

    let content = match buf.last() {
        Some(b'\r') => buf.len() - 1,
        _ => buf.len(),
    };
    if content > max {
        let skipped = buf.len();
        buf.clear();
        return Ok(LineRead::Oversized(skipped));
    }
    Ok(LineRead::Line)
}

/// 길이 제한에 걸린 줄의 나머지를 줄바꿈까지 버립니다.
async fn skip_rest<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<LineRead, LogPipelineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut skipped = buf.len();
    let mut scratch = Vec::with_capacity(8192);
    loop {
        scratch.clear();
        let n = (&mut *reader).take(8192).read_until(b'\n', &mut scratch).await?;
        skipped += n;
        if n == 0 || scratch.last() == Some(&b'\n') {
            break;
        }
    }
    buf.clear();
    Ok(LineRead::Oversized(skipped))
}
