//! 로그 저장소 -- 용량 제한 인메모리 보관
//!
//! [`LogStore`]는 최근 엔트리를 오래된 순서로 보관합니다.
//! 삽입 시 ID를 부여하고, 용량을 넘으면 가장 오래된 엔트리부터 제거합니다.
//!
//! # 동시성
//! 모든 연산은 하나의 뮤텍스로 직렬화됩니다. 락은 복사/추가/제거 동안만 잡히며
//! I/O를 수행하는 동안에는 절대 잡히지 않습니다.
//!
//! [`LogStore::list`]는 `Arc` 복사본 벡터를 반환하므로
//! 이후의 삽입이나 제거가 이미 받은 스냅샷에 영향을 주지 않습니다.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use zlog_core::types::LogEntry;

struct StoreInner {
    entries: VecDeque<Arc<LogEntry>>,
    next_id: i64,
}

/// 용량 제한 로그 저장소
///
/// 여러 태스크에서 `Arc<LogStore>`로 공유합니다.
pub struct LogStore {
    inner: Mutex<StoreInner>,
    max: usize,
}

impl LogStore {
    /// 새 저장소를 생성합니다. `max`가 0이면 1로 보정합니다.
    pub fn new(max: usize) -> Self {
        let max = max.max(1);
        Self {
            inner: Mutex::new(StoreInner {
                entries: VecDeque::with_capacity(max.min(10_000)),
                next_id: 0,
            }),
            max,
        }
    }

    /// 엔트리에 다음 ID를 부여하고 추가합니다.
    ///
    /// 용량을 넘으면 가장 오래된 엔트리를 제거합니다.
    /// ID가 부여된 엔트리를 반환합니다.
    pub fn add(&self, mut entry: LogEntry) -> Arc<LogEntry> {
        let (stored, retained, evicted) = {
            let mut inner = self.inner.lock();
            inner.next_id += 1;
            entry.id = inner.next_id;

            let stored = Arc::new(entry);
            inner.entries.push_back(Arc::clone(&stored));

            let excess = inner.entries.len().saturating_sub(self.max);
            inner.entries.drain(..excess);
            (stored, inner.entries.len(), excess)
        };

        if evicted > 0 {
            metrics::counter!(zlog_core::metrics::STORE_EVICTED_TOTAL).increment(evicted as u64);
        }
        metrics::gauge!(zlog_core::metrics::STORE_ENTRIES).set(retained as f64);
        stored
    }

    /// 보관 중인 엔트리의 스냅샷 (오래된 순서)
    pub fn list(&self) -> Vec<Arc<LogEntry>> {
        self.inner.lock().entries.iter().cloned().collect()
    }

    /// 최대 보관 개수
    pub fn capacity(&self) -> usize {
        self.max
    }

    /// 현재 보관 중인 엔트리 수
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 마지막으로 부여된 ID (아직 없으면 0)
    pub fn last_id(&self) -> i64 {
        self.inner.lock().next_id
    }
}
