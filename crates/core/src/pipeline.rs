//! 파이프라인 trait -- 모듈 생명주기 정의

use crate::error::ZlogError;

/// 모듈 상태 점검 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// 정상
    Healthy,
    /// 동작하지만 주의가 필요함
    Degraded(String),
    /// 동작하지 않음
    Unhealthy(String),
}

impl HealthStatus {
    /// 정상 상태인지 확인합니다.
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// 동작하지 않는 상태인지 확인합니다.
    pub fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

/// 시작/정지/상태 점검 생명주기를 가진 모듈
///
/// 데몬은 이 trait을 통해 모듈을 동일한 방식으로 관리합니다.
pub trait Pipeline: Send {
    /// 백그라운드 태스크를 시작합니다.
    fn start(&mut self) -> impl std::future::Future<Output = Result<(), ZlogError>> + Send;

    /// 백그라운드 태스크를 정지합니다.
    fn stop(&mut self) -> impl std::future::Future<Output = Result<(), ZlogError>> + Send;

    /// 현재 상태를 점검합니다.
    fn health_check(&self) -> impl std::future::Future<Output = HealthStatus> + Send;
}
