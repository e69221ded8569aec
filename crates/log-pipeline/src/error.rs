//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 로그 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for ZlogError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use zlog_core::error::{PipelineError, ZlogError};

use crate::filter::SyntaxError;

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 필터 표현식 파싱 실패
    ///
    /// 문제가 된 필터 문자열(trim된 값)을 따옴표로 감싸 표시합니다.
    #[error("{filter:?}: {reason}")]
    Filter {
        /// 입력 필터 문자열
        filter: String,
        /// 실패 사유
        #[source]
        reason: SyntaxError,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 채널 통신 에러
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogPipelineError {
    /// 필터 파싱 에러라면 사유를 반환합니다.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Filter { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<LogPipelineError> for ZlogError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Io(e) => ZlogError::Io(e),
            LogPipelineError::Channel(msg) => ZlogError::Pipeline(PipelineError::ChannelSend(msg)),
            other => ZlogError::Pipeline(PipelineError::InitFailed(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_error_quotes_input() {
        let err = LogPipelineError::Filter {
            filter: ".a[".to_owned(),
            reason: SyntaxError::UnclosedBracket,
        };
        assert_eq!(err.to_string(), "\".a[\": unclosed bracket in path");
        assert_eq!(err.syntax(), Some(&SyntaxError::UnclosedBracket));
    }

    #[test]
    fn config_error_display() {
        let err = LogPipelineError::Config {
            field: "subscriber_buffer".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("subscriber_buffer"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn converts_to_zlog_error() {
        let err = LogPipelineError::Channel("hub closed".to_owned());
        let zlog_err: ZlogError = err.into();
        assert!(matches!(zlog_err, ZlogError::Pipeline(_)));

        let io = LogPipelineError::Io(std::io::Error::other("read failed"));
        assert!(matches!(ZlogError::from(io), ZlogError::Io(_)));
    }
}
