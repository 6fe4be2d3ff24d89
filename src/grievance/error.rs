//! 分析流水线错误类型

use thiserror::Error;

/// 分析流水线中可能出现的错误
///
/// 只有 `InvalidRequest` 会以失败形式返回给调用方，
/// 其余错误都会降级为兜底结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Gemini API key is not configured")]
    MissingCredential,

    #[error("Upstream model failure: {0}")]
    UpstreamFailure(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// 用于日志的简短分类标签
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest(_) => "invalid_request",
            AnalysisError::MissingCredential => "missing_credential",
            AnalysisError::UpstreamFailure(_) => "upstream_failure",
            AnalysisError::MalformedResponse(_) => "malformed_response",
        }
    }
}
