//! 投诉分析流水线
//!
//! 提示词构建 → 模型调用 → 响应解析 → 字段修正 → 兜底

pub mod error;
pub mod fallback;
pub mod normalize;
pub mod prompt;
pub mod types;

pub use error::AnalysisError;
pub use fallback::fallback_analysis;
pub use types::{AnalysisRequest, AnalysisResponse, AnalysisResult, InlineImage};

use serde_json::Value;
use std::sync::Arc;

use crate::providers::VisionModel;

/// 一次分析的结果
///
/// `Degraded` 保留了降级原因，便于测试和日志区分上游失败与响应格式错误。
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// 模型给出的结果（已规范化）
    Classified(AnalysisResult),
    /// 使用了兜底结果
    Degraded {
        reason: AnalysisError,
        result: AnalysisResult,
    },
}

impl AnalysisOutcome {
    fn degraded(reason: AnalysisError) -> Self {
        AnalysisOutcome::Degraded {
            reason,
            result: fallback_analysis(),
        }
    }

    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Classified(result) => result,
            AnalysisOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn reason(&self) -> Option<&AnalysisError> {
        match self {
            AnalysisOutcome::Classified(_) => None,
            AnalysisOutcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_response(self) -> AnalysisResponse {
        match self {
            AnalysisOutcome::Classified(result) => AnalysisResponse::success(result),
            AnalysisOutcome::Degraded { result, .. } => AnalysisResponse::success(result),
        }
    }
}

/// 投诉分析器
///
/// 启动时根据配置构建一次；`model` 为 `None` 表示演示模式。
#[derive(Clone)]
pub struct GrievanceAnalyzer {
    model: Option<Arc<dyn VisionModel>>,
}

impl GrievanceAnalyzer {
    pub fn new(model: Option<Arc<dyn VisionModel>>) -> Self {
        Self { model }
    }

    pub fn is_demo_mode(&self) -> bool {
        self.model.is_none()
    }

    /// 校验负载并分析，始终返回格式正确的响应
    ///
    /// 只有请求本身不合法时 `success` 为 false。
    pub async fn respond(&self, payload: &Value) -> AnalysisResponse {
        match AnalysisRequest::from_payload(payload) {
            Ok(request) => self.analyze(&request).await.into_response(),
            Err(err) => {
                tracing::info!(error = %err, "rejected request");
                AnalysisResponse::failure(err.to_string())
            }
        }
    }

    /// 分析一个已校验的请求，任何失败都降级为兜底结果
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        match self.classify(request).await {
            Ok(result) => {
                tracing::info!(
                    category = result.category.as_str(),
                    severity = result.severity_score.get(),
                    jurisdiction = result.suggested_jurisdiction.as_str(),
                    "classified"
                );
                AnalysisOutcome::Classified(result)
            }
            Err(AnalysisError::MissingCredential) => {
                tracing::debug!("demo mode, returning fallback analysis");
                AnalysisOutcome::degraded(AnalysisError::MissingCredential)
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "analysis degraded to fallback");
                AnalysisOutcome::degraded(err)
            }
        }
    }

    /// 不带降级的分析路径
    pub async fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let model = self.model.as_ref().ok_or(AnalysisError::MissingCredential)?;

        if request.audio_base64.is_some() || request.location.is_some() {
            tracing::debug!(
                has_audio = request.audio_base64.is_some(),
                has_location = request.location.is_some(),
                "ignoring audio and location"
            );
        }

        let prompt = prompt::build_prompt();
        let image = InlineImage::jpeg(request.image_base64.as_str());
        let raw = model.generate(&prompt, &image).await?;

        normalize::normalize(&raw)
    }
}
