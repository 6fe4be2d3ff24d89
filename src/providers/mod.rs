//! 模型调用抽象层
//!
//! 定义多模态模型的统一接口，根据配置创建具体实现

pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::grievance::{AnalysisError, InlineImage};
use gemini::GeminiModel;

/// VisionModel Trait - 接受文本提示和一张图片，返回模型的原始文本输出
///
/// 传输、鉴权、配额等错误统一返回 `AnalysisError::UpstreamFailure`，
/// 由调用方决定是否降级。
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// 模型名称（用于日志）
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<String, AnalysisError>;
}

/// 根据配置创建模型
///
/// 未配置 API 密钥时返回 `None`，服务以演示模式运行。
pub fn create_model(config: &Config) -> Result<Option<Arc<dyn VisionModel>>> {
    let Some(api_key) = config.gemini.api_key.as_deref() else {
        tracing::warn!("GEMINI_API_KEY not set, running in demo mode with fallback analysis");
        return Ok(None);
    };

    let model = GeminiModel::new(
        &config.gemini.api_base,
        &config.gemini.model,
        api_key,
        config.disable_tls_verify,
    )?;
    tracing::info!("Using Gemini model {}", model.name());

    Ok(Some(Arc::new(model)))
}
