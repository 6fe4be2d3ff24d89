//! Analyze 命令 - 在本地对单张图片运行分析流水线
//!
//! 不启动服务器，直接调用模型并打印分析结果。

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::grievance::{AnalysisRequest, GrievanceAnalyzer};
use crate::providers;
use crate::utils::read_image_base64;

/// 执行本地分析命令
///
/// # 参数
///
/// * `config` - 应用配置，决定使用的模型和是否为演示模式
/// * `image` - 本地图片路径
///
/// 使用了兜底结果时，会在 stderr 上说明原因。
pub async fn analyze_command(config: Config, image: &Path) -> Result<()> {
    let request = AnalysisRequest {
        image_base64: read_image_base64(image).await?,
        audio_base64: None,
        location: None,
    };

    let analyzer = GrievanceAnalyzer::new(providers::create_model(&config)?);
    let outcome = analyzer.analyze(&request).await;

    if let Some(reason) = outcome.reason() {
        eprintln!("Fallback analysis used: {}", reason);
    }

    let output = serde_json::to_string_pretty(outcome.result())
        .context("Failed to serialize analysis")?;
    println!("{}", output);

    Ok(())
}
