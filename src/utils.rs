use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::ClientBuilder;
use std::path::Path;

/// 带统一 user-agent 的 HTTP 客户端构建器
pub fn http_client_builder(disable_tls_verify: bool) -> ClientBuilder {
    let mut builder = reqwest::Client::builder().user_agent(user_agent());

    if disable_tls_verify {
        tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
}

pub fn user_agent() -> String {
    format!("civicconnect/{}", env!("CARGO_PKG_VERSION"))
}

/// 读取本地图片文件并编码为标准 Base64
///
/// # 错误
///
/// 文件无法读取或为空时返回错误
pub async fn read_image_base64(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;

    if bytes.is_empty() {
        anyhow::bail!("Image {} is empty", path.display());
    }

    Ok(STANDARD.encode(bytes))
}
