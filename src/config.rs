//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址、端口和请求超时
//! - Gemini API 密钥、模型名称和 API 地址
//!
//! 配置在启动时构建一次，之后显式传递给各组件。

use anyhow::{Context, Result};
use std::time::Duration;

use crate::providers::gemini::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "60";

/// Gemini 相关配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API 密钥；缺失时进入演示模式，所有分析都返回兜底结果
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 单个请求的总超时
    pub request_timeout: Duration,
    pub gemini: GeminiConfig,
    /// 是否禁用 TLS 验证（仅用于调试）
    pub disable_tls_verify: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `CIVIC_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `CIVIC_PORT`: 服务器监听端口（默认: 8080）
    /// - `CIVIC_REQUEST_TIMEOUT_SECS`: 请求超时秒数（默认: 60）
    /// - `GEMINI_API_KEY`: Gemini API 密钥（可选，缺失时进入演示模式）
    /// - `GEMINI_MODEL`: 模型名称（默认: "gemini-2.0-flash"）
    /// - `GEMINI_API_BASE`: API 地址
    /// - `CIVIC_DISABLE_TLS_VERIFY`: 设为 "1" 或 "true" 时禁用 TLS 验证
    ///
    /// # 错误
    ///
    /// - 如果 `CIVIC_PORT` 不是有效的端口号
    /// - 如果 `CIVIC_REQUEST_TIMEOUT_SECS` 不是正整数
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用自定义的变量查询函数加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("CIVIC_HOST", DEFAULT_HOST);

        let port = var("CIVIC_PORT", DEFAULT_PORT)
            .parse()
            .context("CIVIC_PORT must be a valid port number")?;

        let timeout_secs: u64 = var("CIVIC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
            .parse()
            .context("CIVIC_REQUEST_TIMEOUT_SECS must be a positive integer")?;
        if timeout_secs == 0 {
            anyhow::bail!("CIVIC_REQUEST_TIMEOUT_SECS must be a positive integer");
        }

        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let gemini = GeminiConfig {
            api_key,
            model: var("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            api_base: var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        };

        let disable_tls_verify = lookup("CIVIC_DISABLE_TLS_VERIFY")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
            gemini,
            disable_tls_verify,
        })
    }
}
