//! Gemini Provider
//!
//! 基于 API key 的 Gemini generateContent 调用

mod constants;

use anyhow::{Context, Result};
use async_trait::async_trait;
use http::{header, HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::{json, Value};

use crate::grievance::{AnalysisError, InlineImage};
use crate::providers::VisionModel;
use crate::utils::http_client_builder;

use constants::{generate_content_url, GEMINI_API_KEY_HEADER};
pub use constants::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};

/// Token 使用统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub output_tokens: u64,
}

/// 从 Gemini 响应的 usageMetadata 中解析用量，缺失的字段记为 0
pub fn parse_gemini_usage(response: &Value) -> Usage {
    let usage = response.get("usageMetadata");
    let get = |name: &str| {
        usage
            .and_then(|u| u.get(name))
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    };

    Usage {
        prompt_tokens: get("promptTokenCount"),
        output_tokens: get("candidatesTokenCount"),
    }
}

pub struct GeminiModel {
    client: Client,
    endpoint: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_base: &str, model: &str, api_key: &str, disable_tls_verify: bool) -> Result<Self> {
        let client = http_client_builder(disable_tls_verify)
            .default_headers(build_headers(api_key)?)
            .build()
            .context("Failed to create Gemini API client")?;

        Ok(Self {
            client,
            endpoint: generate_content_url(api_base, model),
            model: model.to_string(),
        })
    }

    async fn send_request(&self, body: &Value) -> Result<Value, AnalysisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| AnalysisError::UpstreamFailure(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::UpstreamFailure(format!(
                "Gemini API error {}: {}",
                status, error_body
            )));
        }

        response.json().await.map_err(|e| {
            AnalysisError::UpstreamFailure(format!("failed to parse Gemini API response: {e}"))
        })
    }
}

#[async_trait]
impl VisionModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<String, AnalysisError> {
        let body = build_request_body(prompt, image);
        let response = self.send_request(&body).await?;

        let usage = parse_gemini_usage(&response);
        tracing::info!(
            model = %self.model,
            prompt_tokens = usage.prompt_tokens,
            output_tokens = usage.output_tokens,
            "response"
        );

        extract_text(&response).ok_or_else(|| {
            let reason = response
                .pointer("/promptFeedback/blockReason")
                .or_else(|| response.pointer("/candidates/0/finishReason"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            AnalysisError::UpstreamFailure(format!("response contained no text ({reason})"))
        })
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    let mut key = HeaderValue::from_str(api_key).context("Invalid Gemini API key for header")?;
    key.set_sensitive(true);
    map.insert(GEMINI_API_KEY_HEADER, key);
    map.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    map.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    Ok(map)
}

/// 文本提示和图片作为同一轮用户消息的两个 part
fn build_request_body(prompt: &str, image: &InlineImage) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": prompt },
                {
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": image.data,
                    }
                }
            ]
        }]
    })
}

/// 拼接第一个候选结果中的全部文本 part
fn extract_text(response: &Value) -> Option<String> {
    let parts = response.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
