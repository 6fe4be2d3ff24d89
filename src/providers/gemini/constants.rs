//! Gemini 配置常量

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

pub const GEMINI_API_VERSION: &str = "v1beta";
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// 拼接 generateContent 接口地址
pub fn generate_content_url(api_base: &str, model: &str) -> String {
    format!(
        "{}/{}/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        GEMINI_API_VERSION,
        model
    )
}
