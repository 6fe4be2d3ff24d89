//! 投诉分析的领域类型
//!
//! 所有值都只存在于单次请求内，不做持久化。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AnalysisError;

/// 投诉类别（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    SolidWaste,
    Roads,
    WaterSupply,
    Drainage,
    Electricity,
    StreetLights,
    Encroachment,
    Sanitation,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::SolidWaste,
        Category::Roads,
        Category::WaterSupply,
        Category::Drainage,
        Category::Electricity,
        Category::StreetLights,
        Category::Encroachment,
        Category::Sanitation,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SolidWaste => "SOLID_WASTE",
            Category::Roads => "ROADS",
            Category::WaterSupply => "WATER_SUPPLY",
            Category::Drainage => "DRAINAGE",
            Category::Electricity => "ELECTRICITY",
            Category::StreetLights => "STREET_LIGHTS",
            Category::Encroachment => "ENCROACHMENT",
            Category::Sanitation => "SANITATION",
            Category::Other => "OTHER",
        }
    }

    /// 按标签精确匹配（区分大小写）
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

/// 负责处理问题的行政机构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Jurisdiction {
    /// Belagavi City Corporation
    Bcc,
    /// Belgaum Cantonment Board
    Cantonment,
    /// Visvesvaraya Technological University 校区
    Vtu,
    /// Public Works Department（州级公路）
    Pwd,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::Bcc,
        Jurisdiction::Cantonment,
        Jurisdiction::Vtu,
        Jurisdiction::Pwd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Bcc => "BCC",
            Jurisdiction::Cantonment => "CANTONMENT",
            Jurisdiction::Vtu => "VTU",
            Jurisdiction::Pwd => "PWD",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.as_str() == tag)
    }
}

/// 严重程度评分，取值范围 [1, 5]
///
/// - 1: 轻微的外观问题
/// - 3: 需要关注的中等问题
/// - 5: 紧急情况或健康危害
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SeverityScore(u8);

impl SeverityScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: SeverityScore = SeverityScore(3);

    /// 用于常量的构造函数，超出范围在编译期报错
    pub const fn from_const(value: u8) -> Self {
        assert!(value >= Self::MIN && value <= Self::MAX, "severity score must be within 1..=5");
        Self(value)
    }

    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for SeverityScore {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for SeverityScore {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("severity_score {value} is outside 1..=5"))
    }
}

impl From<SeverityScore> for i64 {
    fn from(score: SeverityScore) -> Self {
        score.0 as i64
    }
}

/// 上报位置（目前下游未使用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// 分析请求
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Base64 编码的图片，不做解码校验
    pub image_base64: String,
    /// 语音备注（目前下游未使用）
    pub audio_base64: Option<String>,
    pub location: Option<Location>,
}

impl AnalysisRequest {
    /// 从客户端 JSON 负载构造请求
    ///
    /// 负载必须是非空对象，且 `image_base64` 为非空字符串。
    /// 可选字段形状不对时按缺失处理。
    pub fn from_payload(payload: &Value) -> Result<Self, AnalysisError> {
        let obj = payload
            .as_object()
            .filter(|o| !o.is_empty())
            .ok_or_else(|| AnalysisError::InvalidRequest("No data provided".to_string()))?;

        let image_base64 = obj
            .get("image_base64")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AnalysisError::InvalidRequest("No image provided".to_string()))?
            .to_string();

        let audio_base64 = obj
            .get("audio_base64")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let location = obj
            .get("location")
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        Ok(Self {
            image_base64,
            audio_base64,
            location,
        })
    }
}

/// 随提示词一起发送给模型的内联二进制数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: &'static str,
    /// Base64 数据，原样透传
    pub data: String,
}

impl InlineImage {
    pub const JPEG: &'static str = "image/jpeg";

    pub fn jpeg(data: impl Into<String>) -> Self {
        Self {
            mime_type: Self::JPEG,
            data: data.into(),
        }
    }
}

/// 规范化后的分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: Category,
    pub severity_score: SeverityScore,
    pub description_summary: String,
    pub suggested_jurisdiction: Jurisdiction,
    pub detected_objects: Vec<String>,
}

/// 返回给调用方的响应
///
/// `success` 为 true 时只有 `analysis`，为 false 时只有 `error`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn success(analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_tags_round_trip_through_serde() {
        for category in Category::ALL {
            let value = serde_json::to_value(category).unwrap();
            assert_eq!(value, json!(category.as_str()));
            assert_eq!(Category::from_tag(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(Category::from_tag("roads"), None);
        assert_eq!(Jurisdiction::from_tag("bcc"), None);
        assert_eq!(Jurisdiction::from_tag("PWD"), Some(Jurisdiction::Pwd));
    }

    #[test]
    fn test_severity_bounds() {
        assert!(SeverityScore::new(0).is_none());
        assert!(SeverityScore::new(6).is_none());
        assert_eq!(SeverityScore::new(1).map(|s| s.get()), Some(1));
        assert_eq!(SeverityScore::new(5).map(|s| s.get()), Some(5));
        assert_eq!(SeverityScore::default().get(), 3);
    }

    #[test]
    fn test_severity_from_const() {
        const HIGH: SeverityScore = SeverityScore::from_const(4);
        assert_eq!(HIGH.get(), 4);
        assert_eq!(SeverityScore::from_const(1), SeverityScore::new(1).unwrap());
    }

    #[test]
    #[should_panic(expected = "severity score must be within 1..=5")]
    fn test_severity_from_const_rejects_out_of_range() {
        let value = std::hint::black_box(9);
        SeverityScore::from_const(value);
    }

    #[test]
    fn test_severity_serializes_as_integer() {
        let value = serde_json::to_value(SeverityScore::new(4).unwrap()).unwrap();
        assert_eq!(value, json!(4));
        assert!(serde_json::from_value::<SeverityScore>(json!(9)).is_err());
    }

    #[test]
    fn test_request_requires_object() {
        for payload in [json!(null), json!({}), json!([1, 2]), json!("image")] {
            let err = AnalysisRequest::from_payload(&payload).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidRequest(ref m) if m == "No data provided"));
        }
    }

    #[test]
    fn test_request_requires_non_empty_image() {
        for payload in [
            json!({"audio_base64": "abc"}),
            json!({"image_base64": ""}),
            json!({"image_base64": 42}),
        ] {
            let err = AnalysisRequest::from_payload(&payload).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidRequest(ref m) if m == "No image provided"));
        }
    }

    #[test]
    fn test_request_keeps_optional_fields() {
        let payload = json!({
            "image_base64": "/9j/4AAQ",
            "audio_base64": "SUQz",
            "location": {"lat": 15.8497, "lng": 74.4977}
        });
        let req = AnalysisRequest::from_payload(&payload).unwrap();
        assert_eq!(req.image_base64, "/9j/4AAQ");
        assert_eq!(req.audio_base64.as_deref(), Some("SUQz"));
        assert_eq!(
            req.location,
            Some(Location {
                lat: 15.8497,
                lng: 74.4977
            })
        );
    }

    #[test]
    fn test_request_ignores_malformed_location() {
        let payload = json!({"image_base64": "abc", "location": {"lat": "north"}});
        let req = AnalysisRequest::from_payload(&payload).unwrap();
        assert!(req.location.is_none());
    }

    #[test]
    fn test_response_shape() {
        let failure = serde_json::to_value(AnalysisResponse::failure("No image provided")).unwrap();
        assert_eq!(failure, json!({"success": false, "error": "No image provided"}));
    }
}
