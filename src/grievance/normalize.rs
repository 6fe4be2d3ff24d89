//! 模型响应规范化
//!
//! 去掉代码块标记、解析 JSON，然后逐字段修正到合法取值。
//! 每个字段的修正规则是独立的纯函数。

use serde_json::{Map, Value};

use super::error::AnalysisError;
use super::types::{AnalysisResult, Category, Jurisdiction, SeverityScore};

const FENCE: &str = "```";

/// 去掉包裹在外层的代码块
///
/// 如果去除首尾空白后以 ``` 开头，丢弃第一行和最后一行。
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.split('\n').collect();
    if lines.len() < 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

/// 将模型文本输出解析为 JSON 对象
pub fn parse_model_output(raw: &str) -> Result<Map<String, Value>, AnalysisError> {
    let text = strip_code_fence(raw);
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AnalysisError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// 类别不在集合内时使用 `OTHER`
pub fn coerce_category(value: Option<&Value>) -> Category {
    value
        .and_then(Value::as_str)
        .and_then(Category::from_tag)
        .unwrap_or(Category::Other)
}

/// 管辖机构不在集合内时使用 `BCC`
pub fn coerce_jurisdiction(value: Option<&Value>) -> Jurisdiction {
    value
        .and_then(Value::as_str)
        .and_then(Jurisdiction::from_tag)
        .unwrap_or(Jurisdiction::Bcc)
}

/// 非整数或超出 [1, 5] 时使用 3
///
/// 浮点数（包括 `4.0`）和布尔值都不算整数。
pub fn coerce_severity(value: Option<&Value>) -> SeverityScore {
    value
        .and_then(Value::as_i64)
        .and_then(SeverityScore::new)
        .unwrap_or_default()
}

/// 描述原样透传，只做形状转换
pub fn pass_description(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// 识别出的物体列表原样透传，只做形状转换
pub fn pass_detected_objects(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// 组合各字段规则，产出满足全部不变量的结果
pub fn normalize_fields(fields: &Map<String, Value>) -> AnalysisResult {
    AnalysisResult {
        category: coerce_category(fields.get("category")),
        severity_score: coerce_severity(fields.get("severity_score")),
        description_summary: pass_description(fields.get("description_summary")),
        suggested_jurisdiction: coerce_jurisdiction(fields.get("suggested_jurisdiction")),
        detected_objects: pass_detected_objects(fields.get("detected_objects")),
    }
}

/// 模型原始输出 -> 规范化结果
pub fn normalize(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    parse_model_output(raw).map(|fields| normalize_fields(&fields))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLAIN: &str = r#"{"category": "ROADS", "severity_score": 5, "description_summary": "Deep pothole on the main road.", "suggested_jurisdiction": "PWD", "detected_objects": ["pothole", "car"]}"#;

    #[test]
    fn test_plain_json() {
        let result = normalize(PLAIN).unwrap();
        assert_eq!(result.category, Category::Roads);
        assert_eq!(result.severity_score.get(), 5);
        assert_eq!(result.suggested_jurisdiction, Jurisdiction::Pwd);
        assert_eq!(result.detected_objects, vec!["pothole", "car"]);
    }

    #[test]
    fn test_fenced_json_matches_plain() {
        let expected = normalize(PLAIN).unwrap();
        for fenced in [
            format!("```json\n{PLAIN}\n```"),
            format!("```\n{PLAIN}\n```"),
            format!("  \n```json\n{PLAIN}\n```\n  "),
        ] {
            assert_eq!(normalize(&fenced).unwrap(), expected);
        }
    }

    #[test]
    fn test_fence_with_multiline_body() {
        let raw = "```json\n{\n  \"category\": \"DRAINAGE\"\n}\n```";
        assert_eq!(strip_code_fence(raw), "{\n  \"category\": \"DRAINAGE\"\n}");
    }

    #[test]
    fn test_single_line_fence_is_malformed() {
        assert_eq!(strip_code_fence("```"), "");
        assert!(matches!(
            normalize("```{\"category\": \"ROADS\"}```"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            normalize("not json"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_object_is_malformed() {
        for raw in ["[1, 2, 3]", "\"ROADS\"", "42", "null"] {
            assert!(matches!(
                normalize(raw),
                Err(AnalysisError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_coerce_category() {
        assert_eq!(coerce_category(Some(&json!("SANITATION"))), Category::Sanitation);
        assert_eq!(coerce_category(Some(&json!("POTHOLE"))), Category::Other);
        assert_eq!(coerce_category(Some(&json!("roads"))), Category::Other);
        assert_eq!(coerce_category(Some(&json!(3))), Category::Other);
        assert_eq!(coerce_category(None), Category::Other);
    }

    #[test]
    fn test_coerce_jurisdiction() {
        assert_eq!(coerce_jurisdiction(Some(&json!("VTU"))), Jurisdiction::Vtu);
        assert_eq!(coerce_jurisdiction(Some(&json!("UNKNOWN"))), Jurisdiction::Bcc);
        assert_eq!(coerce_jurisdiction(Some(&json!(null))), Jurisdiction::Bcc);
        assert_eq!(coerce_jurisdiction(None), Jurisdiction::Bcc);
    }

    #[test]
    fn test_coerce_severity() {
        assert_eq!(coerce_severity(Some(&json!(1))).get(), 1);
        assert_eq!(coerce_severity(Some(&json!(5))).get(), 5);
        for bad in [json!(0), json!(6), json!(-2), json!(4.0), json!(2.5), json!("4"), json!(true)] {
            assert_eq!(coerce_severity(Some(&bad)).get(), 3, "value {bad}");
        }
        assert_eq!(coerce_severity(None).get(), 3);
    }

    #[test]
    fn test_passthrough_fields_are_not_validated() {
        assert_eq!(pass_description(Some(&json!(""))), "");
        assert_eq!(pass_description(Some(&json!("x".repeat(500)))).len(), 500);
        assert_eq!(pass_description(Some(&json!(12))), "12");
        assert_eq!(pass_description(None), "");

        assert_eq!(
            pass_detected_objects(Some(&json!(["dog", 2, ""]))),
            vec!["dog".to_string(), "2".to_string(), String::new()]
        );
        assert!(pass_detected_objects(Some(&json!("dog"))).is_empty());
        assert!(pass_detected_objects(None).is_empty());
    }

    #[test]
    fn test_fields_are_salvaged_independently() {
        let raw = r#"{"category": "LANDSLIDE", "severity_score": 2, "description_summary": "Mud on road.", "suggested_jurisdiction": "PWD", "extra": true}"#;
        let result = normalize(raw).unwrap();
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.severity_score.get(), 2);
        assert_eq!(result.suggested_jurisdiction, Jurisdiction::Pwd);
        assert!(result.detected_objects.is_empty());
    }
}
