//! 兜底结果
//!
//! 未配置 API key、模型调用失败或响应无法解析时使用。

use super::types::{AnalysisResult, Category, Jurisdiction, SeverityScore};

const FALLBACK_SEVERITY: SeverityScore = SeverityScore::from_const(4);

const FALLBACK_DESCRIPTION: &str = "Large garbage pile with accumulated plastic bags, organic waste, and debris. This poses a health hazard and requires municipal attention.";

const FALLBACK_OBJECTS: [&str; 4] = ["garbage bags", "plastic waste", "organic waste", "debris"];

/// 固定的兜底分析结果
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        category: Category::SolidWaste,
        severity_score: FALLBACK_SEVERITY,
        description_summary: FALLBACK_DESCRIPTION.to_string(),
        suggested_jurisdiction: Jurisdiction::Bcc,
        detected_objects: FALLBACK_OBJECTS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grievance::types::AnalysisResponse;

    fn fallback_response() -> AnalysisResponse {
        AnalysisResponse::success(fallback_analysis())
    }

    #[test]
    fn test_fallback_values() {
        let result = fallback_analysis();
        assert_eq!(result.category, Category::SolidWaste);
        assert_eq!(result.severity_score.get(), 4);
        assert_eq!(result.suggested_jurisdiction, Jurisdiction::Bcc);
        assert_eq!(result.detected_objects.len(), 4);
        assert!(!result.description_summary.is_empty());
    }

    #[test]
    fn test_fallback_is_idempotent() {
        let first = serde_json::to_vec(&fallback_response()).unwrap();
        let second = serde_json::to_vec(&fallback_response()).unwrap();
        assert_eq!(first, second);
        assert!(fallback_response().success);
    }
}
