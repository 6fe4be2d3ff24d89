//! Gateway 应用状态

use std::sync::Arc;

use crate::grievance::GrievanceAnalyzer;

/// Gateway 应用状态
///
/// 启动后只读，请求之间不共享可变数据。
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<GrievanceAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: GrievanceAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    pub fn analyzer(&self) -> &GrievanceAnalyzer {
        &self.analyzer
    }
}
