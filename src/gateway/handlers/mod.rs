//! HTTP 请求处理器

pub mod analyze;
pub mod health;

pub use analyze::handle_analyze_grievance;
pub use health::handle_health;
