//! CLI 命令实现

pub mod analyze;
pub mod serve;

pub use analyze::analyze_command;
pub use serve::serve_command;
pub use test::test_command;
