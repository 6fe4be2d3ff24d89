//! CivicConnect AI - 市政投诉图片分析服务
//!
//! 接收市民上传的问题照片，交给 Gemini 多模态模型分类，
//! 规范化结果后返回结构化的投诉报告。
//!
//! # 功能特性
//!
//! - 9 种投诉类别、4 个管辖机构、1-5 级严重程度
//! - 模型输出逐字段修正，非法取值回落到默认值
//! - 未配置 API key 或模型调用失败时返回固定的兜底结果
//!
//! # 命令行接口
//!
//! - `serve`: 启动 API 服务器
//! - `analyze`: 在本地对一张图片运行分析
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod gateway;
mod grievance;
mod providers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CivicConnect CLI
#[derive(Parser)]
#[command(name = "civicconnect")]
#[command(about = "AI-powered civic grievance analysis service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 API 服务器
    Serve,
    /// 在本地分析一张图片并打印结果
    Analyze {
        /// 图片文件路径（JPEG）
        image: PathBuf,
    },
    /// 向本地服务器发送测试请求
    Test {
        /// 附带一张图片测试分析接口
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("CIVIC_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 初始化日志系统
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicconnect=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // 执行相应的命令
    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Analyze { image } => commands::analyze_command(config, &image).await,
        Commands::Test { image } => commands::test_command(config, image.as_deref()).await,
    }
}
