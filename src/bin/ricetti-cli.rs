//! Ricetti CLI 客户端（测试版）
//!
//! 非交互式 CLI，用于对着真实后端验证 SDK 功能：
//! 启动时加载用户资料与收藏，可选执行一次收藏切换，然后打印收藏列表。

use anyhow::{Context, Result};
use clap::Parser;
use ricetti_sdk_core_rust::shop::auth::StaticTokenProvider;
use ricetti_sdk_core_rust::shop::client::{ClientConfig, ShopClient};
use std::sync::Arc;
use tracing::{error, info};

/// Ricetti CLI 客户端
#[derive(Parser, Debug)]
#[command(name = "ricetti-cli")]
#[command(about = "Ricetti CLI 客户端 - 用于测试店面后端接口", long_about = None)]
struct Args {
    /// 后端 API 基础地址
    #[arg(long, default_value = "http://localhost:8081")]
    api_base: String,

    /// Bearer 访问令牌（也可用环境变量 RICETTI_TOKEN 提供）
    #[arg(short, long)]
    token: Option<String>,

    /// 启动后切换一次该菜谱的收藏状态（可选）
    #[arg(long)]
    toggle: Option<i64>,

    /// 日志级别（默认: info,ricetti_sdk_core_rust=debug）
    #[arg(long, default_value = "info,ricetti_sdk_core_rust=debug")]
    log_level: String,
}

/// 初始化日志（同时输出到 stdout 和文件）
fn init_logger(log_level: &str) {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // 创建日志文件（追加模式）
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("无法创建日志文件 debug.log");

    // 输出到 stdout（控制台），保留 ANSI 颜色代码用于终端显示
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 输出到文件，禁用 ANSI 颜色代码（文件不需要颜色）
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("[CLI] 📝 日志已同时输出到控制台和文件: debug.log");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);

    let token = match args.token {
        Some(t) => t,
        None => std::env::var("RICETTI_TOKEN")
            .context("未提供访问令牌（--token 或环境变量 RICETTI_TOKEN）")?,
    };

    let client = ShopClient::new(
        ClientConfig::new(args.api_base),
        Arc::new(StaticTokenProvider::new(token)),
    )?;

    client.init_session().await;

    if let Some(err) = client.profile().error() {
        error!("[CLI] ❌ 用户资料加载失败: {}", err);
    }
    if client.profile().is_logged_in() {
        info!(
            "[CLI] 👤 当前用户: {} <{}>（管理员: {}）",
            client.profile().user_name(),
            client.profile().user_email(),
            client.profile().is_admin()
        );
    }

    if let Some(recipe_id) = args.toggle {
        match client.favorites().toggle_favorite(recipe_id).await {
            Ok(result) => info!(
                "[CLI] ✅ 收藏切换完成: recipeId={}, isFavorite={}",
                result.recipe_id, result.is_favorite
            ),
            Err(e) => error!("[CLI] ❌ 收藏切换失败: {}", e),
        }
    }

    client.favorites().fetch_favorites().await;
    if let Some(err) = client.favorites().error() {
        error!("[CLI] ❌ 收藏列表加载失败: {}", err);
    }

    info!("[CLI] ⭐ 收藏数量: {}", client.favorites().count());
    for favorite in client.favorites().sorted_favorites() {
        info!(
            "[CLI]   - recipeId={}, 收藏于 {}",
            favorite.recipe_id, favorite.created_at
        );
    }

    Ok(())
}
