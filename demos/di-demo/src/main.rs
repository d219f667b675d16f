//! # DI 演示程序
//!
//! 演示令牌注册、分层提供、子作用域覆盖、兄弟作用域隔离以及存储的拆卸。

mod logging;
mod scenario;
mod services;

use anyhow::Context;
use clap::Parser;
use di_impl::{global_registry, Container};
use infrastructure_common::ContainerConfig;
use logging::LoggingConfig;
use std::str::FromStr;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "di-demo")]
#[command(about = "Lorn DI 分层作用域演示")]
struct Args {
    /// 容器配置文件路径（JSON）
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = tracing::Level::from_str(&args.log_level)
        .with_context(|| format!("无效的日志级别: {}", args.log_level))?;
    LoggingConfig {
        level,
        json_format: args.json,
        ..LoggingConfig::default()
    }
    .init()?;

    let config = load_config(args.config.as_deref())?;
    info!("启动 DI 演示，根作用域: {}", config.root_scope_name);

    let container = Container::with_config(global_registry(), config);
    scenario::run_logger_override(&container)?;
    scenario::run_counter_store(&container)?;
    scenario::run_fresh_instances(&container)?;

    info!("演示结束");
    Ok(())
}

/// 读取容器配置，未指定文件时使用默认配置
fn load_config(path: Option<&str>) -> anyhow::Result<ContainerConfig> {
    let Some(path) = path else {
        return Ok(ContainerConfig::default());
    };

    let text =
        std::fs::read_to_string(path).with_context(|| format!("读取配置文件失败: {}", path))?;
    let config = ContainerConfig::from_json_str(&text)?;
    Ok(config)
}
