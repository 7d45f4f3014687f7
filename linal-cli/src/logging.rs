//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。
//! 日志写到 stderr，stdout 留给命令本身的输出。

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::ValueEnum;
use linal_config::Phase;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::config::LogConfig;

pub const CLI_TARGET: &str = "linal::cli";

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 按阶段构建过滤规则
pub fn targets(log_config: &LogConfig) -> Targets {
    Phase::ALL.iter().fold(
        Targets::new()
            .with_default(log_config.global)
            .with_target(CLI_TARGET, log_config.global),
        |targets, &phase| targets.with_target(phase.target(), log_config.level_for(phase)),
    )
}

/// 使用指定格式和日志配置初始化日志系统
pub fn init_with_file(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<&Path>,
) -> Result<(), String> {
    let targets = targets(log_config);
    let stderr_layer = create_format_layer(format, io::stderr).with_filter(targets.clone());

    // If file specified, output to both console and file
    if let Some(path) = file {
        let file_handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("cannot open log file '{}': {}", path.display(), e))?;

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file_handle))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| e.to_string())
    } else {
        tracing_subscriber::registry()
            .with(stderr_layer)
            .try_init()
            .map_err(|e| e.to_string())
    }
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
