// 日志系统初始化 - 同时输出到终端和按天轮转的日志文件

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// 日志文件名前缀
const LOG_FILE_NAME: &str = "mantenciones.log";

/// 时间戳格式
const TIMESTAMP_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]";

/// 根据 `-v` 选择日志级别
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// 初始化日志系统
///
/// # 参数
/// - `log_dir`: 日志目录，不存在时自动创建
/// - `verbose`: 是否输出 DEBUG 日志
pub fn init(log_dir: &Path, verbose: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // 配置日志输出到文件（每天轮转）
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 保持 guard 在整个程序生命周期
    std::mem::forget(guard);

    // 终端日志走 stderr，stdout 留给命令输出
    let writer = std::io::stderr.and(non_blocking);

    // 使用本地时区
    let timer = LocalTime::new(time::format_description::parse(TIMESTAMP_FORMAT)?);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("初始化日志系统失败: {}", e))?;

    tracing::debug!("日志文件位置: {:?}", log_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false), Level::INFO);
        assert_eq!(level_for(true), Level::DEBUG);
    }

    #[test]
    fn test_timestamp_format_parses() {
        assert!(time::format_description::parse(TIMESTAMP_FORMAT).is_ok());
    }
}
