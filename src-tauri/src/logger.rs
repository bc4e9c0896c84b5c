// 日志初始化 - 同时输出到控制台与按天轮转的文件

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::storage::StoreConfig;

/// 日志目录：可执行文件旁的 `logs/`
pub fn log_dir() -> PathBuf {
    StoreConfig::executable_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("logs"))
}

/// 初始化日志系统
///
/// 日志目录不可写时只输出到控制台。
/// 返回的 guard 必须在程序运行期间保持存活，否则文件日志会丢失
pub fn init(log_dir: &Path) -> Result<Option<WorkerGuard>> {
    // 使用本地时区
    let timer = LocalTime::new(time::macros::format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let (file_layer, guard) = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            // 配置日志输出到文件（每天轮转）
            let file_appender = tracing_appender::rolling::daily(log_dir, "app.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_timer(timer.clone())
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("无法创建日志目录 {:?}: {}，仅输出到控制台", log_dir, e);
            (None, None)
        }
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions)); // release 版本不使用颜色代码

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    if guard.is_some() {
        eprintln!("日志文件位置: {:?}", log_dir);
    }
    Ok(guard)
}
