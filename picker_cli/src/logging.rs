//! 日志初始化：`tracing` + `tracing-subscriber`，输出到 stderr。
//!
//! `RUST_LOG` 存在时优先使用，否则按 `-v` 次数决定级别：
//! - 0：warn
//! - 1：debug
//! - 2+：trace

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// 安装全局 subscriber；只应在启动时调用一次。
pub fn init_logging(verbosity: u8) {
    let level = level_from_verbosity(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // 依赖库保持 warn，只放开本工作区的 crate
        EnvFilter::new(format!(
            "warn,picker_cli={level},picker_core={level},picker_items={level}"
        ))
    });
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();
    tracing_subscriber::registry().with(filter).with(layer).init();
}
