//! tracing 日志初始化
//!
//! 命令行模式输出到 stderr；TUI 模式写入 ~/.taskpad/taskpad.log，避免破坏终端画面。
//! 日志级别由 TASKPAD_LOG 控制（默认 warn）。

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::storage::taskpad_dir;

/// 日志级别环境变量
pub const LOG_ENV: &str = "TASKPAD_LOG";

/// 日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// TUI 日志文件路径
pub fn log_file_path() -> PathBuf {
    taskpad_dir().join("taskpad.log")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// 安装全局 subscriber（重复调用无副作用）
pub fn init(target: LogTarget) {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File => {
            let path = log_file_path();
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            // 日志文件打不开时静默放弃，TUI 照常运行
            let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
                return;
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
}
