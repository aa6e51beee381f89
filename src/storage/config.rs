//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{save_toml, taskpad_dir};
use crate::client::DEFAULT_SERVER_URL;

/// 覆盖服务端地址的环境变量
pub const SERVER_ENV: &str = "TASKPAD_SERVER";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// 服务端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    taskpad_dir().join("config.toml")
}

/// 加载配置（不存在则返回默认值）
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

/// 从指定路径加载配置，文件缺失或损坏时返回默认值
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| toml::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// 保存配置
pub fn save_config(config: &Config) -> io::Result<()> {
    save_toml(&config_path(), config)
}

/// 空白值视为未设置
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// 决定最终使用的服务端地址：命令行 > 环境变量 > 配置文件
pub fn resolve_server_url(flag: Option<&str>, env: Option<&str>, config: &Config) -> String {
    non_blank(flag)
        .or_else(|| non_blank(env))
        .unwrap_or(&config.server.url)
        .trim_end_matches('/')
        .to_string()
}
