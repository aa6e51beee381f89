//! taskpad 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理。远程操作的错误只对外展示一句
//! 固定的提示文本，底层的传输原因保留在 `source()` 中，仅用于日志。

use std::io;
use thiserror::Error;

use crate::client::ClientError;

/// taskpad 错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地没有保存 token
    #[error("login required")]
    SessionRequired,

    /// 登录被拒绝（或请求失败）
    #[error("login failed")]
    AuthFailure(#[source] ClientError),

    #[error("failed to fetch tasks")]
    Fetch(#[source] ClientError),

    #[error("failed to add task")]
    Add(#[source] ClientError),

    #[error("failed to delete task")]
    Delete(#[source] ClientError),

    #[error("failed to update task")]
    Update(#[source] ClientError),

    #[error("failed to toggle task status")]
    Toggle(#[source] ClientError),

    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 无效数据
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// taskpad Result 类型别名
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// 底层传输错误（仅远程操作有）
    pub fn client_cause(&self) -> Option<&ClientError> {
        match self {
            AppError::AuthFailure(e)
            | AppError::Fetch(e)
            | AppError::Add(e)
            | AppError::Delete(e)
            | AppError::Update(e)
            | AppError::Toggle(e) => Some(e),
            _ => None,
        }
    }
}
