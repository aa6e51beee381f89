//! 登录 token 持久化
//!
//! token 存放在 ~/.taskpad/session.toml 的固定键 `token` 下，
//! 直到显式 logout 或手动删除文件为止。

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use super::{load_toml, save_toml, taskpad_dir};

/// token 的存取接口（运行时写文件，测试用内存实现）
pub trait TokenStore {
    /// 读取 token，不存在时返回 None
    fn load(&self) -> io::Result<Option<String>>;
    /// 保存 token（覆盖旧值）
    fn save(&self, token: &str) -> io::Result<()>;
    /// 删除 token，不存在时也视为成功
    fn clear(&self) -> io::Result<()>;
}

/// session.toml 文件结构
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// 基于文件的 token 存储
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ~/.taskpad/session.toml
    pub fn default_location() -> Self {
        Self::new(taskpad_dir().join("session.toml"))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file: SessionFile = load_toml(&self.path)?;
        let token = file.token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&self, token: &str) -> io::Result<()> {
        save_toml(
            &self.path,
            &SessionFile {
                token: token.to_string(),
            },
        )?;
        restrict_permissions(&self.path)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// token 文件仅当前用户可读
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// 内存 token 存储（测试用）
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
