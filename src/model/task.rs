use serde::{Deserialize, Deserializer, Serialize};

/// 服务端任务数据（服务端为准，本地只做缓存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 服务端分配的 ID，不可变
    pub id: i64,
    pub title: String,
    /// 服务端可能返回 null
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// 返回完成状态对应的复选框图标
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "▣"
        } else {
            "▢"
        }
    }

    /// 返回完成状态文字标签
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "done"
        } else {
            "pending"
        }
    }
}

/// 新建 / 更新任务时发送的请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
