//! 任务相关子命令（list / add / edit / toggle / rm）
//!
//! 每个子命令都从一个新的 `TaskList` 开始，经由同步器完成请求，
//! 与 TUI 共用同一套会话检查和错误映射。

use std::io::{BufRead, Write};

use crate::client::TaskApi;
use crate::error::{AppError, Result};
use crate::model::Task;
use crate::session::SessionContext;
use crate::sync::TaskList;

use super::confirm;

/// 单行任务描述，用于 list 和操作结果回显
fn format_task(task: &Task) -> String {
    let mut line = format!(
        "{:>4}  {} {:<7}  {}",
        format!("#{}", task.id),
        task.checkbox(),
        task.status_label(),
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(&format!("  ({})", task.description));
    }
    line
}

pub fn list(
    session: &SessionContext,
    api: &dyn TaskApi,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut tasks = TaskList::new();
    let items = tasks.list(session, api)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        return Ok(());
    }

    if items.is_empty() {
        writeln!(out, "No tasks yet. Add one with `taskpad add <TITLE>`.")?;
        return Ok(());
    }
    for task in items {
        writeln!(out, "{}", format_task(task))?;
    }
    Ok(())
}

pub fn add(
    session: &SessionContext,
    api: &dyn TaskApi,
    title: &str,
    description: &str,
    out: &mut impl Write,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::invalid_data("title cannot be empty"));
    }
    let task = TaskList::new().add(session, api, title, description)?;
    writeln!(out, "Added {}", format_task(&task))?;
    Ok(())
}

/// 编辑任务：未指定的字段沿用服务端当前值
pub fn edit(
    session: &SessionContext,
    api: &dyn TaskApi,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    if title.is_none() && description.is_none() {
        return Err(AppError::invalid_data(
            "nothing to change, pass --title and/or --description",
        ));
    }

    let mut tasks = TaskList::new();
    tasks.list(session, api)?;
    if !tasks.begin_edit(id) {
        return Err(AppError::not_found(format!("task #{}", id)));
    }
    if let Some((title_buf, description_buf)) = tasks.edit_buffers_mut(id) {
        if let Some(t) = title {
            *title_buf = t.to_string();
        }
        if let Some(d) = description {
            *description_buf = d.to_string();
        }
    }

    let task = tasks.save_edit(session, api, id)?;
    writeln!(out, "Saved {}", format_task(&task))?;
    Ok(())
}

pub fn toggle(
    session: &SessionContext,
    api: &dyn TaskApi,
    id: i64,
    out: &mut impl Write,
) -> Result<()> {
    let task = TaskList::new().toggle(session, api, id)?;
    writeln!(out, "{}", format_task(&task))?;
    Ok(())
}

/// 删除任务；未带 `--yes` 时先在终端确认
pub fn remove(
    session: &SessionContext,
    api: &dyn TaskApi,
    id: i64,
    yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    // 没有会话时不必询问
    session.require_session()?;

    if !yes && !confirm(input, out, &format!("Delete task #{}?", id))? {
        writeln!(out, "Cancelled")?;
        return Ok(());
    }

    TaskList::new().remove(session, api, id)?;
    writeln!(out, "Deleted #{}", id)?;
    Ok(())
}
