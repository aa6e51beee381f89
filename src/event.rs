use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Screen};

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 检查系统主题变化（用于 Auto 模式）
    app.check_system_theme();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C 任何时候都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 帮助面板
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Tasks => {
            // 优先处理弹窗事件
            if app.confirm_dialog.is_some() {
                handle_confirm_dialog_key(app, key);
            } else if app.add_dialog.is_some() {
                handle_add_dialog_key(app, key);
            } else if app.selected_is_editing() {
                handle_edit_key(app, key);
            } else {
                handle_tasks_key(app, key);
            }
        }
    }
}

/// 登录页
fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.switch_focus();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => {
            app.login.focused_mut().pop();
        }
        KeyCode::Char(c) => app.login.focused_mut().push(c),
        _ => {}
    }
}

/// 任务列表（浏览状态）
fn handle_tasks_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 功能按键
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add_dialog(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit_selected(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('x') | KeyCode::Char('d') => app.request_delete_selected(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('T') | KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

/// 任务行编辑状态
fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit_selected(),
        KeyCode::Enter => app.save_selected(),
        KeyCode::Tab | KeyCode::BackTab => app.edit_field = app.edit_field.toggle(),
        // 编辑中仍可切换到其他行，各行状态互不影响
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Backspace => {
            if let Some(buf) = app.edit_buffer_mut() {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = app.edit_buffer_mut() {
                buf.push(c);
            }
        }
        _ => {}
    }
}

/// New Task 弹窗
fn handle_add_dialog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_add_dialog(),
        KeyCode::Enter => app.submit_add(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.add_dialog = app.add_dialog.map(|field| field.toggle());
        }
        KeyCode::Backspace => {
            if let Some(buf) = app.add_buffer_mut() {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = app.add_buffer_mut() {
                buf.push(c);
            }
        }
        _ => {}
    }
}

/// 确认弹窗
fn handle_confirm_dialog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_dialog_accept(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_dialog_cancel(),
        _ => {}
    }
}
