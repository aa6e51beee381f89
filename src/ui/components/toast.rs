use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// 计算屏幕底部居中的 Toast 区域
fn toast_area(frame_area: Rect, text: &str) -> Option<Rect> {
    let toast_height = 3;
    if frame_area.width < 8 || frame_area.height < toast_height + 3 {
        return None;
    }
    let toast_width = (text.chars().count() + 6).min(frame_area.width as usize - 4) as u16;
    let toast_x = (frame_area.width - toast_width) / 2;
    let toast_y = frame_area.height - toast_height - 3;
    Some(Rect::new(toast_x, toast_y, toast_width, toast_height))
}

fn render_text(frame: &mut Frame, text: &str, colors: &ThemeColors) {
    let Some(area) = toast_area(frame.area(), text) else {
        return;
    };

    // 清除背景
    frame.render_widget(Clear, area);

    let toast = Paragraph::new(text)
        .style(
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.highlight))
                .style(Style::default().bg(colors.bg)),
        );

    frame.render_widget(toast, area);
}

/// 在屏幕底部居中显示 Toast 消息
pub fn render(frame: &mut Frame, message: &str, colors: &ThemeColors) {
    render_text(frame, message, colors);
}

/// 在屏幕底部居中显示 Loading Toast（带 spinner 动画）
pub fn render_loading(frame: &mut Frame, message: &str, colors: &ThemeColors) {
    // 选择 spinner 帧（基于时间，每 100ms 切换）
    let tick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100;
    let spinner = SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()];
    render_text(frame, &format!("{} {}", spinner, message), colors);
}
