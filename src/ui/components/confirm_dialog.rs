//! 确认弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::dialog_utils::{center_dialog, render_dialog_frame};
use super::truncate;
use crate::theme::ThemeColors;

/// 弹窗宽度
const POPUP_WIDTH: u16 = 44;

/// 确认弹窗类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmType {
    /// 删除任务（不可恢复）
    DeleteTask { id: i64, title: String },
}

impl ConfirmType {
    pub fn title(&self) -> &str {
        match self {
            ConfirmType::DeleteTask { .. } => " Delete ",
        }
    }

    pub fn message(&self) -> Vec<Line<'static>> {
        match self {
            ConfirmType::DeleteTask { id, title } => {
                vec![
                    Line::from(format!(
                        "#{} {}",
                        id,
                        truncate(title, POPUP_WIDTH as usize - 10)
                    )),
                    Line::from(""),
                    Line::from("Really delete this task?"),
                ]
            }
        }
    }
}

/// 渲染确认弹窗
pub fn render(frame: &mut Frame, confirm_type: &ConfirmType, colors: &ThemeColors) {
    let message_lines = confirm_type.message();
    let popup_height = (message_lines.len() as u16) + 5; // 边框 + 内容 + 提示

    let popup_area = center_dialog(frame.area(), POPUP_WIDTH, popup_height);
    let inner_area = render_dialog_frame(
        frame,
        popup_area,
        confirm_type.title(),
        colors.error,
        colors,
    );

    let [_, content_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    let styled_lines: Vec<Line> = message_lines
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.text),
            ))
        })
        .collect();

    let content = Paragraph::new(styled_lines).alignment(Alignment::Center);
    frame.render_widget(content, content_area);

    // 渲染底部提示
    let hint = Paragraph::new(Line::from(vec![
        Span::styled(
            "Y",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" delete  ", Style::default().fg(colors.muted)),
        Span::styled(
            "N",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}
