use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(frame: &mut Frame, area: Rect, editing: bool, has_items: bool, colors: &ThemeColors) {
    let shortcuts = get_shortcuts(editing, has_items);

    let mut spans = Vec::new();
    spans.push(Span::raw("  "));

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));

        if i < shortcuts.len() - 1 {
            spans.push(Span::raw("   "));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn get_shortcuts(editing: bool, has_items: bool) -> Vec<(&'static str, &'static str)> {
    if editing {
        return vec![
            ("Enter", "save"),
            ("Tab", "field"),
            ("Esc", "cancel"),
            ("↑/↓", "row"),
        ];
    }
    if has_items {
        vec![
            ("a", "add"),
            ("e", "edit"),
            ("Space", "toggle"),
            ("x", "delete"),
            ("r", "reload"),
            ("?", "help"),
            ("q", "quit"),
        ]
    } else {
        vec![("a", "add"), ("r", "reload"), ("L", "logout"), ("q", "quit")]
    }
}
