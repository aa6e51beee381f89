use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// Header 总高度：1 (上边框) + 1 (信息行)
pub const HEADER_HEIGHT: u16 = 2;

/// 渲染顶部信息栏（应用名 + 服务端 + 任务统计）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    server_url: &str,
    total: usize,
    done: usize,
    loading: Option<&str>,
    colors: &ThemeColors,
) {
    // 外框
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut left = vec![
        Span::styled(
            " taskpad ",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(server_url.to_string(), Style::default().fg(colors.muted)),
    ];
    if let Some(message) = loading {
        left.push(Span::styled(
            format!("  {}", message),
            Style::default().fg(colors.editing),
        ));
    }

    let right = Span::styled(
        format!("{}/{} done ", done, total),
        Style::default().fg(colors.muted),
    );

    // 计算中间填充空格
    let used_width: usize = left.iter().map(|s| s.width()).sum::<usize>() + right.width();
    let padding_len = (inner_area.width as usize).saturating_sub(used_width);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(right);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner_area);
}
