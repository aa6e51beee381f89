use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

use super::components::{
    add_task_dialog, confirm_dialog, empty_state, footer, header, help_panel, task_list, toast,
};

/// 渲染任务页
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    // 错误栏仅在有错误时占位
    let error_height = if app.tasks.error().is_some() { 1 } else { 0 };

    let [header_area, error_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(error_height),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let done = app.tasks.tasks().iter().filter(|t| t.completed).count();
    header::render(
        frame,
        header_area,
        &app.server_url,
        app.tasks.len(),
        done,
        app.loading_message.as_deref(),
        &colors,
    );

    if let Some(message) = app.tasks.error() {
        render_error_bar(frame, error_area, message, &colors);
    }

    if app.tasks.is_empty() {
        empty_state::render(frame, list_area, &colors);
    } else {
        task_list::render(
            frame,
            list_area,
            &app.tasks,
            &mut app.table_state,
            app.edit_field,
            &colors,
        );
    }

    footer::render(
        frame,
        footer_area,
        app.selected_is_editing(),
        !app.tasks.is_empty(),
        &colors,
    );

    // 弹窗（按优先级，只显示一个）
    if app.show_help {
        help_panel::render(frame, &colors);
    } else if let Some(confirm_type) = &app.confirm_dialog {
        confirm_dialog::render(frame, confirm_type, &colors);
    } else if let Some(focus) = app.add_dialog {
        add_task_dialog::render(
            frame,
            &app.tasks.new_title,
            &app.tasks.new_description,
            focus,
            &colors,
        );
    }

    // Toast 优先于 loading
    if let Some(toast) = &app.toast {
        toast::render(frame, &toast.message, &colors);
    } else if let Some(message) = &app.loading_message {
        toast::render_loading(frame, message, &colors);
    }
}

fn render_error_bar(frame: &mut Frame, area: Rect, message: &str, colors: &ThemeColors) {
    let line = Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(colors.error)),
        Span::styled(message.to_string(), Style::default().fg(colors.error)),
    ]);
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(colors.border)),
    );
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::tests::app_with;
    use crate::client::fake::GOOD_TOKEN;
    use crate::model::Task;

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_rows_and_error_bar() {
        let tasks = vec![
            Task {
                id: 1,
                title: "Buy milk".to_string(),
                description: "2L".to_string(),
                completed: true,
            },
            Task {
                id: 2,
                title: "Walk dog".to_string(),
                description: String::new(),
                completed: false,
            },
        ];
        let (mut app, api) = app_with(Some(GOOD_TOKEN), tasks);
        let text = screen_text(&mut app);
        assert!(text.contains("Buy milk"));
        assert!(text.contains("Walk dog"));
        assert!(text.contains("1/2 done"));

        api.fail_next(500);
        app.reload();
        app.wait_idle();
        let text = screen_text(&mut app);
        assert!(text.contains("failed to fetch tasks"));
        // 失败的刷新保留旧列表
        assert!(text.contains("Buy milk"));
    }

    #[test]
    fn test_renders_empty_state() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![]);
        assert!(screen_text(&mut app).contains("No tasks yet"));
    }
}
