use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::app::{App, LoginField};

use super::components::dialog_utils::{
    center_dialog, render_dialog_frame, render_error, render_hint, render_labeled_input,
};
use super::components::{help_panel, toast};

/// 登录框宽度
const FORM_WIDTH: u16 = 52;
/// 登录框高度
const FORM_HEIGHT: u16 = 11;

/// 渲染登录页
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let form_area = center_dialog(area, FORM_WIDTH, FORM_HEIGHT);
    let inner_area = render_dialog_frame(frame, form_area, " Sign in ", colors.highlight, colors);

    let [server_area, _, username_area, password_area, _, error_area, _, hint_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner_area);

    let server = Paragraph::new(Line::from(vec![
        Span::styled(
            "taskpad ",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.server_url.as_str(), Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(server, server_area);

    let form = &app.login;
    render_labeled_input(
        frame,
        username_area,
        "Username",
        &form.username,
        form.focus == LoginField::Username,
        false,
        colors,
    );
    render_labeled_input(
        frame,
        password_area,
        "Password",
        &form.password,
        form.focus == LoginField::Password,
        true,
        colors,
    );

    if let Some(error) = &form.error {
        render_error(frame, error_area, error, colors);
    }

    render_hint(
        frame,
        hint_area,
        &[("Enter", "sign in"), ("Tab", "next field"), ("Esc", "quit")],
        colors,
    );

    if app.show_help {
        help_panel::render(frame, colors);
    }
    if let Some(t) = &app.toast {
        toast::render(frame, &t.message, colors);
    } else if let Some(message) = &app.loading_message {
        toast::render_loading(frame, message, colors);
    }
}
