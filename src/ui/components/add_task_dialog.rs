//! New Task 弹窗组件

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use super::dialog_utils::{center_dialog, render_dialog_frame, render_hint, render_labeled_input};
use crate::app::FormField;
use crate::theme::ThemeColors;

/// 渲染 New Task 弹窗
pub fn render(
    frame: &mut Frame,
    title: &str,
    description: &str,
    focus: FormField,
    colors: &ThemeColors,
) {
    let area = frame.area();
    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_area = center_dialog(area, popup_width, 8);

    let inner_area = render_dialog_frame(frame, popup_area, " New Task ", colors.highlight, colors);

    // 内部布局: 空行 + 标题 + 描述 + 空行 + 提示行
    let [_, title_area, description_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    render_labeled_input(
        frame,
        title_area,
        "Title",
        title,
        focus == FormField::Title,
        false,
        colors,
    );
    render_labeled_input(
        frame,
        description_area,
        "Description",
        description,
        focus == FormField::Description,
        false,
        colors,
    );

    render_hint(
        frame,
        hint_area,
        &[("Enter", "add"), ("Tab", "next field"), ("Esc", "close")],
        colors,
    );
}
