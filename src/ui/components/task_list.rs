use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::FormField;
use crate::model::Task;
use crate::sync::{RowState, TaskList};
use crate::theme::ThemeColors;

/// 渲染任务列表
///
/// 编辑中的行显示编辑缓冲区而非服务端数据，聚焦的输入框带光标。
pub fn render(
    frame: &mut Frame,
    area: Rect,
    list: &TaskList,
    table_state: &mut TableState,
    edit_field: FormField,
    colors: &ThemeColors,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from(""), // 完成状态
        Cell::from("TITLE"),
        Cell::from("DESCRIPTION"),
        Cell::from("STATUS"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    let selected_index = table_state.selected();

    let rows: Vec<Row> = list
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            build_row(task, list.row_state(task.id), is_selected, edit_field, colors)
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(2),  // 复选框
        Constraint::Fill(2),    // TITLE (flex)
        Constraint::Fill(3),    // DESCRIPTION (flex)
        Constraint::Length(8),  // STATUS
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, table_state);
}

fn build_row<'a>(
    task: &'a Task,
    state: Option<&'a RowState>,
    is_selected: bool,
    edit_field: FormField,
    colors: &ThemeColors,
) -> Row<'a> {
    let selector = if is_selected { "❯" } else { " " };

    let status_style = if task.completed {
        Style::default().fg(colors.status_done)
    } else {
        Style::default().fg(colors.status_pending)
    };

    let (title, description, row_style) = match state {
        Some(RowState::Editing { title, description }) => {
            // 只有选中行接收键盘输入，才显示光标
            let focus = is_selected.then_some(edit_field);
            (
                input_cell(title, focus == Some(FormField::Title), colors),
                input_cell(description, focus == Some(FormField::Description), colors),
                Style::default().fg(colors.editing),
            )
        }
        _ => {
            let title_style = if task.completed {
                Style::default()
                    .fg(colors.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.text)
            };
            (
                Cell::from(task.title.as_str()).style(title_style),
                Cell::from(task.description.as_str()).style(Style::default().fg(colors.muted)),
                Style::default().fg(colors.text),
            )
        }
    };

    Row::new(vec![
        Cell::from(selector).style(Style::default().fg(colors.highlight)),
        Cell::from(task.checkbox()).style(status_style),
        title,
        description,
        Cell::from(task.status_label()).style(status_style),
    ])
    .style(row_style)
}

fn input_cell<'a>(value: &'a str, focused: bool, colors: &ThemeColors) -> Cell<'a> {
    let mut spans = vec![Span::styled(value, Style::default().fg(colors.editing))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }
    Cell::from(Line::from(spans))
}
