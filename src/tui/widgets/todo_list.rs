use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::engine::timefmt::format_duration;
use crate::models::Status;
use crate::tui::app::TodoRow;
use crate::tui::widgets::{highlight_style, priority_color};

pub fn render_todo_list(
    f: &mut Frame,
    area: Rect,
    rows: &[TodoRow],
    total_count: usize,
    running_task: Option<i64>,
    list_state: &mut ListState,
) {
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            TodoRow::Header { label, count } => ListItem::new(Line::from(Span::styled(
                format!("{} ({})", label, count),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            TodoRow::Task(task) => {
                let status_indicator = match task.status {
                    Status::Done => "\u{2713}",
                    Status::InProgress => "\u{25d0}",
                    Status::Todo => "\u{25cb}",
                };
                let timer_marker = if task.id.is_some() && task.id == running_task {
                    " \u{25b6}"
                } else {
                    ""
                };
                let time = if task.time_spent > 0 || !timer_marker.is_empty() {
                    format!(" {}", format_duration(task.time_spent))
                } else {
                    String::new()
                };
                let mut text = format!(
                    "  {} {}{}{}",
                    status_indicator, task.title, time, timer_marker
                );
                if text.chars().count() > max_width {
                    text = text.chars().take(max_width.saturating_sub(3)).collect::<String>() + "...";
                }
                ListItem::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(priority_color(task.priority)),
                )))
            }
        })
        .collect();

    let task_count = rows
        .iter()
        .filter(|row| matches!(row, TodoRow::Task(_)))
        .count();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tasks ({}/{})", task_count, total_count)),
        )
        .highlight_style(highlight_style());

    f.render_stateful_widget(list, area, list_state);
}
