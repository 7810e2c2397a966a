use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::engine::timefmt::format_duration;
use crate::models::{Status, Task};
use crate::tui::widgets::{highlight_style, priority_color};

pub fn render_kanban(
    f: &mut Frame,
    area: Rect,
    columns: &[Vec<Task>; 3],
    active_column: usize,
    active_index: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (column, (tasks, chunk)) in columns.iter().zip(chunks.iter()).enumerate() {
        let title = format!("{} ({})", Status::ALL[column].label(), tasks.len());
        let focused = column == active_column;

        let items: Vec<ListItem> = tasks
            .iter()
            .map(|task| {
                let mut spans = vec![Span::styled(
                    task.title.clone(),
                    Style::default().fg(priority_color(task.priority)),
                )];
                if let Some(ref project) = task.project {
                    spans.push(Span::styled(
                        format!("  {}", project),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if task.time_spent > 0 {
                    spans.push(Span::styled(
                        format!("  {}", format_duration(task.time_spent)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            )
            .highlight_style(if focused { highlight_style() } else { Style::default() });

        let mut state = ListState::default();
        if focused && !tasks.is_empty() {
            state.select(Some(active_index.min(tasks.len() - 1)));
        }
        f.render_stateful_widget(list, *chunk, &mut state);
    }
}
