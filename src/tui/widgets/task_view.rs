use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::engine::timefmt::format_duration;
use crate::models::Task;
use crate::tui::widgets::priority_color;

/// Detail pane for the selected task in the todo view.
pub fn render_task_view(f: &mut Frame, area: Rect, task: Option<&Task>, running: bool) {
    let Some(task) = task else {
        let empty = Paragraph::new("Select a task to view details")
            .block(Block::default().borders(Borders::ALL).title("Task"))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::raw(task.status.label()),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Gray)),
            Span::styled(
                task.priority.label(),
                Style::default().fg(priority_color(task.priority)),
            ),
        ]),
    ];
    if let Some(ref project) = task.project {
        lines.push(Line::from(vec![
            Span::styled("Project: ", Style::default().fg(Color::Gray)),
            Span::raw(project.clone()),
        ]));
    }
    if let Some(ref due) = task.due_date {
        lines.push(Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Gray)),
            Span::raw(due.clone()),
        ]));
    }
    if let Some(ref created) = task.created_at {
        lines.push(Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Gray)),
            Span::raw(created.clone()),
        ]));
    }
    if let Some(ref completed) = task.completed_at {
        lines.push(Line::from(vec![
            Span::styled("Completed: ", Style::default().fg(Color::Gray)),
            Span::raw(completed.clone()),
        ]));
    }
    let timer_suffix = if running { "  (timer running)" } else { "" };
    lines.push(Line::from(vec![
        Span::styled("Time spent: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}{}", format_duration(task.time_spent), timer_suffix)),
    ]));
    if let Some(ref description) = task.description {
        lines.push(Line::from(""));
        for text_line in description.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Task"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
