use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::models::{Priority, Status};
use crate::tui::app::{filter_fields, FilterFormState};
use crate::tui::widgets::popup_area;

pub fn render_filter_modal(
    f: &mut Frame,
    area: Rect,
    form: &FilterFormState,
    known_projects: &[String],
    known_tags: &[String],
) {
    let popup = popup_area(area, 60, 70);
    f.render_widget(Clear, popup);

    let label_style = |index: usize| {
        if index == form.current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let priority_label = match form.priority_index {
        0 => "Any",
        index => Priority::ALL
            .get(index - 1)
            .map(|priority| priority.label())
            .unwrap_or("Any"),
    };
    let status_label = match form.status_index {
        0 => "Any",
        index => Status::ALL
            .get(index - 1)
            .map(|status| status.label())
            .unwrap_or("Any"),
    };

    let text_row = |index: usize, label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), label_style(index)),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![
        text_row(filter_fields::SEARCH, "Search", form.search.first_line()),
        text_row(filter_fields::PROJECT, "Project", form.project.first_line()),
        text_row(filter_fields::PRIORITY, "Priority", priority_label),
        text_row(filter_fields::STATUS, "Status", status_label),
        text_row(filter_fields::FROM, "From (YYYY-MM-DD)", form.date_from.first_line()),
        text_row(filter_fields::TO, "To (YYYY-MM-DD)", form.date_to.first_line()),
        text_row(filter_fields::TAGS, "Tags", form.tags.first_line()),
        Line::from(""),
    ];

    let button = |index: usize, label: &str| {
        let style = if index == form.current {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!("[ {} ]", label), style)
    };
    lines.push(Line::from(vec![
        button(filter_fields::APPLY, "Apply"),
        Span::raw("  "),
        button(filter_fields::CLEAR, "Clear"),
        Span::raw("  "),
        button(filter_fields::CANCEL, "Cancel"),
    ]));
    lines.push(Line::from(""));

    // Server-known vocabulary for the field being edited
    if form.current == filter_fields::PROJECT && !known_projects.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Projects: {}", known_projects.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if form.current == filter_fields::TAGS && !known_tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tags: {}", known_tags.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(Span::styled(
        "Tab moves, \u{2190}\u{2192} cycle choices, Enter applies",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    f.render_widget(paragraph, popup);
}
