use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::config::KeyBindings;
use crate::tui::widgets::popup_area;

pub fn render_help(f: &mut Frame, area: Rect, bindings: &KeyBindings) {
    let popup = popup_area(area, 60, 75);
    f.render_widget(Clear, popup);

    let entry = |key: &str, action: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Cyan)),
            Span::raw(action.to_string()),
        ])
    };
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("General"),
        entry(&bindings.quit, "Quit"),
        entry("1-5 / Tab", "Switch tab"),
        entry("\u{2191}\u{2193} / j k", "Move selection"),
        entry(&bindings.new, "New item"),
        entry(&bindings.edit, "Edit selected"),
        entry(&bindings.delete, "Delete selected"),
        entry(&bindings.search, "Search"),
        entry(&bindings.filter, "Filters"),
        entry(&bindings.refresh, "Reload from server"),
        Line::from(""),
        heading("Tasks"),
        entry(&bindings.timer_toggle, "Start/stop timer"),
        entry("[ ]", "Move kanban card across columns"),
        Line::from(""),
        heading("Notes"),
        entry("\u{2190}\u{2192} / h l", "Switch folder/note pane"),
        entry("Enter", "Expand/collapse folder"),
        entry("Ctrl+\u{2191}\u{2193}", "Reorder folder among siblings"),
        entry("Ctrl+\u{2192}\u{2190}", "Nest under / lift out of a folder"),
        entry(&bindings.versions, "Note version history"),
        entry("x", "Delete oldest attachment"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(paragraph, popup);
}
