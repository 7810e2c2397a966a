use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::DeleteTarget;
use crate::tui::widgets::{highlight_style, popup_area};

pub fn render_confirm_delete(f: &mut Frame, area: Rect, target: &DeleteTarget, selection: usize) {
    let popup = popup_area(area, 50, 35);
    f.render_widget(Clear, popup);

    let (kind, name) = target.describe();

    let mut lines = vec![
        Line::from(format!("Delete this {}?", kind.to_lowercase())),
        Line::from(""),
        Line::from(Span::styled(name, Style::default().fg(Color::White))),
    ];
    if matches!(target, DeleteTarget::Folder(_)) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Its subfolders and notes move up one level.",
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));

    for (index, option) in ["Delete", "Cancel"].iter().enumerate() {
        let selected = index == selection;
        let prefix = if selected { "> " } else { "  " };
        let style = if selected {
            highlight_style()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!("{}{}", prefix, option), style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "\u{2191}\u{2193} select, Enter confirm, Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .title_alignment(Alignment::Center),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
