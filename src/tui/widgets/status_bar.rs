use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
) {
    let max_width = area.width as usize;

    let (mut content, style) = if let Some(message) = message {
        (
            message.clone(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        // Fit as many hints as the width allows, dropping the rest
        let separator = " \u{2022} ";
        let mut text = String::new();
        for (i, hint) in key_hints.iter().enumerate() {
            let addition = if i == 0 { hint.chars().count() } else { separator.chars().count() + hint.chars().count() };
            if text.chars().count() + addition > max_width {
                break;
            }
            if i > 0 {
                text.push_str(separator);
            }
            text.push_str(hint);
        }
        (text, Style::default().fg(Color::Gray))
    };

    if content.chars().count() > max_width {
        content = content.chars().take(max_width.saturating_sub(3)).collect::<String>() + "...";
    }

    f.render_widget(Paragraph::new(content).style(style), area);
}
