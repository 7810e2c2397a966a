use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::app::{FieldKind, FormState};
use crate::tui::widgets::popup_area;

/// Generic form renderer: one row per text/select field, a taller region for
/// the trailing multiline field when present.
pub fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let popup = popup_area(area, 70, 80);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title.clone());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    // Fixed rows for plain fields, remaining space for a multiline editor
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Multiline => Constraint::Min(4),
            _ => Constraint::Length(2),
        })
        .chain(std::iter::once(Constraint::Length(1)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, (field, row)) in form.fields.iter().zip(rows.iter()).enumerate() {
        let active = index == form.current;
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut lines = vec![Line::from(Span::styled(field.label, label_style))];
        match field.kind {
            FieldKind::Select => {
                let value = field
                    .choices
                    .get(field.choice)
                    .cloned()
                    .unwrap_or_default();
                let marker = if active { "\u{25c2} \u{25b8} " } else { "" };
                lines.push(Line::from(format!("  {}{}", marker, value)));
            }
            FieldKind::Text => {
                lines.push(Line::from(format!("  {}", field.editor.first_line())));
            }
            FieldKind::Multiline => {
                for text_line in field.editor.lines.iter() {
                    lines.push(Line::from(format!("  {}", text_line)));
                }
            }
        }
        f.render_widget(Paragraph::new(lines), *row);

        // Place the terminal cursor inside the active text field
        if active && field.kind != FieldKind::Select {
            let cursor_x = row.x + 2 + field.editor.cursor_col as u16;
            let cursor_y = row.y + 1 + field.editor.cursor_row as u16;
            if cursor_x < row.x + row.width && cursor_y < row.y + row.height {
                f.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    if let Some(hint_row) = rows.last() {
        let hints = Paragraph::new("Tab next field \u{2022} Ctrl+s save \u{2022} Esc cancel")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hints, *hint_row);
    }
}
