use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use ratskin::RatSkin;
use termimad::minimad::Text as MinimadText;

use crate::models::Note;
use crate::tui::app::VersionsState;
use crate::tui::widgets::{format_tags_brackets, highlight_style, popup_area};

pub fn render_note_list(
    f: &mut Frame,
    area: Rect,
    notes: &[Note],
    total_count: usize,
    focused: bool,
    list_state: &mut ListState,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| {
            let mut text = note.title.clone();
            if !note.tags.is_empty() {
                text.push(' ');
                text.push_str(&format_tags_brackets(&note.tags));
            }
            if !note.attachments.is_empty() {
                text.push_str(&format!(" ({} att.)", note.attachments.len()));
            }
            if text.chars().count() > max_width {
                text = text.chars().take(max_width.saturating_sub(3)).collect::<String>() + "...";
            }
            ListItem::new(Line::from(text))
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
                .title(format!("Notes ({}/{})", notes.len(), total_count))
                .border_style(border_style),
        )
        .highlight_style(if focused { highlight_style() } else { Style::default() });

    f.render_stateful_widget(list, area, list_state);
}

/// Markdown preview of the selected note, with its metadata above the
/// content. Markdown parsing is delegated to ratskin.
pub fn render_note_preview(
    f: &mut Frame,
    area: Rect,
    note: Option<&Note>,
    all_notes: &[Note],
    scroll: usize,
) {
    let Some(note) = note else {
        let empty = Paragraph::new("Select a note to preview")
            .block(Block::default().borders(Borders::ALL).title("Preview"))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, area);
        return;
    };

    let mut markdown = format!("# {}\n", note.title);
    if !note.tags.is_empty() {
        markdown.push_str(&format!("\n**Tags:** {}\n", note.tags.join(", ")));
    }
    if let Some(task_id) = note.task_id {
        markdown.push_str(&format!("\n**Linked task:** #{}\n", task_id));
    }
    if !note.linked_note_ids.is_empty() {
        let titles: Vec<String> = note
            .linked_note_ids
            .iter()
            .map(|id| {
                all_notes
                    .iter()
                    .find(|other| other.id == Some(*id))
                    .map(|other| other.title.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect();
        markdown.push_str(&format!("\n**Linked notes:** {}\n", titles.join(", ")));
    }
    if !note.attachments.is_empty() {
        markdown.push_str("\n**Attachments:**\n");
        for attachment in &note.attachments {
            markdown.push_str(&format!(
                "* {} ({} bytes)\n",
                attachment.filename, attachment.size
            ));
        }
    }
    if let Some(ref updated) = note.updated_at {
        markdown.push_str(&format!("\n*Updated: {}*\n", updated));
    }
    if let Some(ref content) = note.content {
        markdown.push_str("\n---\n\n");
        markdown.push_str(content);
    }

    let text_width = area.width.saturating_sub(2);
    let parsed = RatSkin::default().parse(MinimadText::from(markdown.as_str()), text_width);
    let lines: Vec<Line> = parsed
        .into_iter()
        .map(|line| {
            let spans: Vec<Span> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.to_string(), span.style))
                .collect();
            Line::from(spans)
        })
        .collect();

    let viewport_height = area.height.saturating_sub(2) as usize;
    let total_lines = lines.len();
    let scroll = scroll.min(total_lines.saturating_sub(viewport_height));
    let end = (scroll + viewport_height).min(total_lines);
    let visible = Text::from(lines[scroll..end].to_vec());

    let paragraph = Paragraph::new(visible)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

pub fn render_versions_modal(f: &mut Frame, area: Rect, state: &VersionsState) {
    let popup = popup_area(area, 60, 60);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("History of \"{}\"", state.note_title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (index, version) in state.versions.iter().enumerate() {
        let selected = index == state.selected;
        let prefix = if selected { "> " } else { "  " };
        let style = if selected {
            highlight_style()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{}v{}  {}  {}",
                prefix, version.version, version.created_at, version.title
            ),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter restores the selected version, Esc closes",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Versions"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
