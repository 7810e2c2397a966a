use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::models::{Folder, Note};
use crate::tui::app::FolderRow;
use crate::tui::widgets::highlight_style;

pub fn render_folder_tree(
    f: &mut Frame,
    area: Rect,
    rows: &[FolderRow],
    folders: &[Folder],
    notes: &[Note],
    expanded: impl Fn(i64) -> bool,
    focused: bool,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let text = match row {
                FolderRow::All => format!("All Notes ({})", notes.len()),
                FolderRow::Uncategorized => {
                    let count = notes.iter().filter(|note| note.folder_id.is_none()).count();
                    format!("Uncategorized ({})", count)
                }
                FolderRow::Folder { id, depth } => {
                    let folder = folders.iter().find(|folder| folder.id == Some(*id));
                    let name = folder.map(|folder| folder.name.as_str()).unwrap_or("?");
                    let has_children = folders.iter().any(|folder| folder.parent_id == Some(*id));
                    let marker = if !has_children {
                        " "
                    } else if expanded(*id) {
                        "\u{25be}"
                    } else {
                        "\u{25b8}"
                    };
                    let count = notes.iter().filter(|note| note.folder_id == Some(*id)).count();
                    format!("{}{} {} ({})", "  ".repeat(*depth), marker, name, count)
                }
            };
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
                .title("Folders")
                .border_style(border_style),
        )
        .highlight_style(if focused { highlight_style() } else { Style::default() });

    f.render_stateful_widget(list, area, list_state);
}
