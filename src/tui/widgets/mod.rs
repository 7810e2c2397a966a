pub mod confirm_delete;
pub mod dashboard;
pub mod editor;
pub mod filter_modal;
pub mod filters_box;
pub mod folder_tree;
pub mod form;
pub mod help;
pub mod kanban;
pub mod note_view;
pub mod status_bar;
pub mod tabs;
pub mod task_view;
pub mod todo_list;
pub mod vault;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::models::Priority;

/// Centered popup rect taking the given percentages of the frame.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Shared priority color coding: red high, yellow medium, green low.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn highlight_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

pub fn format_tags_brackets(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("[{}]", tag))
        .collect::<Vec<_>>()
        .join(" ")
}
