use ratatui::layout::{Constraint, Direction, Layout as RatLayout};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::tui::app::{App, Mode, NotesPane, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    confirm_delete::render_confirm_delete,
    dashboard::render_dashboard,
    filter_modal::render_filter_modal,
    filters_box::render_filters_box,
    folder_tree::render_folder_tree,
    form::render_form,
    help::render_help,
    kanban::render_kanban,
    note_view::{render_note_list, render_note_preview, render_versions_modal},
    status_bar::render_status_bar,
    tabs::render_tabs,
    task_view::render_task_view,
    todo_list::render_todo_list,
    vault::{render_credential_list, render_credential_view},
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("TRK")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(outer, f.area());

    render_tabs(f, layout.tabs_area, app.tab);

    match app.tab {
        Tab::Todo => {
            let rows = app.todo_rows();
            let total = app.tasks.len();
            let running = app.timers.running_task_ids().first().copied();
            render_todo_list(
                f,
                layout.sidebar_area,
                &rows,
                total,
                running,
                &mut app.list_state,
            );
            let task = app.selected_todo_task();
            let task_running = task
                .as_ref()
                .and_then(|task| task.id)
                .is_some_and(|id| app.timers.is_running(id));
            render_task_view(f, layout.main_area, task.as_ref(), task_running);
        }
        Tab::Kanban => {
            let columns = app.kanban_columns();
            render_kanban(
                f,
                layout.main_area,
                &columns,
                app.kanban_column,
                app.kanban_index,
            );
        }
        Tab::Dashboard => {
            let data = app.dashboard_data();
            render_dashboard(f, layout.main_area, &data);
        }
        Tab::Notes => {
            let rows = app.folder_rows();
            let folders_focused = app.notes_pane == NotesPane::Folders;
            render_folder_tree(
                f,
                layout.sidebar_area,
                &rows,
                &app.folders,
                &app.notes,
                |id| app.expanded.contains(&id),
                folders_focused,
                &mut app.list_state,
            );

            let panes = RatLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(layout.main_area);
            let notes = app.filtered_notes();
            let mut note_list_state = ratatui::widgets::ListState::default();
            if !notes.is_empty() {
                note_list_state.select(Some(app.note_index.min(notes.len() - 1)));
            }
            render_note_list(
                f,
                panes[0],
                &notes,
                app.notes.len(),
                !folders_focused,
                &mut note_list_state,
            );
            let selected = app.selected_note();
            render_note_preview(f, panes[1], selected.as_ref(), &app.notes, app.preview_scroll);
        }
        Tab::Vault => {
            let credentials = app.filtered_credentials();
            render_credential_list(
                f,
                layout.sidebar_area,
                &credentials,
                app.credentials.len(),
                &mut app.list_state,
            );
            let selected = app.selected_credential();
            render_credential_view(f, layout.main_area, selected.as_ref());
        }
    }

    // Filters box doubles as the live search line
    let summary = if app.mode == Mode::Search {
        format!("Search: {}\u{258f}", app.filter.search)
    } else {
        app.filter.summary()
    };
    render_filters_box(f, layout.filters_area, &summary);

    // Overlays, rendered after the normal content
    if app.mode == Mode::Filter {
        if let Some(ref form) = app.filter_form {
            render_filter_modal(f, f.area(), form, &app.projects, app.known_tags());
        }
    }
    if app.mode == Mode::Form {
        if let Some(ref form) = app.form {
            render_form(f, f.area(), form);
        }
    }
    if app.mode == Mode::Versions {
        if let Some(ref versions) = app.versions {
            render_versions_modal(f, f.area(), versions);
        }
    }
    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config.key_bindings);
    }
    if let Some(ref target) = app.delete_confirmation {
        render_confirm_delete(f, f.area(), target, app.delete_modal_selection);
    }

    let hints = key_hints(app);
    render_status_bar(f, layout.status_area, app.status_message.as_ref(), &hints);
}

fn key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.mode {
        Mode::Search => vec!["Esc: Exit search".to_string()],
        Mode::Filter => vec![
            "Tab: Next field".to_string(),
            "Enter: Apply".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Form => vec![
            "Tab: Next field".to_string(),
            "Ctrl+s: Save".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Versions => vec![
            "Enter: Restore version".to_string(),
            "Esc: Close".to_string(),
        ],
        Mode::Help => vec!["Esc: Close help".to_string()],
        Mode::View => {
            let mut hints = vec![
                format!("{}: Quit", bindings.quit),
                format!("{}: New", bindings.new),
                format!("{}: Edit", bindings.edit),
                format!("{}: Delete", bindings.delete),
                format!("{}: Search", bindings.search),
                format!("{}: Filters", bindings.filter),
            ];
            match app.tab {
                Tab::Todo | Tab::Kanban => {
                    hints.push(format!("{}: Timer", bindings.timer_toggle));
                    if app.tab == Tab::Kanban {
                        hints.push("[ ]: Move card".to_string());
                    }
                }
                Tab::Notes => {
                    hints.push(format!("{}: Versions", bindings.versions));
                    hints.push("Ctrl+arrows: Move folder".to_string());
                }
                _ => {}
            }
            hints.push(format!("{}: Reload", bindings.refresh));
            hints.push(format!("{}: Help", bindings.help));
            hints
        }
    }
}
