use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::parse_key_binding;
use crate::tui::app::{App, FieldKind, FolderMove, Mode, NotesPane, Tab, filter_fields};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;

/// Guard that restores the terminal even on panic. A TUI that exits with raw
/// mode or the alternate screen still active leaves the shell unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

const TIMER_TICK: Duration = Duration::from_secs(1);

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // lands in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;
    if width < Layout::MIN_WIDTH + 2 || height < Layout::MIN_HEIGHT + 2 {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small: {}x{}, minimum is {}x{}",
            width,
            height,
            Layout::MIN_WIDTH + 2,
            Layout::MIN_HEIGHT + 2
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut last_tick = Instant::now();

    loop {
        app.check_status_message_timeout();

        // The 1 s display tick is purely local; it patches the running
        // task's seconds without any reload
        if last_tick.elapsed() >= TIMER_TICK {
            app.tick_timers();
            last_tick = Instant::now();
        }

        terminal.draw(|f| {
            let layout = Layout::calculate(
                f.area(),
                app.config.sidebar_width_percent,
                app.tab.has_sidebar(),
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only Press events; Release would double-fire on Windows
                    if key_event.kind == KeyEventKind::Press {
                        if handle_key_event(&mut app, key_event)? {
                            break;
                        }
                    }
                }
                Event::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                _ => {}
            }
        }
    }

    guard.restore()?;
    Ok(())
}

/// True when the key event matches a configured binding string.
fn matches_binding(key_event: &KeyEvent, binding: &str) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key_event.code == parsed.code
                && parsed.requires_ctrl == key_event.modifiers.contains(KeyModifiers::CONTROL)
        }
        Err(_) => false,
    }
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    // The delete confirmation modal swallows everything while open
    if app.delete_confirmation.is_some() {
        handle_delete_confirmation(app, key_event);
        return Ok(false);
    }

    match app.mode {
        Mode::View => handle_view_mode(app, key_event),
        Mode::Search => {
            handle_search_mode(app, key_event);
            Ok(false)
        }
        Mode::Filter => {
            handle_filter_mode(app, key_event);
            Ok(false)
        }
        Mode::Form => {
            handle_form_mode(app, key_event);
            Ok(false)
        }
        Mode::Versions => {
            handle_versions_mode(app, key_event);
            Ok(false)
        }
        Mode::Help => {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.mode = Mode::View;
            }
            Ok(false)
        }
    }
}

fn handle_delete_confirmation(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            app.delete_modal_selection = 1 - app.delete_modal_selection;
        }
        KeyCode::Enter => {
            if app.delete_modal_selection == 0 {
                app.confirm_delete();
            } else {
                app.delete_confirmation = None;
            }
        }
        KeyCode::Esc => {
            app.delete_confirmation = None;
        }
        _ => {}
    }
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let bindings = app.config.key_bindings.clone();
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Folder reordering, only meaningful with the tree pane focused
    if ctrl && app.tab == Tab::Notes && app.notes_pane == NotesPane::Folders {
        match key_event.code {
            KeyCode::Up => {
                app.move_folder(FolderMove::Up);
                return Ok(false);
            }
            KeyCode::Down => {
                app.move_folder(FolderMove::Down);
                return Ok(false);
            }
            KeyCode::Right => {
                app.move_folder(FolderMove::Indent);
                return Ok(false);
            }
            KeyCode::Left => {
                app.move_folder(FolderMove::Outdent);
                return Ok(false);
            }
            _ => {}
        }
    }

    if matches_binding(&key_event, &bindings.quit) {
        return Ok(true);
    }
    if matches_binding(&key_event, &bindings.new) {
        app.create_in_current_tab();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.edit) {
        app.edit_selected();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.delete) {
        app.request_delete();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.search) {
        app.enter_search_mode();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.filter) {
        app.enter_filter_mode();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.refresh) {
        app.reload_all();
        app.reconcile_timers();
        app.set_status_message("Reloaded".to_string());
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.timer_toggle) {
        app.toggle_timer();
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.versions) {
        if app.tab == Tab::Notes && app.notes_pane == NotesPane::Notes {
            app.open_versions();
        }
        return Ok(false);
    }
    if matches_binding(&key_event, &bindings.help) {
        app.mode = Mode::Help;
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            let index = (c as usize) - ('1' as usize);
            app.switch_tab(Tab::ALL[index]);
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Left | KeyCode::Char('h') => match app.tab {
            Tab::Kanban => {
                app.kanban_column = app.kanban_column.saturating_sub(1);
                app.kanban_index = 0;
                app.adjust_selection();
            }
            Tab::Notes => {
                app.notes_pane = NotesPane::Folders;
                app.adjust_selection();
            }
            _ => {}
        },
        KeyCode::Right | KeyCode::Char('l') => match app.tab {
            Tab::Kanban => {
                if app.kanban_column < 2 {
                    app.kanban_column += 1;
                    app.kanban_index = 0;
                    app.adjust_selection();
                }
            }
            Tab::Notes => {
                app.notes_pane = NotesPane::Notes;
                app.adjust_selection();
            }
            _ => {}
        },
        // Shift a kanban card across columns
        KeyCode::Char('[') if app.tab == Tab::Kanban => app.move_selected_task_status(-1),
        KeyCode::Char(']') if app.tab == Tab::Kanban => app.move_selected_task_status(1),
        KeyCode::Enter => {
            if app.tab == Tab::Notes && app.notes_pane == NotesPane::Folders {
                app.toggle_folder_expanded();
            }
        }
        // Drop the oldest attachment of the selected note
        KeyCode::Char('x') if app.tab == Tab::Notes && app.notes_pane == NotesPane::Notes => {
            app.delete_selected_attachment();
        }
        KeyCode::PageUp => {
            app.preview_scroll = app.preview_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            app.preview_scroll += 10;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc | KeyCode::Enter => app.exit_search_mode(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_filter_mode(app: &mut App, key_event: KeyEvent) {
    let Some(current) = app.filter_form.as_ref().map(|form| form.current) else {
        return;
    };

    match key_event.code {
        KeyCode::Esc => {
            app.exit_filter_mode();
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.filter_form.as_mut() {
                form.current = (form.current + 1) % filter_fields::COUNT;
            }
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.filter_form.as_mut() {
                form.current = (form.current + filter_fields::COUNT - 1) % filter_fields::COUNT;
            }
            return;
        }
        KeyCode::Enter => {
            match current {
                filter_fields::APPLY => app.apply_filters(),
                filter_fields::CLEAR => app.clear_filters(),
                filter_fields::CANCEL => app.exit_filter_mode(),
                _ => {
                    if let Some(form) = app.filter_form.as_mut() {
                        form.current = (form.current + 1) % filter_fields::COUNT;
                    }
                }
            }
            return;
        }
        _ => {}
    }

    // Select fields cycle with left/right; text fields edit in place
    match current {
        filter_fields::PRIORITY => {
            if let Some(form) = app.filter_form.as_mut() {
                match key_event.code {
                    KeyCode::Left => form.priority_index = (form.priority_index + 3) % 4,
                    KeyCode::Right | KeyCode::Char(' ') => {
                        form.priority_index = (form.priority_index + 1) % 4
                    }
                    _ => {}
                }
            }
        }
        filter_fields::STATUS => {
            if let Some(form) = app.filter_form.as_mut() {
                match key_event.code {
                    KeyCode::Left => form.status_index = (form.status_index + 3) % 4,
                    KeyCode::Right | KeyCode::Char(' ') => {
                        form.status_index = (form.status_index + 1) % 4
                    }
                    _ => {}
                }
            }
        }
        filter_fields::APPLY | filter_fields::CLEAR | filter_fields::CANCEL => {}
        _ => {
            if let Some(form) = app.filter_form.as_mut() {
                let editor = match current {
                    filter_fields::SEARCH => &mut form.search,
                    filter_fields::PROJECT => &mut form.project,
                    filter_fields::FROM => &mut form.date_from,
                    filter_fields::TO => &mut form.date_to,
                    filter_fields::TAGS => &mut form.tags,
                    _ => return,
                };
                match key_event.code {
                    KeyCode::Char(c) => editor.insert_char(c),
                    KeyCode::Backspace => editor.backspace(),
                    KeyCode::Left => editor.move_left(),
                    KeyCode::Right => editor.move_right(),
                    _ => {}
                }
            }
        }
    }
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    if key_event.code == KeyCode::Esc {
        app.close_form();
        return;
    }
    if ctrl && key_event.code == KeyCode::Char('s') {
        app.save_form();
        return;
    }

    let Some(form) = app.form.as_mut() else { return };
    let field_count = form.fields.len();

    match key_event.code {
        KeyCode::Tab => {
            form.current = (form.current + 1) % field_count;
        }
        KeyCode::BackTab => {
            form.current = (form.current + field_count - 1) % field_count;
        }
        _ => {
            let kind = form.current_field().kind;
            // Enter advances through single-line fields and breaks lines in
            // multiline ones
            if key_event.code == KeyCode::Enter && kind != FieldKind::Multiline {
                form.current = (form.current + 1) % field_count;
                return;
            }
            let field = form.current_field();
            match kind {
                FieldKind::Select => match key_event.code {
                    KeyCode::Left => {
                        let len = field.choices.len().max(1);
                        field.choice = (field.choice + len - 1) % len;
                    }
                    KeyCode::Right | KeyCode::Char(' ') => {
                        let len = field.choices.len().max(1);
                        field.choice = (field.choice + 1) % len;
                    }
                    _ => {}
                },
                FieldKind::Text => match key_event.code {
                    KeyCode::Char(c) => field.editor.insert_char(c),
                    KeyCode::Backspace => field.editor.backspace(),
                    KeyCode::Left => field.editor.move_left(),
                    KeyCode::Right => field.editor.move_right(),
                    _ => {}
                },
                FieldKind::Multiline => match key_event.code {
                    KeyCode::Char(c) => field.editor.insert_char(c),
                    KeyCode::Backspace => field.editor.backspace(),
                    KeyCode::Left => field.editor.move_left(),
                    KeyCode::Right => field.editor.move_right(),
                    KeyCode::Up => field.editor.move_up(),
                    KeyCode::Down => field.editor.move_down(),
                    KeyCode::Enter => field.editor.insert_newline(),
                    _ => {}
                },
            }
        }
    }
}

fn handle_versions_mode(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.close_versions(),
        KeyCode::Up => {
            if let Some(state) = app.versions.as_mut() {
                state.selected = state.selected.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if let Some(state) = app.versions.as_mut() {
                if state.selected + 1 < state.versions.len() {
                    state.selected += 1;
                }
            }
        }
        KeyCode::Enter => app.restore_selected_version(),
        _ => {}
    }
}
