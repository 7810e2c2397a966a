use std::collections::HashSet;
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use ratatui::widgets::ListState;

use crate::backend::Backend;
use crate::config::Config;
use crate::engine::dashboard::{
    aggregate_by_day_and_priority, resolve_date_range, series, summarize, SummaryStats,
};
use crate::engine::filter::{
    filter_credentials, filter_notes, filter_tasks, DateField, FilterCriteria, FolderScope,
};
use crate::engine::folders::{plan_delete, plan_move, visible_nodes, DropZone, MoveError};
use crate::engine::grouping::group_by_due_bucket;
use crate::engine::timefmt::parse_calendar_date;
use crate::engine::timer::TimerEngine;
use crate::models::{
    Credential, Folder, Note, NoteVersion, Priority, Status, Task,
};
use crate::tui::widgets::editor::Editor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Todo,
    Kanban,
    Dashboard,
    Notes,
    Vault,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Todo, Tab::Kanban, Tab::Dashboard, Tab::Notes, Tab::Vault];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Todo => "Todo",
            Tab::Kanban => "Kanban",
            Tab::Dashboard => "Dashboard",
            Tab::Notes => "Notes",
            Tab::Vault => "Vault",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    /// Tabs with a sidebar list next to the main pane.
    pub fn has_sidebar(&self) -> bool {
        matches!(self, Tab::Todo | Tab::Notes | Tab::Vault)
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        match name {
            "todo" => Some(Tab::Todo),
            "kanban" => Some(Tab::Kanban),
            "dashboard" => Some(Tab::Dashboard),
            "notes" => Some(Tab::Notes),
            "vault" => Some(Tab::Vault),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Filter,
    Form,
    Versions,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesPane {
    Folders,
    Notes,
}

/// One row of the grouped todo list: a bucket heading or a task under it.
#[derive(Debug, Clone)]
pub enum TodoRow {
    Header { label: String, count: usize },
    Task(Task),
}

#[derive(Debug, Clone)]
pub enum FolderRow {
    All,
    Uncategorized,
    Folder { id: i64, depth: usize },
}

#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Task(Task),
    Note(Note),
    Folder(Folder),
    Credential(Credential),
}

impl DeleteTarget {
    pub fn describe(&self) -> (&'static str, String) {
        match self {
            DeleteTarget::Task(task) => ("Task", task.title.clone()),
            DeleteTarget::Note(note) => ("Note", note.title.clone()),
            DeleteTarget::Folder(folder) => ("Folder", folder.name.clone()),
            DeleteTarget::Credential(credential) => ("Credential", credential.title.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Task,
    Note,
    Credential,
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Select,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub editor: Editor,
    pub choices: Vec<String>,
    pub choice: usize,
}

impl FormField {
    fn text(label: &'static str, value: String) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            editor: Editor::from_string(value),
            choices: Vec::new(),
            choice: 0,
        }
    }

    fn multiline(label: &'static str, value: String) -> Self {
        Self {
            label,
            kind: FieldKind::Multiline,
            editor: Editor::from_string(value),
            choices: Vec::new(),
            choice: 0,
        }
    }

    fn select(label: &'static str, choices: Vec<String>, choice: usize) -> Self {
        Self {
            label,
            kind: FieldKind::Select,
            editor: Editor::new(),
            choices,
            choice,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub current: usize,
    pub editing_id: Option<i64>,
    /// Parallel to the folder select's choices for note forms.
    pub folder_ids: Vec<Option<i64>>,
    /// Parent preselected when creating a subfolder.
    pub folder_parent: Option<i64>,
}

impl FormState {
    pub fn current_field(&mut self) -> &mut FormField {
        let index = self.current.min(self.fields.len().saturating_sub(1));
        &mut self.fields[index]
    }

    fn text_of(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|field| field.editor.text().trim().to_string())
            .unwrap_or_default()
    }

    fn optional_text(&self, index: usize) -> Option<String> {
        let text = self.text_of(index);
        if text.is_empty() { None } else { Some(text) }
    }

    fn choice_of(&self, index: usize) -> usize {
        self.fields.get(index).map(|field| field.choice).unwrap_or(0)
    }
}

// Field order inside the task form; keep in sync with open_task_form.
mod task_fields {
    pub const TITLE: usize = 0;
    pub const DESCRIPTION: usize = 1;
    pub const STATUS: usize = 2;
    pub const PRIORITY: usize = 3;
    pub const PROJECT: usize = 4;
    pub const DUE_DATE: usize = 5;
    pub const CREATED: usize = 6;
    pub const TIME_SPENT: usize = 7;
}

mod note_fields {
    pub const TITLE: usize = 0;
    pub const TAGS: usize = 1;
    pub const FOLDER: usize = 2;
    pub const TASK_ID: usize = 3;
    pub const CONTENT: usize = 4;
}

mod credential_fields {
    pub const TITLE: usize = 0;
    pub const PROJECT: usize = 1;
    pub const HOST: usize = 2;
    pub const USERNAME: usize = 3;
    pub const PASSWORD: usize = 4;
    pub const COST_USD: usize = 5;
    pub const COST_EUR: usize = 6;
    pub const TAGS: usize = 7;
    pub const NOTES: usize = 8;
}

#[derive(Debug, Clone)]
pub struct FilterFormState {
    pub current: usize,
    pub search: Editor,
    pub project: Editor,
    pub priority_index: usize, // 0 = any
    pub status_index: usize,   // 0 = any
    pub date_from: Editor,
    pub date_to: Editor,
    pub tags: Editor,
}

pub mod filter_fields {
    pub const SEARCH: usize = 0;
    pub const PROJECT: usize = 1;
    pub const PRIORITY: usize = 2;
    pub const STATUS: usize = 3;
    pub const FROM: usize = 4;
    pub const TO: usize = 5;
    pub const TAGS: usize = 6;
    pub const APPLY: usize = 7;
    pub const CLEAR: usize = 8;
    pub const CANCEL: usize = 9;
    pub const COUNT: usize = 10;
}

#[derive(Debug, Clone)]
pub struct VersionsState {
    pub note_id: i64,
    pub note_title: String,
    pub versions: Vec<NoteVersion>,
    pub selected: usize,
}

#[derive(Debug)]
pub struct DashboardData {
    pub stats: SummaryStats,
    pub dates: Vec<NaiveDate>,
    pub created: [Vec<u64>; 3],
    pub completed: [Vec<u64>; 3],
}

/// Direction of a keyboard-driven folder move; each maps to a drop zone
/// against a concrete target folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderMove {
    Up,
    Down,
    Indent,
    Outdent,
}

/// Explicit state container for the whole client. Engines receive snapshots
/// as parameters; nothing closes over globals.
pub struct App {
    pub config: Config,
    pub backend: Backend,

    // Server snapshot
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub credentials: Vec<Credential>,
    pub projects: Vec<String>,
    pub note_tags: Vec<String>,
    pub credential_tags: Vec<String>,

    // Timer state
    pub timers: TimerEngine,

    // View state
    pub tab: Tab,
    pub mode: Mode,
    pub todo_index: usize,
    pub kanban_column: usize,
    pub kanban_index: usize,
    pub notes_pane: NotesPane,
    pub folder_index: usize,
    pub note_index: usize,
    pub cred_index: usize,
    pub preview_scroll: usize,
    pub list_state: ListState,
    pub expanded: HashSet<i64>,

    // Filters
    pub filter: FilterCriteria,
    pub filter_form: Option<FilterFormState>,

    // Modals and forms
    pub form: Option<FormState>,
    pub delete_confirmation: Option<DeleteTarget>,
    pub delete_modal_selection: usize,
    pub versions: Option<VersionsState>,

    // Status line
    pub status_message: Option<String>,
    pub message_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, backend: Backend) -> Self {
        let tab = Tab::from_name(&config.default_tab).unwrap_or(Tab::Todo);
        let mut app = Self {
            config,
            backend,
            tasks: Vec::new(),
            notes: Vec::new(),
            folders: Vec::new(),
            credentials: Vec::new(),
            projects: Vec::new(),
            note_tags: Vec::new(),
            credential_tags: Vec::new(),
            timers: TimerEngine::new(),
            tab,
            mode: Mode::View,
            todo_index: 0,
            kanban_column: 0,
            kanban_index: 0,
            notes_pane: NotesPane::Folders,
            folder_index: 0,
            note_index: 0,
            cred_index: 0,
            preview_scroll: 0,
            list_state: ListState::default(),
            expanded: HashSet::new(),
            filter: FilterCriteria::default(),
            filter_form: None,
            form: None,
            delete_confirmation: None,
            delete_modal_selection: 0,
            versions: None,
            status_message: None,
            message_time: None,
        };
        app.reload_all();
        app.reconcile_timers();
        app.adjust_selection();
        app
    }

    // --- loading (read policy: failures keep prior state) ---

    pub fn load_tasks(&mut self) {
        match self.backend.list_tasks() {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tasks");
                self.set_status_message(format!("Failed to load tasks: {}", e));
            }
        }
    }

    pub fn load_notes(&mut self) {
        match self.backend.list_notes() {
            Ok(notes) => self.notes = notes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load notes");
                self.set_status_message(format!("Failed to load notes: {}", e));
            }
        }
    }

    pub fn load_folders(&mut self) {
        match self.backend.list_folders() {
            Ok(folders) => self.folders = folders,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load folders");
                self.set_status_message(format!("Failed to load folders: {}", e));
            }
        }
    }

    pub fn load_credentials(&mut self) {
        match self.backend.list_credentials() {
            Ok(credentials) => self.credentials = credentials,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load credentials");
                self.set_status_message(format!("Failed to load credentials: {}", e));
            }
        }
    }

    pub fn load_projects(&mut self) {
        match self.backend.list_projects() {
            Ok(projects) => self.projects = projects,
            Err(e) => tracing::warn!(error = %e, "failed to load project labels"),
        }
    }

    /// Distinct tag lists feed the filter modal hints.
    pub fn load_tags(&mut self) {
        match self.backend.list_note_tags() {
            Ok(tags) => self.note_tags = tags,
            Err(e) => tracing::warn!(error = %e, "failed to load note tags"),
        }
        match self.backend.list_credential_tags() {
            Ok(tags) => self.credential_tags = tags,
            Err(e) => tracing::warn!(error = %e, "failed to load credential tags"),
        }
    }

    pub fn reload_all(&mut self) {
        self.load_tasks();
        self.load_notes();
        self.load_folders();
        self.load_credentials();
        self.load_projects();
        self.load_tags();
        self.adjust_selection();
    }

    /// Tag vocabulary relevant to the active tab.
    pub fn known_tags(&self) -> &[String] {
        match self.tab {
            Tab::Notes => &self.note_tags,
            Tab::Vault => &self.credential_tags,
            _ => &[],
        }
    }

    // --- status line ---

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.message_time = None;
    }

    /// Auto-clear the status message after a few seconds.
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;
        if let Some(time) = self.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    // --- derived views ---

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn todo_rows(&self) -> Vec<TodoRow> {
        let filtered = filter_tasks(&self.tasks, &self.filter);
        let mut rows = Vec::new();
        for (bucket, tasks) in group_by_due_bucket(&filtered, Self::today()) {
            rows.push(TodoRow::Header {
                label: bucket.label(),
                count: tasks.len(),
            });
            rows.extend(tasks.into_iter().map(TodoRow::Task));
        }
        rows
    }

    pub fn selected_todo_task(&self) -> Option<Task> {
        match self.todo_rows().get(self.todo_index) {
            Some(TodoRow::Task(task)) => Some(task.clone()),
            _ => None,
        }
    }

    pub fn kanban_columns(&self) -> [Vec<Task>; 3] {
        let filtered = filter_tasks(&self.tasks, &self.filter);
        let mut columns: [Vec<Task>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for task in filtered {
            let column = match task.status {
                Status::Todo => 0,
                Status::InProgress => 1,
                Status::Done => 2,
            };
            columns[column].push(task);
        }
        columns
    }

    pub fn selected_kanban_task(&self) -> Option<Task> {
        let columns = self.kanban_columns();
        columns
            .get(self.kanban_column)?
            .get(self.kanban_index)
            .cloned()
    }

    pub fn folder_rows(&self) -> Vec<FolderRow> {
        let mut rows = vec![FolderRow::All, FolderRow::Uncategorized];
        rows.extend(
            visible_nodes(&self.folders, &self.expanded)
                .into_iter()
                .map(|(id, depth)| FolderRow::Folder { id, depth }),
        );
        rows
    }

    pub fn selected_folder_id(&self) -> Option<i64> {
        match self.folder_rows().get(self.folder_index) {
            Some(FolderRow::Folder { id, .. }) => Some(*id),
            _ => None,
        }
    }

    pub fn folder_by_id(&self, id: i64) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == Some(id))
    }

    /// Keep the notes filter's folder scope in line with the tree selection.
    pub fn sync_folder_scope(&mut self) {
        self.filter.folder_scope = match self.folder_rows().get(self.folder_index) {
            Some(FolderRow::Uncategorized) => FolderScope::Uncategorized,
            Some(FolderRow::Folder { id, .. }) => FolderScope::Folder(*id),
            _ => FolderScope::All,
        };
    }

    pub fn filtered_notes(&self) -> Vec<Note> {
        filter_notes(&self.notes, &self.filter)
    }

    pub fn selected_note(&self) -> Option<Note> {
        self.filtered_notes().get(self.note_index).cloned()
    }

    pub fn filtered_credentials(&self) -> Vec<Credential> {
        filter_credentials(&self.credentials, &self.filter)
    }

    pub fn selected_credential(&self) -> Option<Credential> {
        self.filtered_credentials().get(self.cred_index).cloned()
    }

    /// Task selected in whichever task view is active.
    pub fn selected_task(&self) -> Option<Task> {
        match self.tab {
            Tab::Todo => self.selected_todo_task(),
            Tab::Kanban => self.selected_kanban_task(),
            _ => None,
        }
    }

    pub fn dashboard_data(&self) -> DashboardData {
        let mut criteria = self.filter.clone();
        criteria.date_field = DateField::Created;
        let filtered = filter_tasks(&self.tasks, &criteria);

        let today = Self::today();
        let stats = summarize(&filtered, today);
        let dates = resolve_date_range(
            criteria.date_from.as_deref(),
            criteria.date_to.as_deref(),
            today,
        );
        let created_counts = aggregate_by_day_and_priority(&filtered, DateField::Created);
        let completed_counts = aggregate_by_day_and_priority(&filtered, DateField::Completed);
        let by_priority = |counts: &[crate::engine::dashboard::DailyCount]| {
            [
                series(counts, &dates, Priority::High),
                series(counts, &dates, Priority::Medium),
                series(counts, &dates, Priority::Low),
            ]
        };
        DashboardData {
            stats,
            created: by_priority(&created_counts),
            completed: by_priority(&completed_counts),
            dates,
        }
    }

    // --- selection handling ---

    pub fn adjust_selection(&mut self) {
        match self.tab {
            Tab::Todo => {
                let rows = self.todo_rows();
                if rows.is_empty() {
                    self.todo_index = 0;
                } else {
                    self.todo_index = self.todo_index.min(rows.len() - 1);
                    // Never rest on a heading row
                    if matches!(rows[self.todo_index], TodoRow::Header { .. }) {
                        if let Some(next) = rows
                            .iter()
                            .enumerate()
                            .skip(self.todo_index)
                            .find(|(_, row)| matches!(row, TodoRow::Task(_)))
                            .map(|(index, _)| index)
                        {
                            self.todo_index = next;
                        } else if let Some(prev) = rows
                            .iter()
                            .enumerate()
                            .take(self.todo_index)
                            .rev()
                            .find(|(_, row)| matches!(row, TodoRow::Task(_)))
                            .map(|(index, _)| index)
                        {
                            self.todo_index = prev;
                        }
                    }
                }
                self.list_state.select(Some(self.todo_index));
            }
            Tab::Kanban => {
                let columns = self.kanban_columns();
                self.kanban_column = self.kanban_column.min(2);
                let len = columns[self.kanban_column].len();
                self.kanban_index = if len == 0 { 0 } else { self.kanban_index.min(len - 1) };
            }
            Tab::Notes => {
                let rows = self.folder_rows();
                self.folder_index = self.folder_index.min(rows.len().saturating_sub(1));
                self.sync_folder_scope();
                let notes = self.filtered_notes();
                self.note_index = self.note_index.min(notes.len().saturating_sub(1));
                match self.notes_pane {
                    NotesPane::Folders => self.list_state.select(Some(self.folder_index)),
                    NotesPane::Notes => self.list_state.select(Some(self.note_index)),
                }
            }
            Tab::Vault => {
                let credentials = self.filtered_credentials();
                self.cred_index = self.cred_index.min(credentials.len().saturating_sub(1));
                self.list_state.select(Some(self.cred_index));
            }
            Tab::Dashboard => {}
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.preview_scroll = 0;
        self.adjust_selection();
    }

    pub fn next_tab(&mut self) {
        let next = (self.tab.index() + 1) % Tab::ALL.len();
        self.switch_tab(Tab::ALL[next]);
    }

    pub fn prev_tab(&mut self) {
        let prev = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.switch_tab(Tab::ALL[prev]);
    }

    pub fn move_selection_up(&mut self) {
        match self.tab {
            Tab::Todo => {
                let rows = self.todo_rows();
                let mut index = self.todo_index;
                while index > 0 {
                    index -= 1;
                    if matches!(rows.get(index), Some(TodoRow::Task(_))) {
                        self.todo_index = index;
                        break;
                    }
                }
                self.list_state.select(Some(self.todo_index));
            }
            Tab::Kanban => {
                self.kanban_index = self.kanban_index.saturating_sub(1);
            }
            Tab::Notes => match self.notes_pane {
                NotesPane::Folders => {
                    self.folder_index = self.folder_index.saturating_sub(1);
                    self.sync_folder_scope();
                    self.note_index = 0;
                    self.list_state.select(Some(self.folder_index));
                }
                NotesPane::Notes => {
                    self.note_index = self.note_index.saturating_sub(1);
                    self.preview_scroll = 0;
                    self.list_state.select(Some(self.note_index));
                }
            },
            Tab::Vault => {
                self.cred_index = self.cred_index.saturating_sub(1);
                self.list_state.select(Some(self.cred_index));
            }
            Tab::Dashboard => {}
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.tab {
            Tab::Todo => {
                let rows = self.todo_rows();
                let mut index = self.todo_index;
                while index + 1 < rows.len() {
                    index += 1;
                    if matches!(rows.get(index), Some(TodoRow::Task(_))) {
                        self.todo_index = index;
                        break;
                    }
                }
                self.list_state.select(Some(self.todo_index));
            }
            Tab::Kanban => {
                let columns = self.kanban_columns();
                let len = columns[self.kanban_column].len();
                if self.kanban_index + 1 < len {
                    self.kanban_index += 1;
                }
            }
            Tab::Notes => match self.notes_pane {
                NotesPane::Folders => {
                    let rows = self.folder_rows();
                    if self.folder_index + 1 < rows.len() {
                        self.folder_index += 1;
                    }
                    self.sync_folder_scope();
                    self.note_index = 0;
                    self.list_state.select(Some(self.folder_index));
                }
                NotesPane::Notes => {
                    let notes = self.filtered_notes();
                    if self.note_index + 1 < notes.len() {
                        self.note_index += 1;
                    }
                    self.preview_scroll = 0;
                    self.list_state.select(Some(self.note_index));
                }
            },
            Tab::Vault => {
                let credentials = self.filtered_credentials();
                if self.cred_index + 1 < credentials.len() {
                    self.cred_index += 1;
                }
                self.list_state.select(Some(self.cred_index));
            }
            Tab::Dashboard => {}
        }
    }

    // --- timers ---

    /// Start the timer on a task, stopping any other running timer first.
    /// The stop's round trip completes before the start is issued, so the
    /// server never sees two timers running.
    pub fn start_timer(&mut self, task_id: i64) {
        for other in self.timers.running_task_ids() {
            if other != task_id {
                self.stop_timer(other, true);
            }
        }
        if self.timers.is_running(task_id) {
            return;
        }
        // A task that vanished from the snapshot aborts silently
        let Some(base) = self
            .tasks
            .iter()
            .find(|task| task.id == Some(task_id))
            .map(|task| task.time_spent)
        else {
            return;
        };
        match self.backend.start_timer(task_id) {
            Ok(()) => {
                self.timers.begin(task_id, base, Utc::now());
                self.load_tasks();
                self.set_status_message("Timer started".to_string());
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "failed to start timer");
                self.set_status_message(format!("Failed to start timer: {}", e));
            }
        }
    }

    /// Stop a task's timer. Local state is cleared whether or not the server
    /// call succeeds; reload reconciliation corrects any drift a failed stop
    /// leaves behind.
    pub fn stop_timer(&mut self, task_id: i64, forced: bool) {
        let total = self.timers.finish(task_id, Utc::now());
        if let (Some(total), Some(task)) = (
            total,
            self.tasks.iter_mut().find(|task| task.id == Some(task_id)),
        ) {
            task.time_spent = total;
        }
        match self.backend.stop_timer(task_id) {
            Ok(()) => {
                if !forced {
                    self.load_tasks();
                    self.set_status_message("Timer stopped".to_string());
                }
            }
            Err(e) => {
                tracing::warn!(task_id, forced, error = %e, "failed to stop timer");
                self.set_status_message(format!("Failed to stop timer: {}", e));
            }
        }
    }

    pub fn toggle_timer(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let Some(task_id) = task.id else { return };
        if self.timers.is_running(task_id) {
            self.stop_timer(task_id, false);
        } else {
            self.start_timer(task_id);
        }
    }

    /// 1 s display tick: recompute the running task's seconds from its
    /// anchor. Purely local; a task deleted mid-session drops its anchor
    /// here so no tick outlives its task.
    pub fn tick_timers(&mut self) {
        let now = Utc::now();
        for task_id in self.timers.running_task_ids() {
            let seconds = self.timers.display_seconds(task_id, now);
            match (
                seconds,
                self.tasks.iter_mut().find(|task| task.id == Some(task_id)),
            ) {
                (Some(seconds), Some(task)) => task.time_spent = seconds,
                _ => self.timers.discard(task_id),
            }
        }
    }

    /// Rebuild timer sessions from the server after startup.
    pub fn reconcile_timers(&mut self) {
        match self.backend.active_timers() {
            Ok(active) => {
                self.timers.reconcile(&active);
                if self.timers.any_running() {
                    self.tick_timers();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to list active timers");
                self.set_status_message(format!("Failed to load active timers: {}", e));
            }
        }
    }

    // --- kanban status moves ---

    /// Shift the selected kanban card one column left or right and persist
    /// the status change.
    pub fn move_selected_task_status(&mut self, delta: i32) {
        let Some(mut task) = self.selected_kanban_task() else {
            return;
        };
        let Some(task_id) = task.id else { return };
        let column = match task.status {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        };
        let target = column + delta;
        let new_status = match target {
            0 => Status::Todo,
            1 => Status::InProgress,
            2 => Status::Done,
            _ => return,
        };
        if new_status == task.status {
            return;
        }
        task.status = new_status;
        match self.backend.update_task(task_id, &task) {
            Ok(()) => {
                self.load_tasks();
                self.kanban_column = target as usize;
                self.kanban_index = 0;
                self.adjust_selection();
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "failed to update task status");
                self.set_status_message(format!("Failed to move task: {}", e));
            }
        }
    }

    // --- folder tree operations ---

    pub fn toggle_folder_expanded(&mut self) {
        let Some(id) = self.selected_folder_id() else {
            return;
        };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.adjust_selection();
    }

    /// Keyboard reorder: each direction resolves to a drop zone against a
    /// concrete sibling, then the planned renumbering goes out as one batch.
    pub fn move_folder(&mut self, direction: FolderMove) {
        let Some(moved_id) = self.selected_folder_id() else {
            return;
        };
        let Some(moved) = self.folder_by_id(moved_id).cloned() else {
            return;
        };
        let siblings: Vec<i64> =
            crate::engine::folders::children_of(&self.folders, moved.parent_id)
                .iter()
                .filter_map(|folder| folder.id)
                .collect();
        let position = siblings.iter().position(|&id| id == moved_id);

        let (target, zone) = match direction {
            FolderMove::Up => {
                let Some(position) = position else { return };
                if position == 0 {
                    return;
                }
                (siblings[position - 1], DropZone::Before)
            }
            FolderMove::Down => {
                let Some(position) = position else { return };
                if position + 1 >= siblings.len() {
                    return;
                }
                (siblings[position + 1], DropZone::After)
            }
            FolderMove::Indent => {
                let Some(position) = position else { return };
                if position == 0 {
                    return;
                }
                (siblings[position - 1], DropZone::Inside)
            }
            FolderMove::Outdent => {
                let Some(parent_id) = moved.parent_id else {
                    return;
                };
                (parent_id, DropZone::After)
            }
        };

        match plan_move(&self.folders, moved_id, target, zone) {
            Ok(rows) => match self.backend.update_folder_positions(&rows) {
                Ok(()) => {
                    if zone == DropZone::Inside {
                        self.expanded.insert(target);
                    }
                    self.load_folders();
                    self.select_folder(moved_id);
                }
                Err(e) => {
                    tracing::warn!(moved_id, error = %e, "failed to persist folder order");
                    self.set_status_message(format!("Failed to move folder: {}", e));
                }
            },
            Err(MoveError::WouldCycle) => {
                self.set_status_message("Cannot move a folder into its own subtree".to_string());
            }
            Err(MoveError::NotFound) => {}
        }
    }

    fn select_folder(&mut self, id: i64) {
        if let Some(index) = self.folder_rows().iter().position(
            |row| matches!(row, FolderRow::Folder { id: row_id, .. } if *row_id == id),
        ) {
            self.folder_index = index;
        }
        self.adjust_selection();
    }

    // --- forms ---

    pub fn open_task_form(&mut self, existing: Option<Task>) {
        let editing_id = existing.as_ref().and_then(|task| task.id);
        let task = existing.unwrap_or_else(|| Task::new(String::new()));
        let status_choices: Vec<String> =
            Status::ALL.iter().map(|status| status.label().to_string()).collect();
        let priority_choices: Vec<String> =
            Priority::ALL.iter().map(|priority| priority.label().to_string()).collect();
        let status_index = Status::ALL.iter().position(|s| *s == task.status).unwrap_or(0);
        let priority_index = Priority::ALL
            .iter()
            .position(|p| *p == task.priority)
            .unwrap_or(1);

        self.form = Some(FormState {
            kind: FormKind::Task,
            title: if editing_id.is_some() { "Edit Task" } else { "New Task" }.to_string(),
            fields: vec![
                FormField::text("Title", task.title.clone()),
                FormField::multiline("Description", task.description.clone().unwrap_or_default()),
                FormField::select("Status", status_choices, status_index),
                FormField::select("Priority", priority_choices, priority_index),
                FormField::text("Project", task.project.clone().unwrap_or_default()),
                FormField::text("Due date (YYYY-MM-DD)", task.due_date.clone().unwrap_or_default()),
                FormField::text(
                    "Created (YYYY-MM-DD)",
                    task.created_at
                        .as_deref()
                        .and_then(crate::engine::timefmt::date_part)
                        .unwrap_or_default()
                        .to_string(),
                ),
                FormField::text(
                    "Time spent (HH:MM:SS or seconds)",
                    crate::engine::timefmt::format_duration(task.time_spent),
                ),
            ],
            current: 0,
            editing_id,
            folder_ids: Vec::new(),
            folder_parent: None,
        });
        self.mode = Mode::Form;
    }

    pub fn open_note_form(&mut self, existing: Option<Note>) {
        let editing_id = existing.as_ref().and_then(|note| note.id);
        let note = existing.unwrap_or_else(|| {
            let mut fresh = Note::new(String::new());
            fresh.folder_id = self.selected_folder_id();
            fresh
        });

        // "[None]" plus every folder, indented to its depth in the tree
        let mut folder_ids: Vec<Option<i64>> = vec![None];
        let mut folder_choices: Vec<String> = vec!["[None]".to_string()];
        let all_expanded: HashSet<i64> =
            self.folders.iter().filter_map(|folder| folder.id).collect();
        for (id, depth) in visible_nodes(&self.folders, &all_expanded) {
            if let Some(folder) = self.folder_by_id(id) {
                folder_ids.push(Some(id));
                folder_choices.push(format!("{}{}", "  ".repeat(depth), folder.name));
            }
        }
        let folder_choice = folder_ids
            .iter()
            .position(|id| *id == note.folder_id)
            .unwrap_or(0);

        self.form = Some(FormState {
            kind: FormKind::Note,
            title: if editing_id.is_some() { "Edit Note" } else { "New Note" }.to_string(),
            fields: vec![
                FormField::text("Title", note.title.clone()),
                FormField::text("Tags (comma separated)", note.tags.join(", ")),
                FormField::select("Folder", folder_choices, folder_choice),
                FormField::text(
                    "Linked task id",
                    note.task_id.map(|id| id.to_string()).unwrap_or_default(),
                ),
                FormField::multiline("Content", note.content.clone().unwrap_or_default()),
            ],
            current: 0,
            editing_id,
            folder_ids,
            folder_parent: None,
        });
        self.mode = Mode::Form;
    }

    pub fn open_credential_form(&mut self, existing: Option<Credential>) {
        let editing_id = existing.as_ref().and_then(|credential| credential.id);
        let credential =
            existing.unwrap_or_else(|| Credential::new(String::new(), String::new()));
        self.form = Some(FormState {
            kind: FormKind::Credential,
            title: if editing_id.is_some() { "Edit Credential" } else { "New Credential" }
                .to_string(),
            fields: vec![
                FormField::text("Title", credential.title.clone()),
                FormField::text("Project", credential.project.clone().unwrap_or_default()),
                FormField::text("Host / IP", credential.host.clone()),
                FormField::text("Username", credential.username.clone().unwrap_or_default()),
                FormField::text("Password", credential.password.clone()),
                FormField::text("Monthly cost (USD)", format_cost(credential.monthly_cost_usd)),
                FormField::text("Monthly cost (EUR)", format_cost(credential.monthly_cost_eur)),
                FormField::text("Tags (comma separated)", credential.tags.join(", ")),
                FormField::multiline("Notes", credential.notes.clone().unwrap_or_default()),
            ],
            current: 0,
            editing_id,
            folder_ids: Vec::new(),
            folder_parent: None,
        });
        self.mode = Mode::Form;
    }

    pub fn open_folder_form(&mut self, existing: Option<Folder>) {
        let editing_id = existing.as_ref().and_then(|folder| folder.id);
        // New folders are created under the currently selected folder
        let parent = match &existing {
            Some(folder) => folder.parent_id,
            None => self.selected_folder_id(),
        };
        let name = existing.map(|folder| folder.name).unwrap_or_default();
        self.form = Some(FormState {
            kind: FormKind::Folder,
            title: if editing_id.is_some() { "Rename Folder" } else { "New Folder" }.to_string(),
            fields: vec![FormField::text("Name", name)],
            current: 0,
            editing_id,
            folder_ids: Vec::new(),
            folder_parent: parent,
        });
        self.mode = Mode::Form;
    }

    /// Open the edit form for whatever is selected in the current tab.
    pub fn edit_selected(&mut self) {
        match self.tab {
            Tab::Todo | Tab::Kanban => {
                if let Some(task) = self.selected_task() {
                    self.open_task_form(Some(task));
                }
            }
            Tab::Notes => match self.notes_pane {
                NotesPane::Folders => {
                    if let Some(id) = self.selected_folder_id() {
                        if let Some(folder) = self.folder_by_id(id).cloned() {
                            self.open_folder_form(Some(folder));
                        }
                    }
                }
                NotesPane::Notes => {
                    if let Some(note) = self.selected_note() {
                        self.open_note_form(Some(note));
                    }
                }
            },
            Tab::Vault => {
                if let Some(credential) = self.selected_credential() {
                    self.open_credential_form(Some(credential));
                }
            }
            Tab::Dashboard => {}
        }
    }

    pub fn create_in_current_tab(&mut self) {
        match self.tab {
            Tab::Todo | Tab::Kanban | Tab::Dashboard => self.open_task_form(None),
            Tab::Notes => match self.notes_pane {
                NotesPane::Folders => self.open_folder_form(None),
                NotesPane::Notes => self.open_note_form(None),
            },
            Tab::Vault => self.open_credential_form(None),
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::View;
    }

    /// Validate and persist the open form. Validation failures surface
    /// before any network call; transport failures leave the form open.
    pub fn save_form(&mut self) {
        let Some(form) = self.form.clone() else { return };
        let saved = match form.kind {
            FormKind::Task => self.save_task_form(&form),
            FormKind::Note => self.save_note_form(&form),
            FormKind::Credential => self.save_credential_form(&form),
            FormKind::Folder => self.save_folder_form(&form),
        };
        if saved {
            self.close_form();
            self.reload_all();
        }
    }

    fn save_task_form(&mut self, form: &FormState) -> bool {
        let title = form.text_of(task_fields::TITLE);
        if title.is_empty() {
            self.set_status_message("Task title is required".to_string());
            return false;
        }
        let due = form.optional_text(task_fields::DUE_DATE);
        if let Some(ref due) = due {
            if parse_calendar_date(due).is_none() {
                self.set_status_message(format!("Invalid due date: {}", due));
                return false;
            }
        }
        let created = form.optional_text(task_fields::CREATED);
        if let Some(ref created) = created {
            if parse_calendar_date(created).is_none() {
                self.set_status_message(format!("Invalid created date: {}", created));
                return false;
            }
        }
        let time_spent = match form.optional_text(task_fields::TIME_SPENT) {
            Some(raw) => match crate::engine::timefmt::parse_duration(&raw) {
                Some(seconds) => Some(seconds),
                None => {
                    self.set_status_message(format!("Invalid time spent: {}", raw));
                    return false;
                }
            },
            None => None,
        };

        let mut task = Task::new(title);
        task.description = form.optional_text(task_fields::DESCRIPTION);
        task.status = Status::ALL[form.choice_of(task_fields::STATUS).min(2)];
        task.priority = Priority::ALL[form.choice_of(task_fields::PRIORITY).min(2)];
        task.project = form.optional_text(task_fields::PROJECT);
        task.due_date = due;
        task.created_at = created;

        let result = match form.editing_id {
            Some(id) => {
                // Preserve fields the form does not carry
                let previous_seconds = self
                    .tasks
                    .iter()
                    .find(|t| t.id == Some(id))
                    .map(|current| {
                        task.completed_at = current.completed_at.clone();
                        current.time_spent
                    });
                task.time_spent = time_spent.or(previous_seconds).unwrap_or(0);
                task.id = Some(id);
                let result = self.backend.update_task(id, &task).map(|_| "Task updated");
                // Manual time edits go through the dedicated endpoint
                if result.is_ok() {
                    if let Some(seconds) = time_spent {
                        if Some(seconds) != previous_seconds && !self.timers.is_running(id) {
                            if let Err(e) = self.backend.update_time_spent(id, seconds) {
                                tracing::warn!(task_id = id, error = %e, "failed to update time spent");
                                self.set_status_message(format!("Failed to update time: {}", e));
                            }
                        }
                    }
                }
                result
            }
            None => {
                task.time_spent = time_spent.unwrap_or(0);
                self.backend.create_task(&task).map(|_| "Task created")
            }
        };
        self.report_save(result)
    }

    fn save_note_form(&mut self, form: &FormState) -> bool {
        let title = form.text_of(note_fields::TITLE);
        if title.is_empty() {
            self.set_status_message("Note title is required".to_string());
            return false;
        }
        let task_id = match form.optional_text(note_fields::TASK_ID) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    self.set_status_message(format!("Invalid task id: {}", raw));
                    return false;
                }
            },
            None => None,
        };

        let mut note = Note::new(title);
        note.tags = parse_tag_list(&form.text_of(note_fields::TAGS));
        note.folder_id = form
            .folder_ids
            .get(form.choice_of(note_fields::FOLDER))
            .copied()
            .flatten();
        note.task_id = task_id;
        note.content = form.optional_text(note_fields::CONTENT);

        let result = match form.editing_id {
            Some(id) => {
                if let Some(current) = self.notes.iter().find(|n| n.id == Some(id)) {
                    note.linked_note_ids = current.linked_note_ids.clone();
                    note.attachments = current.attachments.clone();
                }
                note.id = Some(id);
                self.backend.update_note(id, &note).map(|_| "Note updated")
            }
            None => self.backend.create_note(&note).map(|_| "Note created"),
        };
        self.report_save(result)
    }

    fn save_credential_form(&mut self, form: &FormState) -> bool {
        let title = form.text_of(credential_fields::TITLE);
        let host = form.text_of(credential_fields::HOST);
        if title.is_empty() || host.is_empty() {
            self.set_status_message("Credential title and host are required".to_string());
            return false;
        }
        let cost_usd = match parse_cost(&form.text_of(credential_fields::COST_USD)) {
            Ok(value) => value,
            Err(raw) => {
                self.set_status_message(format!("Invalid USD cost: {}", raw));
                return false;
            }
        };
        let cost_eur = match parse_cost(&form.text_of(credential_fields::COST_EUR)) {
            Ok(value) => value,
            Err(raw) => {
                self.set_status_message(format!("Invalid EUR cost: {}", raw));
                return false;
            }
        };

        let mut credential = Credential::new(title, host);
        credential.project = form.optional_text(credential_fields::PROJECT);
        credential.username = form.optional_text(credential_fields::USERNAME);
        credential.password = form.text_of(credential_fields::PASSWORD);
        credential.monthly_cost_usd = cost_usd;
        credential.monthly_cost_eur = cost_eur;
        credential.tags = parse_tag_list(&form.text_of(credential_fields::TAGS));
        credential.notes = form.optional_text(credential_fields::NOTES);

        let result = match form.editing_id {
            Some(id) => {
                credential.id = Some(id);
                self.backend
                    .update_credential(id, &credential)
                    .map(|_| "Credential updated")
            }
            None => self
                .backend
                .create_credential(&credential)
                .map(|_| "Credential created"),
        };
        self.report_save(result)
    }

    fn save_folder_form(&mut self, form: &FormState) -> bool {
        let name = form.text_of(0);
        if name.is_empty() {
            self.set_status_message("Folder name is required".to_string());
            return false;
        }
        let result = match form.editing_id {
            Some(id) => {
                let Some(mut folder) = self.folder_by_id(id).cloned() else {
                    return true; // folder vanished; nothing to save
                };
                folder.name = name;
                self.backend.update_folder(id, &folder).map(|_| "Folder renamed")
            }
            None => {
                let mut folder = Folder::new(name, form.folder_parent);
                // New folders land after their future siblings
                folder.position = crate::engine::folders::children_of(
                    &self.folders,
                    form.folder_parent,
                )
                .len() as i64;
                if let Some(parent) = form.folder_parent {
                    self.expanded.insert(parent);
                }
                self.backend.create_folder(&folder).map(|_| "Folder created")
            }
        };
        self.report_save(result)
    }

    fn report_save(
        &mut self,
        result: Result<&'static str, crate::backend::BackendError>,
    ) -> bool {
        match result {
            Ok(message) => {
                self.set_status_message(message.to_string());
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.set_status_message(format!("Save failed: {}", e));
                false
            }
        }
    }

    // --- deletion ---

    pub fn request_delete(&mut self) {
        let target = match self.tab {
            Tab::Todo | Tab::Kanban => self.selected_task().map(DeleteTarget::Task),
            Tab::Notes => match self.notes_pane {
                NotesPane::Folders => self
                    .selected_folder_id()
                    .and_then(|id| self.folder_by_id(id).cloned())
                    .map(DeleteTarget::Folder),
                NotesPane::Notes => self.selected_note().map(DeleteTarget::Note),
            },
            Tab::Vault => self.selected_credential().map(DeleteTarget::Credential),
            Tab::Dashboard => None,
        };
        if target.is_some() {
            self.delete_confirmation = target;
            self.delete_modal_selection = 0;
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(target) = self.delete_confirmation.take() else {
            return;
        };
        let result = match &target {
            DeleteTarget::Task(task) => match task.id {
                Some(id) => {
                    // A running timer for the task dies with it
                    self.timers.discard(id);
                    self.backend.delete_task(id).map(|_| "Task deleted")
                }
                None => return,
            },
            DeleteTarget::Note(note) => match note.id {
                Some(id) => self.backend.delete_note(id).map(|_| "Note deleted"),
                None => return,
            },
            DeleteTarget::Folder(folder) => match folder.id {
                Some(id) => self.delete_folder(id).map(|_| "Folder deleted"),
                None => return,
            },
            DeleteTarget::Credential(credential) => match credential.id {
                Some(id) => self.backend.delete_credential(id).map(|_| "Credential deleted"),
                None => return,
            },
        };
        match result {
            Ok(message) => {
                self.set_status_message(message.to_string());
                self.reload_all();
            }
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                self.set_status_message(format!("Delete failed: {}", e));
            }
        }
    }

    /// Folder deletion lifts direct children (subfolders and notes) to the
    /// deleted folder's parent before removing the folder itself.
    fn delete_folder(&mut self, id: i64) -> Result<(), crate::backend::BackendError> {
        let plan = match plan_delete(&self.folders, id) {
            Ok(plan) => plan,
            Err(MoveError::NotFound) => return Ok(()),
            Err(MoveError::WouldCycle) => return Ok(()),
        };
        for note in self.notes.iter().filter(|note| note.folder_id == Some(id)) {
            if let Some(note_id) = note.id {
                let mut updated = note.clone();
                updated.folder_id = plan.new_parent;
                self.backend.update_note(note_id, &updated)?;
            }
        }
        if !plan.reassignments.is_empty() {
            self.backend.update_folder_positions(&plan.reassignments)?;
        }
        self.backend.delete_folder(id)?;
        self.expanded.remove(&id);
        Ok(())
    }

    // --- note versions and attachments ---

    pub fn open_versions(&mut self) {
        let Some(note) = self.selected_note() else {
            return;
        };
        let Some(note_id) = note.id else { return };
        match self.backend.list_versions(note_id) {
            Ok(versions) => {
                if versions.is_empty() {
                    self.set_status_message("No earlier versions".to_string());
                    return;
                }
                self.versions = Some(VersionsState {
                    note_id,
                    note_title: note.title.clone(),
                    versions,
                    selected: 0,
                });
                self.mode = Mode::Versions;
            }
            Err(e) => {
                tracing::warn!(note_id, error = %e, "failed to list versions");
                self.set_status_message(format!("Failed to load versions: {}", e));
            }
        }
    }

    pub fn close_versions(&mut self) {
        self.versions = None;
        self.mode = Mode::View;
    }

    pub fn restore_selected_version(&mut self) {
        let Some(state) = self.versions.clone() else {
            return;
        };
        let Some(version) = state.versions.get(state.selected) else {
            return;
        };
        match self.backend.restore_version(state.note_id, version.version) {
            Ok(()) => {
                self.set_status_message(format!("Restored version {}", version.version));
                self.close_versions();
                self.load_notes();
            }
            Err(e) => {
                tracing::warn!(note_id = state.note_id, error = %e, "failed to restore version");
                self.set_status_message(format!("Failed to restore version: {}", e));
            }
        }
    }

    pub fn delete_selected_attachment(&mut self) {
        let Some(note) = self.selected_note() else {
            return;
        };
        // Oldest attachment first; finer selection is not worth a mode
        let Some(attachment) = note.attachments.first() else {
            self.set_status_message("Note has no attachments".to_string());
            return;
        };
        let Some(attachment_id) = attachment.id else { return };
        match self.backend.delete_attachment(attachment_id) {
            Ok(()) => {
                self.set_status_message(format!("Deleted attachment {}", attachment.filename));
                self.load_notes();
            }
            Err(e) => {
                tracing::warn!(attachment_id, error = %e, "failed to delete attachment");
                self.set_status_message(format!("Failed to delete attachment: {}", e));
            }
        }
    }

    // --- filter modal ---

    pub fn enter_filter_mode(&mut self) {
        let priority_index = self
            .filter
            .priority
            .map(|priority| Priority::ALL.iter().position(|p| *p == priority).unwrap_or(0) + 1)
            .unwrap_or(0);
        let status_index = self
            .filter
            .status
            .map(|status| Status::ALL.iter().position(|s| *s == status).unwrap_or(0) + 1)
            .unwrap_or(0);
        self.filter_form = Some(FilterFormState {
            current: filter_fields::SEARCH,
            search: Editor::from_string(self.filter.search.clone()),
            project: Editor::from_string(self.filter.project.clone().unwrap_or_default()),
            priority_index,
            status_index,
            date_from: Editor::from_string(self.filter.date_from.clone().unwrap_or_default()),
            date_to: Editor::from_string(self.filter.date_to.clone().unwrap_or_default()),
            tags: Editor::from_string(self.filter.tag_query.clone()),
        });
        self.mode = Mode::Filter;
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_form = None;
        self.mode = Mode::View;
    }

    pub fn apply_filters(&mut self) {
        let Some(state) = self.filter_form.clone() else {
            return;
        };
        let text = |editor: &Editor| {
            let value = editor.first_line().trim().to_string();
            if value.is_empty() { None } else { Some(value) }
        };

        for label in [&state.date_from, &state.date_to] {
            if let Some(value) = text(label) {
                if parse_calendar_date(&value).is_none() {
                    self.set_status_message(format!("Invalid date: {}", value));
                    return;
                }
            }
        }

        self.filter.search = state.search.first_line().trim().to_string();
        self.filter.project = text(&state.project);
        self.filter.priority = match state.priority_index {
            0 => None,
            index => Priority::ALL.get(index - 1).copied(),
        };
        self.filter.status = match state.status_index {
            0 => None,
            index => Status::ALL.get(index - 1).copied(),
        };
        self.filter.date_from = text(&state.date_from);
        self.filter.date_to = text(&state.date_to);
        self.filter.tag_query = state.tags.first_line().trim().to_string();

        self.exit_filter_mode();
        self.adjust_selection();
        self.set_status_message("Filters applied".to_string());
    }

    pub fn clear_filters(&mut self) {
        let folder_scope = self.filter.folder_scope;
        self.filter = FilterCriteria {
            folder_scope,
            ..FilterCriteria::default()
        };
        self.exit_filter_mode();
        self.adjust_selection();
        self.set_status_message("Filters cleared".to_string());
    }

    // --- search mode ---

    pub fn enter_search_mode(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn exit_search_mode(&mut self) {
        self.mode = Mode::View;
        self.adjust_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search.push(c);
        self.reset_list_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search.pop();
        self.reset_list_selection();
    }

    fn reset_list_selection(&mut self) {
        self.todo_index = 0;
        self.kanban_index = 0;
        self.note_index = 0;
        self.cred_index = 0;
        self.adjust_selection();
    }
}

fn parse_tag_list(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',') {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn parse_cost(value: &str) -> Result<f64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse::<f64>().map_err(|_| value.to_string())
}

fn format_cost(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{}", value)
    }
}
