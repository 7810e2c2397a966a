use clap::{Parser, Subcommand};

use crate::backend::{Backend, BackendError};
use crate::engine::timefmt::{format_duration, parse_calendar_date};
use crate::models::{Attachment, Note, Priority, Task};

#[derive(Parser)]
#[command(name = "trk")]
#[command(about = "Terminal client for a personal task, time and note tracking server")]
#[command(version)]
pub struct Cli {
    /// Server base URL (overrides the configured one)
    #[arg(long)]
    pub server: Option<String>,

    /// Use development mode (separate config and log file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Priority: low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Project label
        #[arg(long)]
        project: Option<String>,
    },
    /// Quickly add a new note
    AddNote {
        /// Note title
        title: String,
        /// Note content
        #[arg(long)]
        content: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Start or stop a task timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
    /// Attach a file to a note (registers the metadata with the server)
    Attach {
        /// Note id
        note_id: i64,
        /// Path to the file
        file: String,
    },
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the timer for a task (stops any other running timer first)
    Start { task_id: i64 },
    /// Stop the timer for a task
    Stop { task_id: i64 },
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    match value {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(format!("Unknown priority: {} (expected low, medium or high)", other)),
    }
}

pub fn handle_add_task(
    title: String,
    due: Option<String>,
    priority: Option<String>,
    project: Option<String>,
    backend: &Backend,
) -> Result<(), BackendError> {
    if let Some(ref due) = due {
        if parse_calendar_date(due).is_none() {
            eprintln!("Invalid due date: {} (expected YYYY-MM-DD)", due);
            return Ok(());
        }
    }
    let mut task = Task::new(title);
    task.due_date = due;
    task.project = project;
    match priority.as_deref().map(parse_priority) {
        Some(Ok(priority)) => task.priority = priority,
        Some(Err(message)) => {
            eprintln!("{}", message);
            return Ok(());
        }
        None => {}
    }

    let id = backend.create_task(&task)?;
    println!("Created task #{}: {}", id, task.title);
    Ok(())
}

pub fn handle_add_note(
    title: String,
    content: Option<String>,
    tags: Option<String>,
    backend: &Backend,
) -> Result<(), BackendError> {
    let mut note = Note::new(title);
    note.content = content;
    note.tags = tags
        .map(|tags| {
            tags.split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let id = backend.create_note(&note)?;
    println!("Created note #{}: {}", id, note.title);
    Ok(())
}

pub fn handle_attach(note_id: i64, file: String, backend: &Backend) -> Result<(), BackendError> {
    let path = std::path::Path::new(&file);
    let Ok(metadata) = std::fs::metadata(path) else {
        eprintln!("Cannot read file: {}", file);
        return Ok(());
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.clone());

    let attachment = Attachment {
        id: None,
        filename,
        size: metadata.len(),
        path: file,
    };
    backend.create_attachment(note_id, &attachment)?;

    let attachments = backend.list_attachments(note_id)?;
    println!("Note #{} now has {} attachment(s):", note_id, attachments.len());
    for attachment in attachments {
        println!("  {} ({} bytes)", attachment.filename, attachment.size);
    }
    Ok(())
}

pub fn handle_timer(action: TimerAction, backend: &Backend) -> Result<(), BackendError> {
    match action {
        TimerAction::Start { task_id } => {
            // Same stop-then-start ordering as the TUI: never leave two
            // timers reported running server-side.
            for running in backend.active_timers()? {
                if running.task_id != task_id {
                    backend.stop_timer(running.task_id)?;
                }
            }
            backend.start_timer(task_id)?;
            println!("Timer started for task #{}", task_id);
        }
        TimerAction::Stop { task_id } => {
            backend.stop_timer(task_id)?;
            let total = backend
                .list_tasks()?
                .into_iter()
                .find(|task| task.id == Some(task_id))
                .map(|task| task.time_spent)
                .unwrap_or(0);
            println!(
                "Timer stopped for task #{} (total {})",
                task_id,
                format_duration(total)
            );
        }
    }
    Ok(())
}
