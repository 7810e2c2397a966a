use serde::{Deserialize, Serialize};

/// Task workflow state. The wire strings are fixed; anything else coming from
/// the server is a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank used inside due-date buckets: high tasks first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    pub project: Option<String>,
    pub due_date: Option<String>,   // ISO 8601: YYYY-MM-DD
    pub created_at: Option<String>, // YYYY-MM-DD HH:MM:SS (UTC)
    pub completed_at: Option<String>,
    #[serde(default)]
    pub time_spent: u64, // whole seconds
}

impl Task {
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            description: None,
            status: Status::Todo,
            priority: Priority::Medium,
            project: None,
            due_date: None,
            created_at: None,
            completed_at: None,
            time_spent: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Option<i64>,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    pub path: String,
}

/// Snapshot of an earlier note revision, fetched on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteVersion {
    pub version: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub task_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub linked_note_ids: Vec<i64>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Note {
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            content: None,
            folder_id: None,
            task_id: None,
            tags: Vec::new(),
            linked_note_ids: Vec::new(),
            attachments: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Option<i64>,
    pub name: String,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub has_children: bool,
}

impl Folder {
    pub fn new(name: String, parent_id: Option<i64>) -> Self {
        Self {
            id: None,
            name,
            parent_id,
            position: 0,
            has_children: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: Option<i64>,
    pub title: String,
    pub project: Option<String>,
    pub host: String,
    pub username: Option<String>,
    pub password: String,
    #[serde(default)]
    pub monthly_cost_usd: f64,
    #[serde(default)]
    pub monthly_cost_eur: f64,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Credential {
    pub fn new(title: String, host: String) -> Self {
        Self {
            id: None,
            title,
            project: None,
            host,
            username: None,
            password: String::new(),
            monthly_cost_usd: 0.0,
            monthly_cost_eur: 0.0,
            notes: None,
            tags: Vec::new(),
        }
    }
}

/// Server-reported running timer, used to rebuild session anchors after a
/// restart. `started_at` is the server's instant, not the client's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub task_id: i64,
    pub started_at: String, // YYYY-MM-DD HH:MM:SS (UTC)
    pub time_spent_at_start: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_wire_strings() {
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"done\"");
        let parsed: Status = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, Status::InProgress);
    }

    #[test]
    fn priority_wire_strings_and_default() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);

        // A payload without a priority field falls back to medium
        let task: Task =
            serde_json::from_str(r#"{"id":1,"title":"x","status":"todo"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.time_spent, 0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<Status, _> = serde_json::from_str("\"paused\"");
        assert!(result.is_err());
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }
}
