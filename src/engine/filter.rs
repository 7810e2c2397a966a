use crate::engine::timefmt::date_part;
use crate::models::{Credential, Note, Priority, Status, Task};

/// Which task timestamp a date comparison reads. Due dates everywhere except
/// the dashboard, which ranges over creation dates and charts completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateField {
    #[default]
    Due,
    Created,
    Completed,
}

/// Folder restriction for the notes view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderScope {
    #[default]
    All,
    Uncategorized,
    Folder(i64),
}

/// Transient per-view filter state. Empty string / `None` means the dimension
/// is inactive; active dimensions combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub project: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub date_from: Option<String>, // YYYY-MM-DD, inclusive
    pub date_to: Option<String>,   // YYYY-MM-DD, inclusive
    pub tag_query: String,
    pub date_field: DateField,
    pub folder_scope: FolderScope,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.project.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.tag_query.trim().is_empty()
            && self.folder_scope == FolderScope::All
    }

    /// One-line summary for the filters box.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.search.trim().is_empty() {
            parts.push(format!("Search: {}", self.search.trim()));
        }
        if let Some(ref project) = self.project {
            parts.push(format!("Project: {}", project));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("Priority: {}", priority.label()));
        }
        if let Some(status) = self.status {
            parts.push(format!("Status: {}", status.label()));
        }
        match (&self.date_from, &self.date_to) {
            (Some(from), Some(to)) => parts.push(format!("Dates: {} to {}", from, to)),
            (Some(from), None) => parts.push(format!("Dates: from {}", from)),
            (None, Some(to)) => parts.push(format!("Dates: until {}", to)),
            (None, None) => {}
        }
        if !self.tag_query.trim().is_empty() {
            parts.push(format!("Tags: {}", self.tag_query.trim()));
        }
        match self.folder_scope {
            FolderScope::All => {}
            FolderScope::Uncategorized => parts.push("Folder: uncategorized".to_string()),
            FolderScope::Folder(id) => parts.push(format!("Folder: #{}", id)),
        }
        if parts.is_empty() {
            "No filters".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// Every query token must partially match at least one tag, case-insensitive.
/// Entities without tags fail any non-empty query.
fn matches_tag_query(tags: &[String], query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    query.split_whitespace().all(|token| {
        let token = token.to_lowercase();
        tags.iter().any(|tag| tag.to_lowercase().contains(&token))
    })
}

/// Inclusive lexicographic range check over fixed-width YYYY-MM-DD strings.
/// An active bound against a missing or malformed date fails the predicate.
fn in_date_range(date: Option<&str>, from: Option<&str>, to: Option<&str>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(date) = date.and_then(date_part) else {
        return false;
    };
    if let Some(from) = from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = to {
        if date > to {
            return false;
        }
    }
    true
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn filter_tasks(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    let search = criteria.search.trim();
    tasks
        .iter()
        .filter(|task| search.is_empty() || contains_ci(&task.title, search))
        .filter(|task| match &criteria.project {
            Some(project) => task.project.as_deref() == Some(project.as_str()),
            None => true,
        })
        .filter(|task| match criteria.priority {
            Some(priority) => task.priority == priority,
            None => true,
        })
        .filter(|task| match criteria.status {
            Some(status) => task.status == status,
            None => true,
        })
        .filter(|task| {
            let date = match criteria.date_field {
                DateField::Due => task.due_date.as_deref(),
                DateField::Created => task.created_at.as_deref(),
                DateField::Completed => task.completed_at.as_deref(),
            };
            in_date_range(date, criteria.date_from.as_deref(), criteria.date_to.as_deref())
        })
        .cloned()
        .collect()
}

pub fn filter_notes(notes: &[Note], criteria: &FilterCriteria) -> Vec<Note> {
    let search = criteria.search.trim();
    notes
        .iter()
        .filter(|note| {
            search.is_empty()
                || contains_ci(&note.title, search)
                || note
                    .content
                    .as_deref()
                    .is_some_and(|content| contains_ci(content, search))
        })
        .filter(|note| matches_tag_query(&note.tags, &criteria.tag_query))
        .filter(|note| match criteria.folder_scope {
            FolderScope::All => true,
            FolderScope::Uncategorized => note.folder_id.is_none(),
            FolderScope::Folder(id) => note.folder_id == Some(id),
        })
        .cloned()
        .collect()
}

pub fn filter_credentials(credentials: &[Credential], criteria: &FilterCriteria) -> Vec<Credential> {
    let search = criteria.search.trim();
    credentials
        .iter()
        .filter(|credential| {
            search.is_empty()
                || contains_ci(&credential.title, search)
                || contains_ci(&credential.host, search)
        })
        .filter(|credential| match &criteria.project {
            Some(project) => credential.project.as_deref() == Some(project.as_str()),
            None => true,
        })
        .filter(|credential| matches_tag_query(&credential.tags, &criteria.tag_query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(title: &str) -> Task {
        Task::new(title.to_string())
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn empty_criteria_return_everything_in_order() {
        let tasks = vec![task("b"), task("a"), task("c")];
        let filtered = filter_tasks(&tasks, &FilterCriteria::default());
        assert_eq!(titles(&filtered), vec!["b", "a", "c"]);
    }

    #[test]
    fn composition_is_conjunctive() {
        let mut deploy = task("Deploy staging");
        deploy.project = Some("infra".to_string());
        deploy.priority = Priority::High;
        let mut docs = task("Deploy docs");
        docs.project = Some("website".to_string());
        docs.priority = Priority::High;
        let mut cleanup = task("Cleanup");
        cleanup.project = Some("infra".to_string());
        cleanup.priority = Priority::Low;

        let criteria = FilterCriteria {
            search: "deploy".to_string(),
            project: Some("infra".to_string()),
            priority: Some(Priority::High),
            ..FilterCriteria::default()
        };
        let filtered = filter_tasks(&[deploy, docs, cleanup], &criteria);
        assert_eq!(titles(&filtered), vec!["Deploy staging"]);
    }

    #[test]
    fn status_equality_only_when_set() {
        let mut done = task("done one");
        done.status = Status::Done;
        let tasks = vec![task("open one"), done];

        let criteria = FilterCriteria {
            status: Some(Status::Done),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_tasks(&tasks, &criteria)), vec!["done one"]);
    }

    #[test]
    fn due_date_range_is_inclusive_and_rejects_missing_dates() {
        let mut early = task("early");
        early.due_date = Some("2026-03-01".to_string());
        let mut late = task("late");
        late.due_date = Some("2026-03-15".to_string());
        let undated = task("undated");

        let criteria = FilterCriteria {
            date_from: Some("2026-03-01".to_string()),
            date_to: Some("2026-03-10".to_string()),
            ..FilterCriteria::default()
        };
        let filtered = filter_tasks(&[early, late, undated], &criteria);
        assert_eq!(titles(&filtered), vec!["early"]);
    }

    #[test]
    fn created_date_field_uses_timestamp_prefix() {
        let mut recent = task("recent");
        recent.created_at = Some("2026-08-03 09:15:00".to_string());
        let mut old = task("old");
        old.created_at = Some("2026-07-01 12:00:00".to_string());

        let criteria = FilterCriteria {
            date_field: DateField::Created,
            date_from: Some("2026-08-01".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(titles(&filter_tasks(&[recent, old], &criteria)), vec!["recent"]);
    }

    #[test]
    fn tag_query_requires_every_token_to_hit_some_tag() {
        let tags = vec!["production".to_string(), "internal-api".to_string()];
        assert!(matches_tag_query(&tags, "prod api"));
        assert!(!matches_tag_query(&["production".to_string()], "prod api"));
        assert!(matches_tag_query(&tags, ""));
        assert!(!matches_tag_query(&[], "prod"));
        assert!(matches_tag_query(&tags, "PROD"));
    }

    #[test]
    fn note_search_covers_content_and_folder_scope_applies() {
        let mut in_folder = Note::new("Runbook".to_string());
        in_folder.folder_id = Some(7);
        in_folder.content = Some("restart the ingest worker".to_string());
        let loose = Note::new("Scratch".to_string());

        let criteria = FilterCriteria {
            search: "ingest".to_string(),
            folder_scope: FolderScope::Folder(7),
            ..FilterCriteria::default()
        };
        let filtered = filter_notes(&[in_folder.clone(), loose.clone()], &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Runbook");

        let uncategorized = FilterCriteria {
            folder_scope: FolderScope::Uncategorized,
            ..FilterCriteria::default()
        };
        let filtered = filter_notes(&[in_folder, loose], &uncategorized);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Scratch");
    }

    #[test]
    fn summary_reflects_active_dimensions() {
        let empty = FilterCriteria::default();
        assert!(empty.is_empty());
        assert_eq!(empty.summary(), "No filters");

        let criteria = FilterCriteria {
            search: "api".to_string(),
            priority: Some(Priority::High),
            date_from: Some("2026-08-01".to_string()),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_empty());
        assert_eq!(
            criteria.summary(),
            "Search: api | Priority: High | Dates: from 2026-08-01"
        );
    }

    #[test]
    fn credential_search_matches_host() {
        let mut db = Credential::new("Primary DB".to_string(), "10.0.3.12".to_string());
        db.tags = vec!["production".to_string()];
        let mail = Credential::new("Mail relay".to_string(), "mail.internal".to_string());

        let criteria = FilterCriteria {
            search: "10.0.3".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_credentials(&[db, mail], &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Primary DB");
    }
}
