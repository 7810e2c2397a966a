use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::engine::folders::PositionUpdate;
use crate::models::{
    ActiveTimer, Attachment, Credential, Folder, Note, NoteVersion, Task,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status} for {path}")]
    Status { status: u16, path: String },
}

/// Id handed back by the server for a freshly created entity.
#[derive(Debug, Deserialize)]
struct Created {
    id: i64,
}

/// Blocking HTTP collaborator for the tracking server. One method per server
/// operation; response bodies parse straight into the model types. Calls are
/// issued from the single-threaded event loop, so request ordering follows
/// call ordering.
pub struct Backend {
    client: Client,
    base_url: String,
}

impl Backend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(path: &str, response: Response) -> Result<Response, BackendError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(BackendError::Status {
                status: response.status().as_u16(),
                path: path.to_string(),
            })
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.client.get(self.url(path)).send()?;
        Ok(Self::check(path, response)?.json()?)
    }

    fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        let response = self.client.post(self.url(path)).json(body).send()?;
        Self::check(path, response)
    }

    fn post_empty(&self, path: &str) -> Result<Response, BackendError> {
        let response = self.client.post(self.url(path)).send()?;
        Self::check(path, response)
    }

    fn put_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        let response = self.client.put(self.url(path)).json(body).send()?;
        Self::check(path, response)
    }

    fn delete(&self, path: &str) -> Result<(), BackendError> {
        let response = self.client.delete(self.url(path)).send()?;
        Self::check(path, response).map(|_| ())
    }

    // --- tasks ---

    pub fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.get_json("/api/tasks")
    }

    pub fn create_task(&self, task: &Task) -> Result<i64, BackendError> {
        let created: Created = self.post_json("/api/tasks", task)?.json()?;
        Ok(created.id)
    }

    pub fn update_task(&self, id: i64, task: &Task) -> Result<(), BackendError> {
        self.put_json(&format!("/api/tasks/{}", id), task).map(|_| ())
    }

    pub fn delete_task(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api/tasks/{}", id))
    }

    pub fn list_projects(&self) -> Result<Vec<String>, BackendError> {
        self.get_json("/api/projects")
    }

    // --- timers ---

    pub fn start_timer(&self, task_id: i64) -> Result<(), BackendError> {
        self.post_empty(&format!("/api/tasks/{}/start-timer", task_id))
            .map(|_| ())
    }

    pub fn stop_timer(&self, task_id: i64) -> Result<(), BackendError> {
        self.post_empty(&format!("/api/tasks/{}/stop-timer", task_id))
            .map(|_| ())
    }

    pub fn active_timers(&self) -> Result<Vec<ActiveTimer>, BackendError> {
        self.get_json("/api/timers/active")
    }

    pub fn update_time_spent(&self, task_id: i64, seconds: u64) -> Result<(), BackendError> {
        self.put_json(
            &format!("/api/tasks/{}/time-spent", task_id),
            &serde_json::json!({ "time_spent": seconds }),
        )
        .map(|_| ())
    }

    // --- notes ---

    pub fn list_notes(&self) -> Result<Vec<Note>, BackendError> {
        self.get_json("/api/notes")
    }

    pub fn create_note(&self, note: &Note) -> Result<i64, BackendError> {
        let created: Created = self.post_json("/api/notes", note)?.json()?;
        Ok(created.id)
    }

    pub fn update_note(&self, id: i64, note: &Note) -> Result<(), BackendError> {
        self.put_json(&format!("/api/notes/{}", id), note).map(|_| ())
    }

    pub fn delete_note(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api/notes/{}", id))
    }

    pub fn list_note_tags(&self) -> Result<Vec<String>, BackendError> {
        self.get_json("/api/notes/tags")
    }

    pub fn list_versions(&self, note_id: i64) -> Result<Vec<NoteVersion>, BackendError> {
        self.get_json(&format!("/api/notes/{}/versions", note_id))
    }

    pub fn restore_version(&self, note_id: i64, version: i64) -> Result<(), BackendError> {
        self.post_empty(&format!("/api/notes/{}/versions/{}/restore", note_id, version))
            .map(|_| ())
    }

    pub fn list_attachments(&self, note_id: i64) -> Result<Vec<Attachment>, BackendError> {
        self.get_json(&format!("/api/notes/{}/attachments", note_id))
    }

    /// Registers attachment metadata; the server owns the stored bytes.
    pub fn create_attachment(
        &self,
        note_id: i64,
        attachment: &Attachment,
    ) -> Result<i64, BackendError> {
        let created: Created = self
            .post_json(&format!("/api/notes/{}/attachments", note_id), attachment)?
            .json()?;
        Ok(created.id)
    }

    pub fn delete_attachment(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api/attachments/{}", id))
    }

    // --- folders ---

    pub fn list_folders(&self) -> Result<Vec<Folder>, BackendError> {
        self.get_json("/api/folders")
    }

    pub fn create_folder(&self, folder: &Folder) -> Result<i64, BackendError> {
        let created: Created = self.post_json("/api/folders", folder)?.json()?;
        Ok(created.id)
    }

    pub fn update_folder(&self, id: i64, folder: &Folder) -> Result<(), BackendError> {
        self.put_json(&format!("/api/folders/{}", id), folder).map(|_| ())
    }

    pub fn delete_folder(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api/folders/{}", id))
    }

    /// One batch round trip for a whole sibling level after a reorder.
    pub fn update_folder_positions(&self, rows: &[PositionUpdate]) -> Result<(), BackendError> {
        self.put_json("/api/folders/positions", rows).map(|_| ())
    }

    // --- credentials ---

    pub fn list_credentials(&self) -> Result<Vec<Credential>, BackendError> {
        self.get_json("/api/credentials")
    }

    pub fn create_credential(&self, credential: &Credential) -> Result<i64, BackendError> {
        let created: Created = self.post_json("/api/credentials", credential)?.json()?;
        Ok(created.id)
    }

    pub fn update_credential(&self, id: i64, credential: &Credential) -> Result<(), BackendError> {
        self.put_json(&format!("/api/credentials/{}", id), credential)
            .map(|_| ())
    }

    pub fn delete_credential(&self, id: i64) -> Result<(), BackendError> {
        self.delete(&format!("/api/credentials/{}", id))
    }

    pub fn list_credential_tags(&self) -> Result<Vec<String>, BackendError> {
        self.get_json("/api/credentials/tags")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backend = Backend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.url("/api/tasks"), "http://localhost:5000/api/tasks");
    }
}
