//! Wire models shared by the API client and the dashboard state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of a note.
///
/// `"Concepts"` is the value older servers stored for the first column; it is
/// accepted on input and treated as `"To Do"`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum NoteStatus {
    #[default]
    #[serde(rename = "To Do", alias = "Concepts")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl NoteStatus {
    /// The three dashboard tabs, in display order.
    pub const ALL: [NoteStatus; 3] =
        [NoteStatus::ToDo, NoteStatus::InProgress, NoteStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::ToDo => "To Do",
            NoteStatus::InProgress => "In Progress",
            NoteStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note as returned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub status: NoteStatus,
    #[serde(default)]
    pub is_starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a note, sent on create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub status: NoteStatus,
}

impl NoteFields {
    /// Prefill an edit form from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            subject: note.subject.clone(),
            tags: note.tags.clone(),
            resource_url: note.resource_url.clone(),
            status: note.status,
        }
    }
}

/// The logged-in user's account data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "isAccountVerified", default)]
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_deserializes_server_payload() {
        let note: Note = serde_json::from_str(
            r#"{
                "id": "4be0643f-1d98-573b-97cd-ca98a65347dd",
                "title": "T1",
                "content": "C1",
                "subject": "Rust",
                "tags": ["a", "b"],
                "resourceUrl": "https://example.com",
                "status": "In Progress",
                "isStarred": true,
                "createdAt": "2026-01-05T10:00:00Z",
                "updatedAt": "2026-01-06T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(note.status, NoteStatus::InProgress);
        assert_eq!(note.tags, vec!["a", "b"]);
        assert!(note.is_starred);
        assert_eq!(note.resource_url, "https://example.com");
    }

    #[test]
    fn test_fields_prefill_from_note() {
        let note: Note = serde_json::from_str(
            r#"{
                "id": "n1", "title": "T", "content": "C",
                "status": "Concepts",
                "createdAt": "2026-01-05T10:00:00Z",
                "updatedAt": "2026-01-05T10:00:00Z"
            }"#,
        )
        .unwrap();
        // legacy status value normalizes to the first column.
        assert_eq!(note.status, NoteStatus::ToDo);

        let fields = NoteFields::from_note(&note);
        assert_eq!(fields.title, "T");
        assert_eq!(fields.status, NoteStatus::ToDo);
        assert_eq!(
            serde_json::to_value(&fields).unwrap()["status"],
            "To Do"
        );
    }
}
