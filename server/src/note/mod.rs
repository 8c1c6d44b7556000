mod repository;

pub use repository::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Workflow state of a note.
///
/// `"Concepts"` is the value older clients sent for the first column; it is
/// accepted on input and normalized to `"To Do"`.
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

/// Error for an unrecognized status value.
#[derive(Debug, thiserror::Error)]
#[error("unknown note status: {0}")]
pub struct UnknownStatus(String);

impl NoteStatus {
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

impl TryFrom<String> for NoteStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "To Do" | "Concepts" => Ok(NoteStatus::ToDo),
            "In Progress" => Ok(NoteStatus::InProgress),
            "Done" => Ok(NoteStatus::Done),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Note as saved on database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub resource_url: String,
    #[sqlx(try_from = "String")]
    pub status: NoteStatus,
    pub is_starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a note.
///
/// Used for both creation and full-replacement updates, so an edit always
/// states every field explicitly.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteFields {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required."))]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&NoteStatus::ToDo).unwrap(),
            r#""To Do""#
        );
        assert_eq!(
            serde_json::to_string(&NoteStatus::InProgress).unwrap(),
            r#""In Progress""#
        );
        assert_eq!(
            serde_json::to_string(&NoteStatus::Done).unwrap(),
            r#""Done""#
        );
    }

    #[test]
    fn test_legacy_concepts_alias() {
        let status: NoteStatus = serde_json::from_str(r#""Concepts""#).unwrap();
        assert_eq!(status, NoteStatus::ToDo);
        assert_eq!(
            NoteStatus::try_from("Concepts".to_string()).unwrap(),
            NoteStatus::ToDo
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<NoteStatus>(r#""Archived""#).is_err());
        assert!(NoteStatus::try_from("Archived".to_string()).is_err());
    }

    #[test]
    fn test_fields_default_status() {
        let fields: NoteFields =
            serde_json::from_str(r#"{"title": "T", "content": "C"}"#).unwrap();
        assert_eq!(fields.status, NoteStatus::ToDo);
        assert!(fields.tags.is_empty());
        assert_eq!(fields.resource_url, "");
    }

    #[test]
    fn test_fields_camel_case() {
        let fields: NoteFields = serde_json::from_str(
            r#"{"title": "T", "content": "C", "resourceUrl": "https://example.com", "tags": ["a", "b"]}"#,
        )
        .unwrap();
        assert_eq!(fields.resource_url, "https://example.com");
        assert_eq!(fields.tags, vec!["a", "b"]);
    }
}
