//! Handle database requests for notes.
//!
//! Every query filters on `user_id`: the ownership check is the only
//! authorization rule in the system.

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::Result;
use crate::note::{Note, NoteFields};

const COLUMNS: &str = "id, user_id, title, content, subject, tags, \
     resource_url, status, is_starred, created_at, updated_at";

#[derive(Clone)]
pub struct NoteRepository {
    pool: Pool<Postgres>,
}

impl NoteRepository {
    /// Create a new [`NoteRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new note owned by `owner`.
    pub async fn insert(
        &self,
        owner: Uuid,
        fields: &NoteFields,
    ) -> Result<Note> {
        let now = Utc::now();
        let query = format!(
            r#"INSERT INTO notes
                (id, user_id, title, content, subject, tags, resource_url,
                 status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                RETURNING {COLUMNS}"#
        );

        let note = sqlx::query_as::<_, Note>(&query)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.subject)
            .bind(&fields.tags)
            .bind(&fields.resource_url)
            .bind(fields.status.as_str())
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(note)
    }

    /// All notes owned by `owner`, most recently updated first.
    pub async fn list_for_user(&self, owner: Uuid) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE user_id = $1
                ORDER BY updated_at DESC"
        );
        let notes = sqlx::query_as::<_, Note>(&query)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }

    /// Replace the mutable fields of a note owned by `owner`.
    ///
    /// `None` when no note matches both id and owner.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        fields: &NoteFields,
    ) -> Result<Option<Note>> {
        let query = format!(
            r#"UPDATE notes
                SET title = $1, content = $2, subject = $3, tags = $4,
                    resource_url = $5, status = $6, updated_at = $7
                WHERE id = $8 AND user_id = $9
                RETURNING {COLUMNS}"#
        );

        let note = sqlx::query_as::<_, Note>(&query)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.subject)
            .bind(&fields.tags)
            .bind(&fields.resource_url)
            .bind(fields.status.as_str())
            .bind(Utc::now())
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }

    /// Delete a note owned by `owner`. `false` when nothing matched.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Flip the starred flag of a note owned by `owner`.
    pub async fn toggle_star(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Note>> {
        let query = format!(
            r#"UPDATE notes
                SET is_starred = NOT is_starred, updated_at = $1
                WHERE id = $2 AND user_id = $3
                RETURNING {COLUMNS}"#
        );

        let note = sqlx::query_as::<_, Note>(&query)
            .bind(Utc::now())
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }
}
