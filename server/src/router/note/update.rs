//! Replace the fields of an owned note.

use axum::Json;
use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::note::{NoteFields, NoteRepository};
use crate::router::Valid;
use crate::router::note::NoteResponse;
use crate::{AppState, ServerError};

/// Handler applying a full field replacement to an owned note.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Valid(fields): Valid<NoteFields>,
) -> Result<Json<NoteResponse>> {
    let note = NoteRepository::new(state.db.postgres.clone())
        .update(user_id, id, &fields)
        .await?
        .ok_or(ServerError::NoteNotFound)?;

    Ok(NoteResponse::new("Note updated.", note))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::{Pool, Postgres};

    use crate::router::testing;
    use crate::{app, make_request};

    #[sqlx::test]
    async fn test_update_replaces_fields(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        let cookie =
            testing::register(app.clone(), "Alice", "alice@example.com").await;
        let note = testing::create_note(
            app.clone(),
            &cookie,
            json!({"title": "T", "content": "C", "tags": ["old"]}),
        )
        .await;

        let response = make_request(
            app,
            Method::PUT,
            &format!("/api/note/update/{}", note.id),
            Some(&cookie),
            json!({
                "title": "T2",
                "content": "C2",
                "subject": "Rust",
                "tags": ["new", "tags"],
                "resourceUrl": "https://example.com",
                "status": "In Progress",
            })
            .to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["note"]["title"], "T2");
        assert_eq!(body["note"]["subject"], "Rust");
        assert_eq!(body["note"]["tags"], json!(["new", "tags"]));
        assert_eq!(body["note"]["status"], "In Progress");
    }

    #[sqlx::test]
    async fn test_update_foreign_note(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        let alice =
            testing::register(app.clone(), "Alice", "alice@example.com").await;
        let bob =
            testing::register(app.clone(), "Bob", "bob@example.com").await;
        let note = testing::create_note(
            app.clone(),
            &alice,
            json!({"title": "Hers", "content": "C"}),
        )
        .await;

        let response = make_request(
            app,
            Method::PUT,
            &format!("/api/note/update/{}", note.id),
            Some(&bob),
            json!({"title": "Mine now", "content": "C"}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Note not found or unauthorized");
    }
}
