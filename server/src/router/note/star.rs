//! Flip the starred flag of an owned note.

use axum::Json;
use axum::extract::{Path, State};
use axum::Extension;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::note::{Note, NoteRepository};
use crate::{AppState, ServerError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub note: Note,
}

/// Handler toggling `is_starred` on an owned note.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Response>> {
    let note = NoteRepository::new(state.db.postgres.clone())
        .toggle_star(user_id, id)
        .await?
        .ok_or(ServerError::NoteNotFound)?;

    Ok(Json(Response {
        success: true,
        note,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::{Pool, Postgres};

    use crate::router::testing;
    use crate::{app, make_request};

    async fn toggle(
        app: axum::Router,
        cookie: &str,
        id: &str,
    ) -> (StatusCode, Value) {
        let response = make_request(
            app,
            Method::PATCH,
            &format!("/api/note/star/{id}"),
            Some(cookie),
            String::default(),
        )
        .await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[sqlx::test]
    async fn test_toggle_star_twice_restores(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        let cookie =
            testing::register(app.clone(), "Alice", "alice@example.com").await;
        let note = testing::create_note(
            app.clone(),
            &cookie,
            json!({"title": "T", "content": "C"}),
        )
        .await;
        assert!(!note.is_starred);

        let id = note.id.to_string();
        let (status, body) = toggle(app.clone(), &cookie, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["note"]["isStarred"], true);

        let (status, body) = toggle(app, &cookie, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["note"]["isStarred"], false);
    }

    #[sqlx::test]
    async fn test_star_foreign_note(pool: Pool<Postgres>) {
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

        let (status, body) =
            toggle(app, &bob, &note.id.to_string()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Note not found or unauthorized");
    }
}
