//! List the caller's notes.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::note::{Note, NoteRepository};

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub notes: Vec<Note>,
}

/// Handler returning every note owned by the caller, newest update first.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Response>> {
    let notes = NoteRepository::new(state.db.postgres.clone())
        .list_for_user(user_id)
        .await?;

    Ok(Json(Response {
        success: true,
        notes,
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

    #[sqlx::test]
    async fn test_my_notes_without_session(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));

        let response = make_request(
            app,
            Method::GET,
            "/api/note/my-notes",
            None,
            String::default(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        // no note data on a rejected request.
        assert!(body.get("notes").is_none());
    }

    #[sqlx::test]
    async fn test_my_notes_scoped_to_owner(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        let alice =
            testing::register(app.clone(), "Alice", "alice@example.com").await;
        let bob =
            testing::register(app.clone(), "Bob", "bob@example.com").await;

        testing::create_note(
            app.clone(),
            &alice,
            json!({"title": "Hers", "content": "C"}),
        )
        .await;

        let response = make_request(
            app,
            Method::GET,
            "/api/note/my-notes",
            Some(&bob),
            String::default(),
        )
        .await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["notes"].as_array().unwrap().len(), 0);
    }

    #[sqlx::test]
    async fn test_my_notes_ordered_by_update(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        let cookie =
            testing::register(app.clone(), "Alice", "alice@example.com").await;

        let first = testing::create_note(
            app.clone(),
            &cookie,
            json!({"title": "first", "content": "C"}),
        )
        .await;
        testing::create_note(
            app.clone(),
            &cookie,
            json!({"title": "second", "content": "C"}),
        )
        .await;

        // editing the older note moves it back to the front.
        let response = make_request(
            app.clone(),
            Method::PUT,
            &format!("/api/note/update/{}", first.id),
            Some(&cookie),
            json!({"title": "first-edited", "content": "C"}).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = make_request(
            app,
            Method::GET,
            "/api/note/my-notes",
            Some(&cookie),
            String::default(),
        )
        .await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        let notes = body["notes"].as_array().unwrap();
        assert_eq!(notes[0]["title"], "first-edited");
        assert_eq!(notes[1]["title"], "second");
    }
}
