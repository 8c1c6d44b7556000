//! Create a note owned by the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::note::{NoteFields, NoteRepository};
use crate::router::Valid;
use crate::router::note::NoteResponse;

/// Handler persisting a new note for the authenticated owner.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Valid(fields): Valid<NoteFields>,
) -> Result<(StatusCode, Json<NoteResponse>)> {
    let note = NoteRepository::new(state.db.postgres.clone())
        .insert(user_id, &fields)
        .await?;

    Ok((StatusCode::CREATED, NoteResponse::new("Note created.", note)))
}
