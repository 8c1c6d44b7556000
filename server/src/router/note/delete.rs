//! Delete an owned note.

use axum::Json;
use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::note::NoteRepository;
use crate::router::Ack;
use crate::{AppState, ServerError};

/// Handler removing an owned note.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>> {
    let deleted = NoteRepository::new(state.db.postgres.clone())
        .delete(user_id, id)
        .await?;

    if !deleted {
        return Err(ServerError::NoteNotFound);
    }

    Ok(Json(Ack::new("Note deleted.")))
}
