//! Note CRUD endpoints, all behind the session gate.

mod create;
mod delete;
mod list;
mod star;
mod update;

use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router, middleware};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::note::Note;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        // `POST /note/create` goes to `create`.
        .route("/create", post(create::handler))
        // `GET /note/my-notes` goes to `list`.
        .route("/my-notes", get(list::handler))
        // `PUT /note/update/:ID` goes to `update`.
        .route("/update/{id}", put(update::handler))
        // `DELETE /note/delete/:ID` goes to `delete`.
        .route("/delete/{id}", delete(delete::handler))
        // `PATCH /note/star/:ID` goes to `star`.
        .route("/star/{id}", patch(star::handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth,
        ))
}

/// Success payload carrying a single note.
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub success: bool,
    pub message: String,
    pub note: Note,
}

impl NoteResponse {
    pub fn new(message: impl Into<String>, note: Note) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            note,
        })
    }
}
