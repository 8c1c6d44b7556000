//! Account data for the logged-in user.

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router, middleware};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::user::{User, UserRepository};
use crate::{AppState, ServerError};

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/data", get(handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth,
        ))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    pub user_data: User,
}

/// Handler returning the caller's own record.
pub async fn handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Response>> {
    let user = UserRepository::new(state.db.postgres.clone())
        .find_by_id(user_id)
        .await?
        .ok_or(ServerError::UserNotFound)?;

    Ok(Json(Response {
        success: true,
        user_data: user,
    }))
}
