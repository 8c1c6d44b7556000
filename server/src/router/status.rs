//! Instance status document.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::config::Configuration;

/// Handler serving the public instance metadata.
///
/// Secret sections (token, postgres, mail) skip serialization, so the
/// document only exposes name, url and version.
pub async fn handler(State(state): State<AppState>) -> Json<Configuration> {
    Json(state.config.as_ref().clone())
}
