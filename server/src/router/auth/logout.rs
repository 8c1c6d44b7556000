//! Close the current session.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;
use crate::middleware::expired_session_cookie;
use crate::router::Ack;

/// Handler clearing the session cookie, whether or not one was sent.
pub async fn handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Ack>) {
    let jar = jar.add(expired_session_cookie(&state.config));
    (jar, Json(Ack::new("Logged out.")))
}
