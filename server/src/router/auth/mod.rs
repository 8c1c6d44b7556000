//! Authentication and account lifecycle endpoints.

mod login;
mod logout;
mod register;
mod reset;
mod verify;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};

use crate::AppState;
use crate::router::Ack;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register::handler))
        .route("/login", post(login::handler))
        .route("/logout", post(logout::handler))
        .route("/send-verify-otp", post(verify::send_handler))
        .route("/verify-email", post(verify::confirm_handler))
        .route("/send-reset-otp", post(reset::send_handler))
        .route("/reset-password", post(reset::confirm_handler))
        .merge(
            Router::new()
                .route("/is-auth", get(is_auth))
                .route_layer(middleware::from_fn_with_state(
                    state,
                    crate::middleware::auth,
                )),
        )
}

/// Confirm the session cookie still authenticates its bearer.
async fn is_auth() -> Json<Ack> {
    Json(Ack::new("User is authenticated."))
}
