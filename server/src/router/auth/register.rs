//! Create a new account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::mail::Template;
use crate::middleware::session_cookie;
use crate::router::{Ack, Valid};
use crate::user::{User, UserRepository};
use crate::{AppState, ServerError};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must contain at least 8 characters."
    ))]
    pub password: String,
}

/// Handler to create a user and open its first session.
pub async fn handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, CookieJar, Json<Ack>)> {
    let email = body.email.to_lowercase();
    let repo = UserRepository::new(state.db.postgres.clone());

    if repo.find_by_email(&email).await?.is_some() {
        return Err(ServerError::EmailTaken);
    }

    let user = User {
        id: Uuid::new_v4(),
        name: body.name,
        email,
        password: state.crypto.hash_password(&body.password)?,
        is_verified: false,
        verify_otp: None,
        verify_otp_expires_at: None,
        reset_otp: None,
        reset_otp_expires_at: None,
        created_at: Utc::now(),
    };
    repo.insert(&user).await?;

    state
        .mail
        .publish_event(Template::Welcome, &user.email, &user.name, None)
        .await?;

    let token = state.token.create(&user.id.to_string())?;
    let jar = jar.add(session_cookie(&state.config, token));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(Ack::new("Registration successful.")),
    ))
}
