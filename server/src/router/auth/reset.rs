//! Password reset through a one-time code.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::mail::Template;
use crate::otp;
use crate::router::{Ack, Valid};
use crate::user::UserRepository;
use crate::{AppState, ServerError};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SendBody {
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBody {
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(length(min = 1, message = "OTP is required."))]
    pub otp: String,
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must contain at least 8 characters."
    ))]
    pub new_password: String,
}

/// Handler generating and mailing a password-reset code.
pub async fn send_handler(
    State(state): State<AppState>,
    Valid(body): Valid<SendBody>,
) -> Result<Json<Ack>> {
    let repo = UserRepository::new(state.db.postgres.clone());
    let user = repo
        .find_by_email(&body.email.to_lowercase())
        .await?
        .ok_or(ServerError::UserNotFound)?;

    let code = otp::generate(state.config.otp.digits);
    let expires_at = otp::expiry(state.config.otp.ttl_hours);
    repo.set_reset_otp(user.id, &code, expires_at).await?;

    state
        .mail
        .publish_event(Template::ResetOtp, &user.email, &user.name, Some(&code))
        .await?;

    Ok(Json(Ack::new("OTP sent to your email.")))
}

/// Handler checking the submitted code and replacing the password.
pub async fn confirm_handler(
    State(state): State<AppState>,
    Valid(body): Valid<ConfirmBody>,
) -> Result<Json<Ack>> {
    let repo = UserRepository::new(state.db.postgres.clone());
    let user = repo
        .find_by_email(&body.email.to_lowercase())
        .await?
        .ok_or(ServerError::UserNotFound)?;

    otp::check(
        user.reset_otp.as_deref(),
        user.reset_otp_expires_at,
        &body.otp,
    )?;

    let password = state.crypto.hash_password(&body.new_password)?;
    repo.update_password(user.id, &password).await?;

    Ok(Json(Ack::new("Password has been reset successfully.")))
}
