//! Email verification through a one-time code.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::mail::Template;
use crate::otp;
use crate::router::{Ack, Valid};
use crate::user::{User, UserRepository};
use crate::{AppState, ServerError};

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendBody {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBody {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "OTP is required."))]
    pub otp: String,
}

async fn unverified_user(
    state: &AppState,
    user_id: Uuid,
) -> Result<(UserRepository, User)> {
    let repo = UserRepository::new(state.db.postgres.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or(ServerError::UserNotFound)?;

    if user.is_verified {
        return Err(ServerError::AlreadyVerified);
    }

    Ok((repo, user))
}

/// Handler generating and mailing a verification code.
pub async fn send_handler(
    State(state): State<AppState>,
    Valid(body): Valid<SendBody>,
) -> Result<Json<Ack>> {
    let (repo, user) = unverified_user(&state, body.user_id).await?;

    let code = otp::generate(state.config.otp.digits);
    let expires_at = otp::expiry(state.config.otp.ttl_hours);
    repo.set_verify_otp(user.id, &code, expires_at).await?;

    state
        .mail
        .publish_event(Template::VerifyOtp, &user.email, &user.name, Some(&code))
        .await?;

    Ok(Json(Ack::new("OTP sent to email.")))
}

/// Handler checking the submitted code and marking the account verified.
pub async fn confirm_handler(
    State(state): State<AppState>,
    Valid(body): Valid<ConfirmBody>,
) -> Result<Json<Ack>> {
    let (repo, user) = unverified_user(&state, body.user_id).await?;

    otp::check(
        user.verify_otp.as_deref(),
        user.verify_otp_expires_at,
        &body.otp,
    )?;
    repo.mark_verified(user.id).await?;

    Ok(Json(Ack::new("Email verified successfully.")))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::{Pool, Postgres};

    use crate::router::testing;
    use crate::user::UserRepository;
    use crate::{app, make_request};

    async fn registered_user_id(pool: &Pool<Postgres>) -> uuid::Uuid {
        UserRepository::new(pool.clone())
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap()
            .id
    }

    #[sqlx::test]
    async fn test_verify_email_roundtrip(pool: Pool<Postgres>) {
        let app = app(testing::state(pool.clone()));
        testing::register(app.clone(), "Alice", "alice@example.com").await;
        let user_id = registered_user_id(&pool).await;

        let response = make_request(
            app.clone(),
            Method::POST,
            "/api/auth/send-verify-otp",
            None,
            json!({"userId": user_id}).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        // read the code back, as the mail would have carried it.
        let repo = UserRepository::new(pool.clone());
        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        let code = user.verify_otp.unwrap();

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/verify-email",
            None,
            json!({"userId": user_id, "otp": code}).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert!(user.is_verified);
        // code cleared after use.
        assert!(user.verify_otp.is_none());
        assert!(user.verify_otp_expires_at.is_none());
    }

    #[sqlx::test]
    async fn test_verify_email_wrong_code(pool: Pool<Postgres>) {
        let app = app(testing::state(pool.clone()));
        testing::register(app.clone(), "Alice", "alice@example.com").await;
        let user_id = registered_user_id(&pool).await;

        make_request(
            app.clone(),
            Method::POST,
            "/api/auth/send-verify-otp",
            None,
            json!({"userId": user_id}).to_string(),
        )
        .await;

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/verify-email",
            None,
            json!({"userId": user_id, "otp": "000000"}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Invalid OTP");
    }

    #[sqlx::test]
    async fn test_verify_email_expired_code(pool: Pool<Postgres>) {
        let app = app(testing::state(pool.clone()));
        testing::register(app.clone(), "Alice", "alice@example.com").await;
        let user_id = registered_user_id(&pool).await;

        // store a correct code that is already past its expiry.
        let repo = UserRepository::new(pool.clone());
        repo.set_verify_otp(user_id, "482913", Utc::now() - Duration::hours(1))
            .await
            .unwrap();

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/verify-email",
            None,
            json!({"userId": user_id, "otp": "482913"}).to_string(),
        )
        .await;

        // correct-but-expired is an expiry error, not a mismatch.
        assert_eq!(response.status(), StatusCode::GONE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "OTP expired");
    }

    #[sqlx::test]
    async fn test_send_verify_otp_already_verified(pool: Pool<Postgres>) {
        let app = app(testing::state(pool.clone()));
        testing::register(app.clone(), "Alice", "alice@example.com").await;
        let user_id = registered_user_id(&pool).await;

        UserRepository::new(pool.clone())
            .mark_verified(user_id)
            .await
            .unwrap();

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/send-verify-otp",
            None,
            json!({"userId": user_id}).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
