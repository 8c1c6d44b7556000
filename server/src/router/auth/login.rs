//! Open a session against an existing account.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::middleware::session_cookie;
use crate::router::{Ack, Valid};
use crate::user::UserRepository;
use crate::{AppState, ServerError};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Handler to authenticate credentials and issue the session cookie.
pub async fn handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Valid(body): Valid<Body>,
) -> Result<(CookieJar, Json<Ack>)> {
    let repo = UserRepository::new(state.db.postgres.clone());
    let user = repo
        .find_by_email(&body.email.to_lowercase())
        .await?
        .ok_or(ServerError::UnknownEmail)?;

    state
        .crypto
        .verify_password(&body.password, &user.password)
        .map_err(|_| ServerError::WrongPassword)?;

    let token = state.token.create(&user.id.to_string())?;
    let jar = jar.add(session_cookie(&state.config, token));

    Ok((jar, Json(Ack::new("Login successful."))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::{Pool, Postgres};

    use crate::router::testing;
    use crate::{app, make_request};

    #[sqlx::test]
    async fn test_login_wrong_password(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        testing::register(app.clone(), "Alice", "alice@example.com").await;

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            json!({
                "email": "alice@example.com",
                "password": "wrong-password",
            })
            .to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        // no session cookie on a failed login.
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid password");
    }

    #[sqlx::test]
    async fn test_login_unknown_email(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            json!({
                "email": "nobody@example.com",
                "password": "whatever-password",
            })
            .to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[sqlx::test]
    async fn test_login_email_case_insensitive(pool: Pool<Postgres>) {
        let app = app(testing::state(pool));
        testing::register(app.clone(), "Alice", "alice@example.com").await;

        let response = make_request(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            json!({
                "email": "Alice@Example.com",
                "password": "P$ssW0rd-brainbin",
            })
            .to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }
}
