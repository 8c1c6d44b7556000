//! Error handler for Brainbin.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::Error as SQLxError;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("User already exists")]
    EmailTaken,

    #[error("Invalid email")]
    UnknownEmail,

    #[error("Invalid password")]
    WrongPassword,

    #[error("Not authorized, login again")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Note not found or unauthorized")]
    NoteNotFound,

    #[error("Invalid OTP")]
    OtpMismatch,

    #[error("OTP expired")]
    OtpExpired,

    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Crypto(#[from] crate::crypto::CryptoError),

    #[error("mail event failed: {0}")]
    Mail(#[from] lapin::Error),

    #[error("invalid AMQP scheme")]
    InvalidScheme,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("system clock before unix epoch")]
    Clock(#[from] std::time::SystemTimeError),

    #[error("internal server error, {details}")]
    Internal { details: String },
}

/// Uniform failure payload.
/// Every error leaves the server as `{"success": false, "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    success: bool,
    message: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    /// Update `message` field.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Transform [`ResponseError`] into axum [`Response`].
    fn into_response(self) -> std::result::Result<Response, axum::http::Error> {
        if let Ok(body) = serde_json::to_string(&self) {
            Response::builder()
                .status(self.status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
        } else {
            Ok(internal_server_error())
        }
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            success: false,
            message: "Internal server error".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flatten validator output into a single readable message.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, issues)| {
            issues.iter().map(move |issue| match &issue.message {
                Some(message) => message.to_string(),
                None => format!("Invalid field '{field}'."),
            })
        })
        .collect();
    parts.sort();
    parts.join(" ")
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_)
            | ServerError::Axum(_)
            | ServerError::OtpMismatch => StatusCode::BAD_REQUEST,
            ServerError::UnknownEmail
            | ServerError::WrongPassword
            | ServerError::Unauthorized
            | ServerError::Token(_) => StatusCode::UNAUTHORIZED,
            ServerError::UserNotFound | ServerError::NoteNotFound => {
                StatusCode::NOT_FOUND
            },
            ServerError::EmailTaken | ServerError::AlreadyVerified => {
                StatusCode::CONFLICT
            },
            ServerError::OtpExpired => StatusCode::GONE,
            ServerError::Sql(SQLxError::RowNotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response = ResponseError::default().status(status);

        let response = match &self {
            ServerError::Validation(errors) => {
                response.message(validation_message(errors))
            },

            ServerError::Axum(rejection) => {
                response.message(rejection.body_text())
            },

            ServerError::Token(_) => {
                response.message(ServerError::Unauthorized.to_string())
            },

            ServerError::Sql(SQLxError::RowNotFound) => {
                response.message("Not found")
            },

            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "server returned 500 status");
                response
            },

            _ => response.message(self.to_string()),
        };

        response
            .into_response()
            .unwrap_or_else(|_| internal_server_error())
    }
}

fn internal_server_error() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "success": false,
                "message": "Internal server error",
            })
            .to_string()
            .into(),
        )
        .unwrap_or_else(|_| Response::new("Internal server error".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::EmailTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::NoteNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::OtpMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServerError::OtpExpired.status_code(), StatusCode::GONE);
    }

    #[test]
    fn test_message_text() {
        assert_eq!(
            ServerError::NoteNotFound.to_string(),
            "Note not found or unauthorized"
        );
        assert_eq!(ServerError::OtpExpired.to_string(), "OTP expired");
    }
}
