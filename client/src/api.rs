//! HTTP client for the Brainbin REST API.
//!
//! The session cookie lives in the reqwest cookie store, so one client holds
//! one session. Every response body carries a `success` flag; callers inspect
//! that flag through [`ClientError::Api`], never the transport status alone.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{Note, NoteFields, UserData};

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct NoteEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    note: Option<Note>,
}

#[derive(Debug, Deserialize)]
struct NotesEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDataEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    user_data: Option<UserData>,
}

#[derive(Debug, Serialize)]
struct RegisterPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPayload<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

/// Credentialed client for the Brainbin API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client against `base_url` (e.g. `http://localhost:4000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // a non-empty path must end with '/' for join() to append.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base })
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.base.join(path)?;
        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.inspect_err(|err| {
            tracing::warn!(%method, path, error = %err, "request failed");
        })?;

        Ok(response.json::<T>().await?)
    }

    fn ok<T>(success: bool, message: String, value: T) -> Result<T> {
        if success {
            Ok(value)
        } else {
            Err(ClientError::Api(message))
        }
    }

    /// `POST /api/auth/register`. On success the session cookie is stored.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String> {
        let body = RegisterPayload {
            name,
            email,
            password,
        };
        let env: Envelope = self
            .request(Method::POST, "api/auth/register", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `POST /api/auth/login`. On success the session cookie is stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = LoginPayload { email, password };
        let env: Envelope = self
            .request(Method::POST, "api/auth/login", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `POST /api/auth/logout`.
    pub async fn logout(&self) -> Result<()> {
        let env: Envelope = self
            .request::<(), _>(Method::POST, "api/auth/logout", None)
            .await?;
        Self::ok(env.success, env.message, ())
    }

    /// `GET /api/auth/is-auth`: whether the stored cookie still authenticates.
    pub async fn is_auth(&self) -> Result<bool> {
        let env: Envelope = self
            .request::<(), _>(Method::GET, "api/auth/is-auth", None)
            .await?;
        Ok(env.success)
    }

    /// `POST /api/auth/send-verify-otp`.
    pub async fn send_verify_otp(&self, user_id: &str) -> Result<String> {
        let body = serde_json::json!({ "userId": user_id });
        let env: Envelope = self
            .request(Method::POST, "api/auth/send-verify-otp", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `POST /api/auth/verify-email`.
    pub async fn verify_email(
        &self,
        user_id: &str,
        otp: &str,
    ) -> Result<String> {
        let body = serde_json::json!({ "userId": user_id, "otp": otp });
        let env: Envelope = self
            .request(Method::POST, "api/auth/verify-email", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `POST /api/auth/send-reset-otp`.
    pub async fn send_reset_otp(&self, email: &str) -> Result<String> {
        let body = serde_json::json!({ "email": email });
        let env: Envelope = self
            .request(Method::POST, "api/auth/send-reset-otp", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `POST /api/auth/reset-password`.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<String> {
        let body = ResetPayload {
            email,
            otp,
            new_password,
        };
        let env: Envelope = self
            .request(Method::POST, "api/auth/reset-password", Some(&body))
            .await?;
        Self::ok(env.success, env.message.clone(), env.message)
    }

    /// `GET /api/user/data`.
    pub async fn user_data(&self) -> Result<UserData> {
        let env: UserDataEnvelope = self
            .request::<(), _>(Method::GET, "api/user/data", None)
            .await?;
        match env.user_data {
            Some(data) if env.success => Ok(data),
            _ => Err(ClientError::Api(env.message)),
        }
    }

    /// `POST /api/note/create`.
    pub async fn create_note(&self, fields: &NoteFields) -> Result<Note> {
        let env: NoteEnvelope = self
            .request(Method::POST, "api/note/create", Some(fields))
            .await?;
        match env.note {
            Some(note) if env.success => Ok(note),
            _ => Err(ClientError::Api(env.message)),
        }
    }

    /// `GET /api/note/my-notes`.
    pub async fn my_notes(&self) -> Result<Vec<Note>> {
        let env: NotesEnvelope = self
            .request::<(), _>(Method::GET, "api/note/my-notes", None)
            .await?;
        Self::ok(env.success, env.message, env.notes)
    }

    /// `PUT /api/note/update/{id}`.
    pub async fn update_note(
        &self,
        id: &str,
        fields: &NoteFields,
    ) -> Result<Note> {
        let env: NoteEnvelope = self
            .request(
                Method::PUT,
                &format!("api/note/update/{id}"),
                Some(fields),
            )
            .await?;
        match env.note {
            Some(note) if env.success => Ok(note),
            _ => Err(ClientError::Api(env.message)),
        }
    }

    /// `DELETE /api/note/delete/{id}`.
    pub async fn delete_note(&self, id: &str) -> Result<()> {
        let env: Envelope = self
            .request::<(), _>(
                Method::DELETE,
                &format!("api/note/delete/{id}"),
                None,
            )
            .await?;
        Self::ok(env.success, env.message, ())
    }

    /// `PATCH /api/note/star/{id}`.
    pub async fn toggle_star(&self, id: &str) -> Result<Note> {
        let env: NoteEnvelope = self
            .request::<(), _>(
                Method::PATCH,
                &format!("api/note/star/{id}"),
                None,
            )
            .await?;
        match env.note {
            Some(note) if env.success => Ok(note),
            _ => Err(ClientError::Api(env.message)),
        }
    }
}
