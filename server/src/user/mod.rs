mod repository;

pub use repository::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as saved on database.
///
/// Secret columns never serialize: responses embedding a [`User`] only expose
/// identity and verification state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(rename = "isAccountVerified")]
    pub is_verified: bool,
    #[serde(skip)]
    pub verify_otp: Option<String>,
    #[serde(skip)]
    pub verify_otp_expires_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub reset_otp: Option<String>,
    #[serde(skip)]
    pub reset_otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
