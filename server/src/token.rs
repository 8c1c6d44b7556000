//! Manage json web tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default token lifetime in seconds. 7 days, same as the session cookie.
pub const EXPIRATION_TIME: u64 = 60 * 60 * 24 * 7;

/// Pieces of information asserted on a JWT.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Identifies the expiration time on or after which the JWT must not be
    /// accepted for processing.
    pub exp: u64,
    /// Identifies the time at which the JWT was issued.
    pub iat: u64,
    /// Identifies the organization that issued the JWT.
    pub iss: String,
    /// User ID.
    pub sub: String,
}

/// Manage JWT tokens.
#[derive(Clone)]
pub struct TokenManager {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    name: String,
    expires_in: u64,
}

impl TokenManager {
    /// Create a new [`TokenManager`] instance.
    pub fn new(name: &str, secret: &str, expires_in_days: Option<i64>) -> Self {
        let expires_in = expires_in_days
            .map(|days| days as u64 * 60 * 60 * 24)
            .unwrap_or(EXPIRATION_TIME);

        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            name: name.to_owned(),
            expires_in,
        }
    }

    /// Create a new signed token asserting `user_id`.
    pub fn create(&self, user_id: &str) -> Result<String> {
        let time = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let header = Header::new(self.algorithm);
        let claims = Claims {
            exp: time + self.expires_in,
            iat: time,
            iss: self.name.clone(),
            sub: user_id.to_owned(),
        };

        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Decode and check a token.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        Ok(decode::<Claims>(token, &self.decoding_key, &validation)?.claims)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("algorithm", &self.algorithm)
            .field("name", &self.name)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_decode() {
        let manager = TokenManager::new("brainbin", "test-secret", None);

        let token = manager.create("6b9e7d1c-user").unwrap();
        let claims = manager.decode(&token).unwrap();
        assert_eq!(claims.sub, "6b9e7d1c-user");
        assert_eq!(claims.iss, "brainbin");
        assert_eq!(claims.exp, claims.iat + EXPIRATION_TIME);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = TokenManager::new("brainbin", "test-secret", None);
        let other = TokenManager::new("brainbin", "another-secret", None);

        let token = manager.create("user").unwrap();
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let manager = TokenManager::new("brainbin", "test-secret", None);
        assert!(manager.decode("not-a-jwt").is_err());
    }
}
