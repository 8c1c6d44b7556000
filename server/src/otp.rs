//! One-time codes for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::rngs::OsRng;

use crate::error::{Result, ServerError};

/// Generates a numeric code of exactly `digits` digits.
///
/// The first digit is never zero, so the code survives clients that parse it
/// as a number.
pub fn generate(digits: u32) -> String {
    let upper = 10u32.pow(digits);
    OsRng.gen_range(upper / 10..upper).to_string()
}

/// Expiry timestamp for a code issued now.
pub fn expiry(ttl_hours: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(ttl_hours)
}

/// Check a submitted code against the stored one.
///
/// The mismatch check runs before the expiry check: a wrong code is always
/// "Invalid OTP", an expired-but-correct code is "OTP expired".
pub fn check(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    submitted: &str,
) -> Result<()> {
    match stored {
        Some(code) if !code.is_empty() && code == submitted => {},
        _ => return Err(ServerError::OtpMismatch),
    }

    match expires_at {
        Some(at) if at > Utc::now() => Ok(()),
        _ => Err(ServerError::OtpExpired),
    }
}
