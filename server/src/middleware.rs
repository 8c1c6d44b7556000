//! Session gate for authenticated routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::config::Configuration;
use crate::error::Result;
use crate::{AppState, ServerError};

/// Resolved identity of the caller, attached as a request extension by
/// [`auth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Middleware authenticating the session cookie.
///
/// No cookie, or a cookie whose token does not verify, rejects the request
/// before the handler runs. Stateless: the token itself is the session.
pub async fn auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let Some(cookie) = jar.get(&state.config.cookie.name) else {
        return Err(ServerError::Unauthorized);
    };

    let claims = state
        .token
        .decode(cookie.value())
        .map_err(|_| ServerError::Unauthorized)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ServerError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}

/// Build the session cookie carrying `token`.
pub fn session_cookie(
    config: &Configuration,
    token: String,
) -> Cookie<'static> {
    Cookie::build((config.cookie.name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(config.cookie.max_age_days))
        .build()
}

/// Build a removal cookie matching [`session_cookie`]'s attributes.
pub fn expired_session_cookie(config: &Configuration) -> Cookie<'static> {
    Cookie::build((config.cookie.name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = Configuration::default();
        let cookie = session_cookie(&config, "abc".into());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let config = Configuration::default();
        let cookie = expired_session_cookie(&config);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
