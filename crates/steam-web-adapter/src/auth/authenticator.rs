/*
[INPUT]:  Session cookie or Web API key
[OUTPUT]: Requests carrying the caller's credentials
[POS]:    Auth layer - per-request authentication hook
[UPDATE]: When adding new authentication mechanisms
*/

use crate::http::{Cookie, ParameterKind, SteamRequest};
use crate::types::SteamUser;

/// Hook invoked by [`SteamClient`](crate::http::SteamClient) on every request
/// before it is composed.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, request: &mut SteamRequest);
}

/// Attaches the session cookie obtained from a successful login
#[derive(Debug, Clone, Default)]
pub struct CookieAuthenticator {
    auth_cookie: Option<Cookie>,
}

impl CookieAuthenticator {
    pub fn for_cookie(cookie: Cookie) -> Self {
        Self {
            auth_cookie: Some(cookie),
        }
    }

    /// Authenticator for `user`; does nothing if the user has no session cookie
    pub fn for_user(user: &SteamUser) -> Self {
        Self {
            auth_cookie: user.auth_cookie.clone(),
        }
    }

    pub fn auth_cookie(&self) -> Option<&Cookie> {
        self.auth_cookie.as_ref()
    }
}

impl Authenticator for CookieAuthenticator {
    fn authenticate(&self, request: &mut SteamRequest) {
        if let Some(cookie) = &self.auth_cookie {
            request.add_cookie(cookie.clone());
        }
    }
}

/// Adds the Web API `key` query parameter
#[derive(Debug, Clone)]
pub struct ApiKeyAuthenticator {
    key: String,
}

impl ApiKeyAuthenticator {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Authenticator for ApiKeyAuthenticator {
    fn authenticate(&self, request: &mut SteamRequest) {
        request.add_parameter("key", &self.key, ParameterKind::QueryString);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SteamId;

    #[test]
    fn test_cookie_authenticator_for_user() {
        let mut user = SteamUser::new(SteamId(76561198000000000));
        let mut request = SteamRequest::new("r");

        CookieAuthenticator::for_user(&user).authenticate(&mut request);
        assert!(request.cookies().is_empty());

        user.auth_cookie = Some(Cookie::new("steamLogin", "abc"));
        CookieAuthenticator::for_user(&user).authenticate(&mut request);
        assert_eq!(
            request.cookies().get("steamLogin").map(|c| c.value.as_str()),
            Some("abc")
        );
    }

    #[test]
    fn test_api_key_authenticator_is_idempotent() {
        let authenticator = ApiKeyAuthenticator::new("1241F1FF2496C1E6990F73E216C3C53D");
        let mut request = SteamRequest::new("r");

        authenticator.authenticate(&mut request);
        authenticator.authenticate(&mut request);

        assert_eq!(request.parameters().len(), 1);
        assert_eq!(
            request
                .parameters()
                .get("key", ParameterKind::QueryString)
                .map(|p| p.value.as_str()),
            Some("1241F1FF2496C1E6990F73E216C3C53D")
        );
    }
}
