/*
[INPUT]:  reqwest responses
[OUTPUT]: SteamResponse (status, body text, headers, cookies) and typed decoding
[POS]:    HTTP layer - collaborator contract returned by execute
[UPDATE]: When response metadata or decoding rules change
*/

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use super::cookie::{Cookie, CookieSet};
use super::error::{Result, SteamError};

/// Raw response returned by [`SteamClient::execute`](super::SteamClient::execute)
#[derive(Debug, Clone)]
pub struct SteamResponse {
    status: StatusCode,
    content: String,
    headers: HeaderMap,
    cookies: CookieSet,
}

impl SteamResponse {
    pub fn new(status: StatusCode, content: impl Into<String>) -> Self {
        Self {
            status,
            content: content.into(),
            headers: HeaderMap::new(),
            cookies: CookieSet::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.insert(cookie);
        self
    }

    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let cookies: CookieSet = response.cookies().map(Cookie::from).collect();
        let content = response.text().await?;

        Ok(Self {
            status,
            content,
            headers,
            cookies,
        })
    }

    /// True for 2xx statuses
    pub fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn cookies(&self) -> &CookieSet {
        &self.cookies
    }

    /// Decode the body as JSON; a non-success status is a request issue
    pub fn verify_and_deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_successful() {
            return Err(SteamError::unsuccessful(
                format!("Steam returned HTTP {}", self.status),
                self.clone(),
            ));
        }

        serde_json::from_str(&self.content).map_err(|err| {
            SteamError::deserialization(
                format!("Unable to deserialize response: {err}"),
                self.content.clone(),
                Some(err),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_verify_and_deserialize_success() {
        let response = SteamResponse::new(StatusCode::OK, r#"{"value": 7}"#);
        let payload: Payload = response.verify_and_deserialize().unwrap();
        assert_eq!(payload, Payload { value: 7 });
    }

    #[test]
    fn test_verify_and_deserialize_unsuccessful_is_request_issue() {
        let response = SteamResponse::new(StatusCode::FORBIDDEN, r#"{"value": 7}"#);
        let err = response.verify_and_deserialize::<Payload>().unwrap_err();

        assert!(err.is_request_issue());
        assert_eq!(err.response().map(|r| r.status()), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_verify_and_deserialize_bad_body() {
        let response = SteamResponse::new(StatusCode::OK, "<html>");
        let err = response.verify_and_deserialize::<Payload>().unwrap_err();

        match err {
            SteamError::Deserialization { content, source, .. } => {
                assert_eq!(content.as_deref(), Some("<html>"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
