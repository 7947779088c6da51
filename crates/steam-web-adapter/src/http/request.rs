/*
[INPUT]:  Resource template, method, parameters, headers, cookies, body object
[OUTPUT]: SteamRequest descriptor consumed by the URI composer and body encoder
[POS]:    HTTP layer - per-call request state
[UPDATE]: When adding request options or builder operations
*/

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use super::cookie::{Cookie, CookieSet};
use super::error::Result;
use super::parameter::{Parameter, ParameterKind, ParameterSet};
use crate::types::{MethodVersion, SteamInterface};

/// Body format used for non-GET requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostDataFormat {
    /// `GetOrPost` parameters sent as `name=value&...`
    #[default]
    Raw,
    /// Only an attached body object is sent; `GetOrPost` parameters are dropped
    Json,
    /// Same wire shape as `Raw`
    FormUrlEncoded,
}

/// State for one logical call to the Steam API.
///
/// A request is mutated through its builder methods, handed to
/// [`SteamClient::execute`](super::SteamClient::execute) and may be executed
/// again for a retry. Only the executing client bumps the attempt counter.
/// Taking `&mut SteamRequest` for a send keeps a single writer per request.
#[derive(Debug, Clone)]
pub struct SteamRequest {
    resource: String,
    method: Method,
    data_format: PostDataFormat,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    cookies: CookieSet,
    parameters: ParameterSet,
    body: Option<String>,
    attempts: u32,
}

impl SteamRequest {
    /// GET request against `resource` (relative to the client's base address)
    pub fn new(resource: impl Into<String>) -> Self {
        Self::with_method(resource, Method::GET)
    }

    pub fn with_method(resource: impl Into<String>, method: Method) -> Self {
        Self {
            resource: resource.into(),
            method,
            data_format: PostDataFormat::default(),
            timeout: None,
            headers: Vec::new(),
            cookies: CookieSet::new(),
            parameters: ParameterSet::new(),
            body: None,
            attempts: 0,
        }
    }

    /// GET request for `<Interface>/<Method>/v<NNNN>/`
    pub fn for_interface(interface: SteamInterface, method: &str, version: MethodVersion) -> Self {
        Self::new(format!("{interface}/{method}/{version}/"))
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn data_format(&self) -> PostDataFormat {
        self.data_format
    }

    /// Per-request timeout; `None` falls back to the client default
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn cookies(&self) -> &CookieSet {
        &self.cookies
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Serialized body attached with [`add_body`](Self::add_body)
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Number of times this request has been sent
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn set_data_format(&mut self, data_format: PostDataFormat) -> &mut Self {
        self.data_format = data_format;
        self
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a parameter, replacing any previous one with the same name and kind
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl ToString,
        kind: ParameterKind,
    ) -> &mut Self {
        self.add_param(Parameter::new(name, value, kind))
    }

    /// Add a parameter whose value is already percent-encoded
    pub fn add_pre_encoded_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl ToString,
        kind: ParameterKind,
    ) -> &mut Self {
        self.add_param(Parameter::pre_encoded(name, value, kind))
    }

    pub fn add_param(&mut self, param: Parameter) -> &mut Self {
        self.parameters.upsert(param);
        self
    }

    /// Register a value for the `{name}` token in the resource
    pub fn add_url_segment(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.add_parameter(name, value, ParameterKind::UrlSegment)
    }

    /// Set a header; the last value for a name wins
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn add_cookie(&mut self, cookie: Cookie) -> &mut Self {
        self.cookies.insert(cookie);
        self
    }

    /// Serialize `body` to JSON and send it as the request body.
    ///
    /// An attached body takes precedence over `GetOrPost` parameters, which
    /// are kept but not sent in the body.
    pub fn add_body<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<&mut Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub(crate) fn increase_attempts(&mut self) {
        self.attempts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_default() {
        let request = SteamRequest::new("/resource");
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.attempts(), 0);
        assert_eq!(request.data_format(), PostDataFormat::Raw);
    }

    #[test]
    fn test_add_two_of_same_parameter() {
        let mut request = SteamRequest::new("/resource");
        request
            .add_parameter("MyFancyParam", 1234, ParameterKind::GetOrPost)
            .add_parameter("MyFancyParam", 5678, ParameterKind::GetOrPost);

        let matching: Vec<_> = request
            .parameters()
            .iter()
            .filter(|param| param.name == "MyFancyParam")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].value, "5678");
    }

    #[test]
    fn test_for_interface_resource() {
        let request = SteamRequest::for_interface(
            SteamInterface::PlayerService,
            "GetOwnedGames",
            MethodVersion::V0001,
        );
        assert_eq!(request.resource(), "IPlayerService/GetOwnedGames/v0001/");
    }

    #[test]
    fn test_header_last_value_wins() {
        let mut request = SteamRequest::new("r");
        request
            .add_header("X-Custom", "one")
            .add_header("Accept", "*/*")
            .add_header("x-custom", "two");

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()[0].1, "two");
    }

    #[test]
    fn test_add_body_keeps_get_or_post_parameters() {
        let mut request = SteamRequest::with_method("r", Method::POST);
        request.add_parameter("p", 1, ParameterKind::GetOrPost);
        request
            .add_body(&serde_json::json!({"hello": "world"}))
            .unwrap();

        assert_eq!(request.body(), Some(r#"{"hello":"world"}"#));
        assert!(request.parameters().get("p", ParameterKind::GetOrPost).is_some());
    }

    #[test]
    fn test_increase_attempts() {
        let mut request = SteamRequest::new("r");
        request.increase_attempts();
        request.increase_attempts();
        assert_eq!(request.attempts(), 2);
    }
}
