/*
[INPUT]:  HTTP configuration (base address, timeouts, user agent, authenticator)
[OUTPUT]: Executed SteamRequests as SteamResponses (async and blocking)
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::body::encode_body;
use super::error::{Result, SteamError};
use super::request::SteamRequest;
use super::response::SteamResponse;
use super::uri::compose;
use crate::auth::Authenticator;

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            user_agent: concat!("steam-web-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SteamError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SteamError::Config(format!("parse config: {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// HTTP client bound to one base address
pub struct SteamClient {
    http_client: Client,
    base_url: String,
    config: ClientConfig,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .field("authenticator", &self.authenticator.is_some())
            .finish()
    }
}

impl SteamClient {
    /// Create a new client with default configuration.
    ///
    /// The base address is not validated here; composing a request against
    /// a malformed one fails with [`SteamError::MalformedBaseAddress`].
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SteamError::Config(format!("build http client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            config,
            authenticator: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Authenticator applied to every request before it is sent
    pub fn set_authenticator(&mut self, authenticator: Arc<dyn Authenticator>) {
        self.authenticator = Some(authenticator);
    }

    pub fn clear_authenticator(&mut self) {
        self.authenticator = None;
    }

    /// Compose the URL `request` would be sent to
    pub fn build_uri(&self, request: &SteamRequest) -> Result<Url> {
        compose(&self.base_url, request)
    }

    /// Send `request` and return the raw response.
    ///
    /// Transport failures and timeouts are returned as
    /// [`SteamError::RequestIssue`]. A non-success status is not an error at
    /// this level; check [`SteamResponse::is_successful`].
    pub async fn execute(&self, request: &mut SteamRequest) -> Result<SteamResponse> {
        if let Some(authenticator) = &self.authenticator {
            authenticator.authenticate(request);
        }

        let url = self.build_uri(request)?;
        let body = encode_body(request);
        let timeout = request.timeout().unwrap_or_else(|| self.config.timeout());

        request.increase_attempts();
        debug!(
            method = %request.method(),
            path = url.path(),
            attempt = request.attempts(),
            "sending steam request"
        );

        let mut builder = self
            .http_client
            .request(request.method().clone(), url.clone())
            .timeout(timeout);

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(cookie_header) = request.cookies().header_value() {
            builder = builder.header(COOKIE, cookie_header);
        }

        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, body.content_type).body(body.content);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(path = url.path(), error = %err, "steam request failed");
            SteamError::from(err)
        })?;

        let response = SteamResponse::from_reqwest(response).await?;
        if !response.is_successful() {
            warn!(path = url.path(), status = %response.status(), "steam request returned non-success status");
        }

        Ok(response)
    }

    /// Blocking form of [`execute`](Self::execute).
    ///
    /// Must not be called from inside an async runtime.
    pub fn execute_blocking(&self, request: &mut SteamRequest) -> Result<SteamResponse> {
        block_on(self.execute(request))
    }
}

/// Run `future` to completion on a private current-thread runtime.
///
/// The future's own error is returned as is. Called from inside a tokio
/// runtime it fails with [`SteamError::Runtime`] instead of blocking a worker.
pub(crate) fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(SteamError::Runtime(std::io::Error::other(
            "blocking call made from inside an async runtime; use the async form",
        )));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SteamError::Runtime)?;
    runtime.block_on(future)
}
