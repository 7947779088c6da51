/*
[INPUT]:  Error sources (composition, transport, deserialization, handshake, crypto)
[OUTPUT]: Structured error types carrying the raw response where available
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use super::response::SteamResponse;

/// Main error type for the Steam adapter
#[derive(Error, Debug)]
pub enum SteamError {
    /// Base address could not be parsed as an absolute URI; nothing was sent
    #[error("Malformed base address '{base}': {reason}")]
    MalformedBaseAddress { base: String, reason: String },

    /// Transport failure, timeout or non-success status
    #[error("Request issue: {message}")]
    RequestIssue {
        message: String,
        status: Option<StatusCode>,
        response: Option<Box<SteamResponse>>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response body did not match the expected structure
    #[error("Deserialization issue: {message}")]
    Deserialization {
        message: String,
        content: Option<String>,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Username (or other credential input) rejected by the server
    #[error("Invalid credential input: {message}")]
    InvalidCredentialInput {
        message: String,
        response: Option<Box<SteamResponse>>,
    },

    /// RSA or AES primitive failed
    #[error("Crypto error: {message}")]
    Crypto { message: String },

    /// Attaching a body object failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking entry point could not start its runtime
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

impl SteamError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            SteamError::RequestIssue { status, .. } => match status {
                Some(status) => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
                None => true,
            },
            _ => false,
        }
    }

    /// Check if the error came from the transport or a non-success status
    pub fn is_request_issue(&self) -> bool {
        matches!(self, SteamError::RequestIssue { .. })
    }

    /// Check if the error came from decoding a response body
    pub fn is_deserialization_issue(&self) -> bool {
        matches!(self, SteamError::Deserialization { .. })
    }

    /// Raw response behind a request issue or rejected credentials, if one was received
    pub fn response(&self) -> Option<&SteamResponse> {
        match self {
            SteamError::RequestIssue { response, .. }
            | SteamError::InvalidCredentialInput { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    /// Build a request issue from a response with a non-success status
    pub fn unsuccessful(message: impl Into<String>, response: SteamResponse) -> Self {
        SteamError::RequestIssue {
            message: message.into(),
            status: Some(response.status()),
            response: Some(Box::new(response)),
            source: None,
        }
    }

    /// Build a deserialization issue keeping the body that failed to parse
    pub fn deserialization(
        message: impl Into<String>,
        content: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        SteamError::Deserialization {
            message: message.into(),
            content: Some(content.into()),
            source,
        }
    }

    pub(crate) fn crypto(message: impl Into<String>) -> Self {
        SteamError::Crypto {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SteamError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };

        SteamError::RequestIssue {
            message,
            status: err.status(),
            response: None,
            source: Some(err),
        }
    }
}

/// Result type alias for Steam adapter operations
pub type Result<T> = std::result::Result<T, SteamError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn request_issue(status: Option<StatusCode>) -> SteamError {
        SteamError::RequestIssue {
            message: "boom".to_string(),
            status,
            response: None,
            source: None,
        }
    }

    #[test]
    fn test_error_retryable() {
        assert!(request_issue(None).is_retryable());
        assert!(request_issue(Some(StatusCode::BAD_GATEWAY)).is_retryable());
        assert!(request_issue(Some(StatusCode::TOO_MANY_REQUESTS)).is_retryable());
        assert!(!request_issue(Some(StatusCode::FORBIDDEN)).is_retryable());

        let err = SteamError::InvalidCredentialInput {
            message: "bad username".to_string(),
            response: None,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_kind_predicates() {
        assert!(request_issue(None).is_request_issue());
        assert!(!request_issue(None).is_deserialization_issue());

        let err = SteamError::deserialization("bad body", "not json", None);
        assert!(err.is_deserialization_issue());
        match err {
            SteamError::Deserialization { content, .. } => {
                assert_eq!(content.as_deref(), Some("not json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_base_display() {
        let err = SteamError::MalformedBaseAddress {
            base: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed base address 'nope': relative URL without a base"
        );
    }
}
