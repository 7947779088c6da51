/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Steam Web API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    ApiKeyAuthenticator,
    Authenticator,
    CaptchaChallenge,
    CookieAuthenticator,
    LoginManager,
    LoginResult,
    SteamGuardChallenge,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Cookie,
    ParameterKind,
    PostDataFormat,
    Result,
    SteamClient,
    SteamError,
    SteamRequest,
    SteamResponse,
};

// Re-export all types
pub use types::*;
