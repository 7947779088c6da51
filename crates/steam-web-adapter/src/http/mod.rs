/*
[INPUT]:  Base addresses, request descriptions and client configuration
[OUTPUT]: Composed URIs, HTTP responses and typed API results
[POS]:    HTTP layer - Steam Web API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod body;
pub mod client;
pub mod cookie;
pub mod error;
pub mod parameter;
pub mod player_service;
pub mod request;
pub mod response;
pub mod uri;

pub use error::{Result, SteamError};

pub use body::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, RequestBody, encode_body};
pub use client::{ClientConfig, SteamClient};
pub(crate) use client::block_on;
pub use cookie::{Cookie, CookieSet};
pub use parameter::{Parameter, ParameterKind, ParameterSet, url_encode};
pub use request::{PostDataFormat, SteamRequest};
pub use response::SteamResponse;
pub use uri::{compose, query_parameters};
