/*
[INPUT]:  SteamRequest (method, data format, attached body, GetOrPost parameters)
[OUTPUT]: Wire body and content type for non-GET requests
[POS]:    HTTP layer - body encoding, no I/O
[UPDATE]: When body formats or precedence rules change
*/

use reqwest::Method;

use super::parameter::{ParameterKind, encode_pairs};
use super::request::{PostDataFormat, SteamRequest};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Encoded request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub content: String,
}

/// Body for `request`, or `None` when nothing goes in the body.
///
/// GET never has a body. An attached body wins over parameters for every
/// format. Under `Json` the `GetOrPost` parameters are dropped entirely.
pub fn encode_body(request: &SteamRequest) -> Option<RequestBody> {
    if *request.method() == Method::GET {
        return None;
    }

    if let Some(body) = request.body() {
        return Some(RequestBody {
            content_type: CONTENT_TYPE_JSON,
            content: body.to_string(),
        });
    }

    match request.data_format() {
        PostDataFormat::Json => None,
        PostDataFormat::Raw | PostDataFormat::FormUrlEncoded => {
            let content = encode_pairs(request.parameters().of_kind(ParameterKind::GetOrPost));
            if content.is_empty() {
                None
            } else {
                Some(RequestBody {
                    content_type: CONTENT_TYPE_FORM,
                    content,
                })
            }
        }
    }
}
