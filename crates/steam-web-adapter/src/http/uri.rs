/*
[INPUT]:  Base address string and a SteamRequest
[OUTPUT]: Fully resolved request URL (segments substituted, query assembled)
[POS]:    HTTP layer - URI composition, no I/O
[UPDATE]: When path joining or query placement rules change
*/

use reqwest::Method;
use url::Url;

use super::error::{Result, SteamError};
use super::parameter::{Parameter, ParameterKind, encode_pairs, url_encode};
use super::request::SteamRequest;

/// Compose the URL for `request` against `base_address`.
///
/// One slash always separates the base path and the resource, whatever
/// either side carries. A query on the base address is kept ahead of the
/// request's own query.
///
/// `{name}` tokens are replaced by `UrlSegment` parameters, with the value
/// percent-encoded as a single path segment unless it is pre-encoded. Tokens
/// with no matching segment stay in the path as a literal, which the URL
/// renders as `%7Bname%7D`.
///
/// The query string holds every `QueryString` parameter, plus `GetOrPost`
/// parameters for GET.
pub fn compose(base_address: &str, request: &SteamRequest) -> Result<Url> {
    let mut url = Url::parse(base_address).map_err(|err| SteamError::MalformedBaseAddress {
        base: base_address.to_string(),
        reason: err.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(SteamError::MalformedBaseAddress {
            base: base_address.to_string(),
            reason: "not a hierarchical absolute URI".to_string(),
        });
    }

    let resource = substitute_segments(request);
    let (resource_path, resource_query) = match resource.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (resource.as_str(), None),
    };

    let base_path = url.path();
    let base_path = base_path.strip_suffix('/').unwrap_or(base_path);
    let resource_path = resource_path.strip_prefix('/').unwrap_or(resource_path);
    let path = format!("{base_path}/{resource_path}");

    let parameter_query = encode_pairs(query_parameters(request));
    let query = [url.query(), resource_query, Some(parameter_query.as_str())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("&");

    url.set_path(&path);
    url.set_query((!query.is_empty()).then_some(query.as_str()));
    url.set_fragment(None);

    Ok(url)
}

/// Parameters that belong in the query string for this request's method
pub fn query_parameters(request: &SteamRequest) -> impl Iterator<Item = &Parameter> {
    let include_get_or_post = *request.method() == Method::GET;
    request.parameters().iter().filter(move |param| match param.kind {
        ParameterKind::QueryString => true,
        ParameterKind::GetOrPost => include_get_or_post,
        ParameterKind::UrlSegment => false,
    })
}

fn substitute_segments(request: &SteamRequest) -> String {
    request
        .parameters()
        .of_kind(ParameterKind::UrlSegment)
        .fold(request.resource().to_string(), |resource, segment| {
            resource.replace(&format!("{{{}}}", segment.name), &encode_segment(segment))
        })
}

/// Percent-encode a segment value so it stays one path segment
fn encode_segment(segment: &Parameter) -> String {
    if segment.is_pre_encoded {
        return segment.value.clone();
    }
    url_encode(segment.value.as_bytes()).replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://steamapiurl.com/", "/resource")]
    #[case("http://steamapiurl.com/", "resource")]
    #[case("http://steamapiurl.com", "/resource")]
    #[case("http://steamapiurl.com", "resource")]
    fn test_slash_normalization(#[case] base: &str, #[case] resource: &str) {
        let request = SteamRequest::new(resource);
        let url = compose(base, &request).unwrap();
        assert_eq!(url.as_str(), "http://steamapiurl.com/resource");
    }

    #[test]
    fn test_base_path_is_kept() {
        let request = SteamRequest::new("/resource");
        let url = compose("http://steamapiurl.com/api", &request).unwrap();
        assert_eq!(url.as_str(), "http://steamapiurl.com/api/resource");
    }

    #[rstest]
    #[case("Definitely isn't a URI... How sad :(")]
    #[case("")]
    #[case("/relative/path")]
    #[case("mailto:someone@example.com")]
    fn test_detect_malformed_base(#[case] base: &str) {
        let request = SteamRequest::new("resource");
        let err = compose(base, &request).unwrap_err();
        assert!(matches!(err, SteamError::MalformedBaseAddress { .. }));
    }

    #[rstest]
    #[case(Method::GET)]
    #[case(Method::POST)]
    fn test_resource_containing_tokens(#[case] method: Method) {
        let mut request = SteamRequest::with_method("resource/{foo}", method);
        request.add_url_segment("foo", "bar");

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.as_str(), "http://steamapiurl.com/resource/bar");
    }

    #[test]
    fn test_unknown_token_left_in_place() {
        let request = SteamRequest::new("resource/{missing}");
        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.as_str(), "http://steamapiurl.com/resource/%7Bmissing%7D");
    }

    #[rstest]
    #[case("a#frag", "a%23frag")]
    #[case("a?b", "a%3Fb")]
    #[case("a/b", "a%2Fb")]
    #[case("a b+c", "a%20b%2Bc")]
    fn test_segment_values_stay_in_one_segment(#[case] value: &str, #[case] encoded: &str) {
        let mut request = SteamRequest::new("users/{id}/profile");
        request
            .add_url_segment("id", value)
            .add_parameter("k", "v", ParameterKind::QueryString);

        let url = compose("http://x.com", &request).unwrap();
        assert_eq!(url.path(), format!("/users/{encoded}/profile"));
        assert_eq!(url.query(), Some("k=v"));
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_pre_encoded_segment_is_verbatim() {
        let mut request = SteamRequest::new("users/{id}");
        request.add_pre_encoded_parameter("id", "a%2Fb", ParameterKind::UrlSegment);

        let url = compose("http://x.com", &request).unwrap();
        assert_eq!(url.path(), "/users/a%2Fb");
    }

    #[rstest]
    #[case("http://x.com/api?key=1", "r", "http://x.com/api/r?key=1")]
    #[case("http://x.com/api/?key=1", "/r", "http://x.com/api/r?key=1")]
    #[case("http://x.com/api#top", "r", "http://x.com/api/r")]
    fn test_base_query_and_fragment_stay_out_of_path(
        #[case] base: &str,
        #[case] resource: &str,
        #[case] expected: &str,
    ) {
        let request = SteamRequest::new(resource);
        let url = compose(base, &request).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn test_base_query_precedes_parameters() {
        let mut request = SteamRequest::new("r");
        request.add_parameter("format", "json", ParameterKind::QueryString);

        let url = compose("http://x.com/api?key=1", &request).unwrap();
        assert_eq!(url.as_str(), "http://x.com/api/r?key=1&format=json");
    }

    #[test]
    fn test_segments_never_reach_query() {
        let mut request = SteamRequest::new("resource/{foo}");
        request.add_url_segment("foo", "bar");

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn test_get_places_all_params_in_query() {
        let mut request = SteamRequest::new("/resource");
        request
            .add_parameter("param1", "1234", ParameterKind::GetOrPost)
            .add_parameter("param2", "5678", ParameterKind::QueryString);

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.query(), Some("param1=1234&param2=5678"));
    }

    #[test]
    fn test_post_keeps_get_or_post_out_of_query() {
        let mut request = SteamRequest::with_method("/resource", Method::POST);
        request
            .add_parameter("param1", "1234", ParameterKind::GetOrPost)
            .add_parameter("param2", "5678", ParameterKind::QueryString);

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.query(), Some("param2=5678"));
    }

    #[test]
    fn test_query_values_are_encoded_unless_pre_encoded() {
        let mut request = SteamRequest::new("/resource");
        request
            .add_parameter("password", "ab+/=", ParameterKind::QueryString)
            .add_pre_encoded_parameter("key", "%2F%2B", ParameterKind::QueryString);

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.query(), Some("password=ab%2B%2F%3D&key=%2F%2B"));
    }

    #[test]
    fn test_resource_query_is_extended() {
        let mut request = SteamRequest::new("/resource?format=json");
        request.add_parameter("key", "abc", ParameterKind::QueryString);

        let url = compose("http://steamapiurl.com/", &request).unwrap();
        assert_eq!(url.query(), Some("format=json&key=abc"));
    }
}
