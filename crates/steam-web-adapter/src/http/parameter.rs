/*
[INPUT]:  Named request values and their wire placement
[OUTPUT]: Ordered parameter table with (name, kind) upsert semantics
[POS]:    HTTP layer - request parameter storage and encoding
[UPDATE]: When adding parameter kinds or changing encoding rules
*/

use std::borrow::Cow;

use url::form_urlencoded;

/// Where a parameter ends up on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Replaces a `{name}` token in the resource template
    UrlSegment,
    /// Always placed in the query string
    QueryString,
    /// Query string for GET, request body otherwise
    GetOrPost,
}

/// A single request parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
    /// Value is already percent-encoded and must be sent verbatim
    pub is_pre_encoded: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl ToString, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            kind,
            is_pre_encoded: false,
        }
    }

    pub fn pre_encoded(name: impl Into<String>, value: impl ToString, kind: ParameterKind) -> Self {
        Self {
            is_pre_encoded: true,
            ..Self::new(name, value, kind)
        }
    }

    /// Value as it should appear on the wire
    pub fn encoded_value(&self) -> Cow<'_, str> {
        if self.is_pre_encoded {
            Cow::Borrowed(&self.value)
        } else {
            Cow::Owned(url_encode(self.value.as_bytes()))
        }
    }
}

/// Parameters keyed by `(name, kind)`; re-adding a pair overwrites it in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the parameter with the same name and kind
    pub fn upsert(&mut self, param: Parameter) {
        match self
            .params
            .iter_mut()
            .find(|existing| existing.name == param.name && existing.kind == param.kind)
        {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
    }

    pub fn get(&self, name: &str, kind: ParameterKind) -> Option<&Parameter> {
        self.params
            .iter()
            .find(|param| param.name == name && param.kind == kind)
    }

    pub fn of_kind(&self, kind: ParameterKind) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(move |param| param.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Percent-encode raw bytes for a query string or form body
pub fn url_encode(bytes: &[u8]) -> String {
    form_urlencoded::byte_serialize(bytes).collect()
}

/// Join parameters as `name=value&...`
pub(crate) fn encode_pairs<'a>(params: impl IntoIterator<Item = &'a Parameter>) -> String {
    params
        .into_iter()
        .map(|param| format!("{}={}", url_encode(param.name.as_bytes()), param.encoded_value()))
        .collect::<Vec<_>>()
        .join("&")
}
