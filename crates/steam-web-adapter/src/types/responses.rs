/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Deserializer, Serialize};

use super::models::{OwnedGames, PlayedGames, SteamId};

/// Response from `login/getrsakey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaKeyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "publickey_mod")]
    pub public_key_modulus: String,
    #[serde(default, rename = "publickey_exp")]
    pub public_key_exponent: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub timestamp: Option<String>,
}

impl RsaKeyResponse {
    /// True when the key can be used to encrypt a password
    pub fn is_usable(&self) -> bool {
        self.success
            && !self.public_key_modulus.trim().is_empty()
            && !self.public_key_exponent.trim().is_empty()
    }
}

/// Response from `login/dologin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResult {
    pub success: bool,
    #[serde(default)]
    pub login_complete: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub captcha_needed: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub captcha_gid: Option<String>,
    #[serde(default)]
    pub emailauth_needed: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub emaildomain: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub emailsteamid: Option<String>,
    #[serde(default)]
    pub transfer_parameters: Option<TransferParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParameters {
    pub steamid: SteamId,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub remember_login: bool,
    #[serde(default)]
    pub webcookie: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOwnedGamesResponse {
    pub response: OwnedGames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRecentlyPlayedGamesResponse {
    pub response: PlayedGames,
}

/// Steam sends ids as strings, numbers or `-1`; empty and `-1` mean absent.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    let value = Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    });

    Ok(value.filter(|text| !text.is_empty() && text != "-1"))
}
