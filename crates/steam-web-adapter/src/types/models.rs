/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Steam identifiers, session entity and game models
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::Cookie;

/// 64-bit Steam account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SteamId(pub u64);

impl SteamId {
    /// Low 32 bits: the account number within its universe
    pub fn account_id(&self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    /// Bits 52..56
    pub fn account_type(&self) -> u8 {
        ((self.0 >> 52) & 0xF) as u8
    }

    /// Top 8 bits
    pub fn universe(&self) -> u8 {
        (self.0 >> 56) as u8
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SteamId)
    }
}

impl From<u64> for SteamId {
    fn from(value: u64) -> Self {
        SteamId(value)
    }
}

impl Serialize for SteamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SteamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(SteamId(value)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Authenticated Steam user produced by a successful login.
///
/// Owned and persisted by the caller; pass it to
/// [`CookieAuthenticator::for_user`](crate::auth::CookieAuthenticator::for_user)
/// to authenticate later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamUser {
    pub steam_id: SteamId,
    #[serde(default)]
    pub transfer_token: Option<String>,
    #[serde(default)]
    pub auth_cookie: Option<Cookie>,
    /// Raw value of the `steamLogin` cookie
    #[serde(default)]
    pub auth_cookie_login_key: Option<String>,
}

impl SteamUser {
    pub fn new(steam_id: SteamId) -> Self {
        Self {
            steam_id,
            transfer_token: None,
            auth_cookie: None,
            auth_cookie_login_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "appid")]
    pub app_id: u32,
    /// Present when app info was requested
    #[serde(default)]
    pub name: Option<String>,
    /// Minutes played since 2009
    #[serde(default)]
    pub playtime_forever: u32,
    /// Minutes played in the last two weeks
    #[serde(default, rename = "playtime_2weeks")]
    pub playtime_two_weeks: u32,
    #[serde(default)]
    pub img_icon_url: Option<String>,
    #[serde(default)]
    pub img_logo_url: Option<String>,
    #[serde(default)]
    pub has_community_visible_stats: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedGames {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steam_id_parts() {
        let id: SteamId = "76561197960287930".parse().unwrap();
        assert_eq!(id.account_id(), 22202);
        assert_eq!(id.universe(), 1);
        assert_eq!(id.account_type(), 1);
        assert_eq!(id.to_string(), "76561197960287930");
    }

    #[test]
    fn test_steam_id_serde_accepts_string_and_number() {
        let from_text: SteamId = serde_json::from_str("\"76561198000000000\"").unwrap();
        let from_number: SteamId = serde_json::from_str("76561198000000000").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(
            serde_json::to_string(&from_text).unwrap(),
            "\"76561198000000000\""
        );
        assert!(serde_json::from_str::<SteamId>("\"not-an-id\"").is_err());
    }

    #[test]
    fn test_steam_user_roundtrips_through_json() {
        let mut user = SteamUser::new(SteamId(76561198000000000));
        user.transfer_token = Some("T".to_string());
        user.auth_cookie = Some(Cookie::new("steamLogin", "abc").with_path("/"));
        user.auth_cookie_login_key = Some("abc".to_string());

        let json = serde_json::to_string(&user).unwrap();
        let back: SteamUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
