/*
[INPUT]:  Steam Web API interface names and method versions
[OUTPUT]: Typed interface/version identifiers rendered into resource paths
[POS]:    Data layer - versioned API addressing
[UPDATE]: When new interfaces or versions are used
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Steam Web API interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteamInterface {
    #[serde(rename = "ISteamApps")]
    SteamApps,
    #[serde(rename = "ISteamNews")]
    SteamNews,
    #[serde(rename = "ISteamUser")]
    SteamUser,
    #[serde(rename = "ISteamUserAuth")]
    SteamUserAuth,
    #[serde(rename = "ISteamUserOAuth")]
    SteamUserOAuth,
    #[serde(rename = "ISteamUserStats")]
    SteamUserStats,
    #[serde(rename = "ISteamWebUserPresenceOAuth")]
    SteamWebUserPresenceOAuth,
    #[serde(rename = "IPlayerService")]
    PlayerService,
}

impl SteamInterface {
    pub fn as_str(&self) -> &'static str {
        match self {
            SteamInterface::SteamApps => "ISteamApps",
            SteamInterface::SteamNews => "ISteamNews",
            SteamInterface::SteamUser => "ISteamUser",
            SteamInterface::SteamUserAuth => "ISteamUserAuth",
            SteamInterface::SteamUserOAuth => "ISteamUserOAuth",
            SteamInterface::SteamUserStats => "ISteamUserStats",
            SteamInterface::SteamWebUserPresenceOAuth => "ISteamWebUserPresenceOAuth",
            SteamInterface::PlayerService => "IPlayerService",
        }
    }
}

impl fmt::Display for SteamInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API method version, rendered as `v0001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodVersion(pub u16);

impl MethodVersion {
    pub const V0001: MethodVersion = MethodVersion(1);
    pub const V0002: MethodVersion = MethodVersion(2);
}

impl fmt::Display for MethodVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:04}", self.0)
    }
}
