/*
[INPUT]:  User-supplied answers to login challenges
[OUTPUT]: Typed answers resubmitted with a login attempt
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When challenge answer fields change
*/

use serde::{Deserialize, Serialize};

/// Answer to a captcha challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaAnswer {
    /// Id returned in the captcha challenge
    pub gid: String,
    pub solution_text: String,
}

impl CaptchaAnswer {
    pub fn new(gid: impl Into<String>, solution_text: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            solution_text: solution_text.into(),
        }
    }
}

/// Answer to a SteamGuard challenge (the code sent by e-mail)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamGuardAnswer {
    /// Id returned in the SteamGuard challenge
    pub id: String,
    pub solution_text: String,
}

impl SteamGuardAnswer {
    pub fn new(id: impl Into<String>, solution_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            solution_text: solution_text.into(),
        }
    }
}
