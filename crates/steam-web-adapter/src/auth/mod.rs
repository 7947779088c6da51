/*
[INPUT]:  Steam credentials, challenge answers and session users
[OUTPUT]: Login results, encrypted payloads and request authenticators
[POS]:    Auth layer - handles Steam login and request authentication
[UPDATE]: When the login flow or authentication strategies change
*/

pub mod authenticator;
pub mod crypto;
pub mod manager;

pub use authenticator::{ApiKeyAuthenticator, Authenticator, CookieAuthenticator};
pub use crypto::{RsaEncryptor, generate_session_key, symmetric_encrypt};
pub use manager::{
    CaptchaChallenge, LoginManager, LoginResult, STEAM_LOGIN_COOKIE, SteamGuardChallenge,
};
