/*
[INPUT]:  Username, password, optional captcha/SteamGuard answers, HTTP clients
[OUTPUT]: LoginResult (session user or challenge) and session-key exchange
[POS]:    Auth layer - orchestrates the credential-to-session handshake
[UPDATE]: When login endpoints, challenge handling or flow steps change
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Method;
use tracing::{info, warn};

use super::crypto::{RsaEncryptor, generate_session_key, symmetric_encrypt};
use crate::http::{
    ClientConfig, ParameterKind, PostDataFormat, Result, SteamClient, SteamError, SteamRequest,
    SteamResponse, block_on, url_encode,
};
use crate::types::{
    CaptchaAnswer, MethodVersion, RsaKeyResponse, SteamGuardAnswer, SteamInterface, SteamUser,
    TokenResult,
};

/// Base URLs for the Steam login flow
const COMMUNITY_BASE_URL: &str = "https://steamcommunity.com/";
const API_BASE_URL: &str = "https://api.steampowered.com/";

/// Cookie carrying the login key after a successful login
pub const STEAM_LOGIN_COOKIE: &str = "steamLogin";

/// Captcha the user must solve before resubmitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pub gid: Option<String>,
    pub image_url: Option<String>,
}

/// SteamGuard code the user must supply before resubmitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamGuardChallenge {
    pub id: Option<String>,
    /// Domain of the address the code was mailed to
    pub email_domain: Option<String>,
}

/// Outcome of a login attempt.
///
/// Challenges are expected, resumable outcomes: resubmit with the matching
/// answers. When Steam asks for both a captcha and a SteamGuard code the
/// result is `CaptchaRequired` with `steam_guard` populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success {
        user: SteamUser,
        login_complete: bool,
    },
    CaptchaRequired {
        captcha: CaptchaChallenge,
        steam_guard: Option<SteamGuardChallenge>,
        message: String,
    },
    SteamGuardRequired {
        steam_guard: SteamGuardChallenge,
        message: String,
    },
    Failure {
        message: String,
    },
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginResult::Success { .. })
    }

    pub fn user(&self) -> Option<&SteamUser> {
        match self {
            LoginResult::Success { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn captcha(&self) -> Option<&CaptchaChallenge> {
        match self {
            LoginResult::CaptchaRequired { captcha, .. } => Some(captcha),
            _ => None,
        }
    }

    pub fn steam_guard(&self) -> Option<&SteamGuardChallenge> {
        match self {
            LoginResult::CaptchaRequired { steam_guard, .. } => steam_guard.as_ref(),
            LoginResult::SteamGuardRequired { steam_guard, .. } => Some(steam_guard),
            _ => None,
        }
    }
}

/// Runs the Steam login handshake.
///
/// 1. Fetch the account's RSA key
/// 2. Encrypt the password with it
/// 3. Submit the login
/// 4. Turn the token result into a [`LoginResult`]
///
/// Each call is independent; nothing is retried internally.
#[derive(Debug)]
pub struct LoginManager {
    community: SteamClient,
    api: SteamClient,
}

impl LoginManager {
    /// Create a login manager against the public Steam endpoints
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_base_urls(config, COMMUNITY_BASE_URL, API_BASE_URL)
    }

    /// Create a login manager against explicit community and Web API base URLs
    pub fn with_base_urls(
        config: ClientConfig,
        community_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            community: SteamClient::with_config(community_url, config.clone())?,
            api: SteamClient::with_config(api_url, config)?,
        })
    }

    /// Step 1: fetch the RSA key for `username`
    ///
    /// GET login/getrsakey?username={username}
    pub async fn fetch_rsa_key(&self, username: &str) -> Result<RsaKeyResponse> {
        let mut request = SteamRequest::new("login/getrsakey");
        request.add_parameter("username", username, ParameterKind::QueryString);

        let response = self.community.execute(&mut request).await?;
        if !response.is_successful() {
            return Err(SteamError::unsuccessful(
                "User authentication failed. Request to procure Steam RSA key failed",
                response,
            ));
        }

        let key: RsaKeyResponse = serde_json::from_str(response.content()).map_err(|err| {
            SteamError::deserialization(
                format!("Unable to deserialize the RSA key response: {err}"),
                response.content(),
                Some(err),
            )
        })?;

        if !key.is_usable() {
            return Err(SteamError::InvalidCredentialInput {
                message: "Unable to authenticate user. Likely the username supplied is invalid"
                    .to_string(),
                response: Some(Box::new(response)),
            });
        }

        info!(username, "fetched steam rsa key");
        Ok(key)
    }

    /// Log `username` in, resubmitting any challenge answers supplied.
    ///
    /// Challenges come back as `Ok` results; errors are reserved for bad
    /// usernames, transport failures and unparseable responses.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        captcha: Option<&CaptchaAnswer>,
        steam_guard: Option<&SteamGuardAnswer>,
    ) -> Result<LoginResult> {
        let key = self.fetch_rsa_key(username).await?;

        // Step 2: encrypt
        let encryptor = RsaEncryptor::from_hex(&key.public_key_modulus, &key.public_key_exponent)?;
        let encrypted_password = BASE64.encode(encryptor.encrypt(password.as_bytes())?);

        // Step 3: submit
        let mut request = SteamRequest::with_method("login/dologin", Method::POST);
        request
            .add_parameter("username", username, ParameterKind::QueryString)
            .add_parameter("password", encrypted_password, ParameterKind::QueryString)
            .add_parameter(
                "rsatimestamp",
                key.timestamp.unwrap_or_default(),
                ParameterKind::QueryString,
            );

        if let Some(answer) = captcha {
            request
                .add_parameter("captchagid", &answer.gid, ParameterKind::QueryString)
                .add_parameter("captcha_text", &answer.solution_text, ParameterKind::QueryString);
        }

        if let Some(answer) = steam_guard {
            request
                .add_parameter("emailsteamid", &answer.id, ParameterKind::QueryString)
                .add_parameter("emailauth", &answer.solution_text, ParameterKind::QueryString);
        }

        let response = self.community.execute(&mut request).await?;
        if !response.is_successful() {
            return Err(SteamError::unsuccessful(
                "User authentication failed. Request to procure Steam access token failed",
                response,
            ));
        }

        let result: TokenResult = serde_json::from_str(response.content()).map_err(|err| {
            SteamError::deserialization(
                format!("Unable to deserialize the token response from Steam: {err}"),
                response.content(),
                Some(err),
            )
        })?;

        // Step 4: evaluate
        self.evaluate(result, &response)
    }

    /// Blocking form of [`login`](Self::login)
    pub fn login_blocking(
        &self,
        username: &str,
        password: &str,
        captcha: Option<&CaptchaAnswer>,
        steam_guard: Option<&SteamGuardAnswer>,
    ) -> Result<LoginResult> {
        block_on(self.login(username, password, captcha, steam_guard))
    }

    /// Upgrade a login key into a Web API session.
    ///
    /// POST ISteamUserAuth/AuthenticateUser/v0001/ with a fresh session key
    /// encrypted against the Public universe key and the login key encrypted
    /// with that session key. The response body is returned unparsed.
    pub async fn exchange_login_key_for_access_token(
        &self,
        user: &SteamUser,
    ) -> Result<SteamResponse> {
        let login_key = user.auth_cookie_login_key.as_deref().ok_or_else(|| {
            SteamError::InvalidCredentialInput {
                message: format!("user {} has no login key", user.steam_id),
                response: None,
            }
        })?;

        let session_key = generate_session_key();
        let encrypted_session_key = RsaEncryptor::public_universe()?.encrypt(&session_key)?;
        let encrypted_login_key = symmetric_encrypt(login_key.as_bytes(), &session_key)?;

        let mut request = SteamRequest::for_interface(
            SteamInterface::SteamUserAuth,
            "AuthenticateUser",
            MethodVersion::V0001,
        );
        request
            .set_method(Method::POST)
            .set_data_format(PostDataFormat::FormUrlEncoded)
            .add_parameter("steamid", user.steam_id, ParameterKind::GetOrPost)
            .add_pre_encoded_parameter(
                "sessionkey",
                url_encode(&encrypted_session_key),
                ParameterKind::GetOrPost,
            )
            .add_pre_encoded_parameter(
                "encrypted_loginkey",
                url_encode(&encrypted_login_key),
                ParameterKind::GetOrPost,
            )
            .add_parameter("format", "json", ParameterKind::GetOrPost);

        let response = self.api.execute(&mut request).await?;
        if !response.is_successful() {
            return Err(SteamError::unsuccessful(
                "Session upgrade failed. AuthenticateUser request not successful",
                response,
            ));
        }

        info!(steam_id = %user.steam_id, "exchanged login key for web api session");
        Ok(response)
    }

    /// Blocking form of [`exchange_login_key_for_access_token`](Self::exchange_login_key_for_access_token)
    pub fn exchange_login_key_for_access_token_blocking(
        &self,
        user: &SteamUser,
    ) -> Result<SteamResponse> {
        block_on(self.exchange_login_key_for_access_token(user))
    }

    fn evaluate(&self, result: TokenResult, response: &SteamResponse) -> Result<LoginResult> {
        if !result.success {
            let captcha = result.captcha_needed.then(|| CaptchaChallenge {
                image_url: result
                    .captcha_gid
                    .as_ref()
                    .map(|gid| self.captcha_url(gid)),
                gid: result.captcha_gid.clone(),
            });
            let steam_guard = result.emailauth_needed.then(|| SteamGuardChallenge {
                id: result.emailsteamid.clone(),
                email_domain: result.emaildomain.clone(),
            });
            let message = result.message;

            return Ok(match (captcha, steam_guard) {
                (Some(captcha), steam_guard) => {
                    info!(steam_guard = steam_guard.is_some(), "steam login requires captcha");
                    LoginResult::CaptchaRequired {
                        captcha,
                        steam_guard,
                        message,
                    }
                }
                (None, Some(steam_guard)) => {
                    info!("steam login requires steam guard code");
                    LoginResult::SteamGuardRequired {
                        steam_guard,
                        message,
                    }
                }
                (None, None) => {
                    warn!(%message, "steam login rejected");
                    LoginResult::Failure { message }
                }
            });
        }

        let transfer = result.transfer_parameters.ok_or_else(|| {
            SteamError::deserialization(
                "Successful token response is missing transfer_parameters",
                response.content(),
                None,
            )
        })?;

        let mut user = SteamUser::new(transfer.steamid);
        user.transfer_token = transfer.token;

        if let Some(cookie) = response.cookies().get(STEAM_LOGIN_COOKIE) {
            user.auth_cookie_login_key = Some(cookie.value.clone());
            user.auth_cookie = Some(cookie.clone());
        }

        info!(steam_id = %user.steam_id, "steam login succeeded");
        Ok(LoginResult::Success {
            user,
            login_complete: result.login_complete,
        })
    }

    fn captcha_url(&self, gid: &str) -> String {
        let base = self.community.base_url();
        let base = base.strip_suffix('/').unwrap_or(base);
        format!("{base}/public/captcha.php?gid={gid}")
    }
}
