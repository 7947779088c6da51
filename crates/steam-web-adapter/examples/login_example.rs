/*
[INPUT]:  Steam username/password from the environment
[OUTPUT]: Login outcome and owned games for the session user
[POS]:    Examples - login flow demonstration
[UPDATE]: When login flow changes
*/

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use steam_web_adapter::*;
use tracing_subscriber::EnvFilter;

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Example: Steam login flow
///
/// 1. Fetch the RSA key and submit the encrypted password
/// 2. Answer captcha / SteamGuard challenges until Steam settles
/// 3. Upgrade the login key into a Web API session
/// 4. Query PlayerService with an API key, if STEAM_API_KEY is set
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Steam Login Example ===\n");

    let (Ok(username), Ok(password)) = (std::env::var("STEAM_USERNAME"), std::env::var("STEAM_PASSWORD")) else {
        eprintln!("Set STEAM_USERNAME and STEAM_PASSWORD to run this example");
        return;
    };

    let manager = match LoginManager::new() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to create login manager: {}", e);
            return;
        }
    };

    let mut captcha: Option<CaptchaAnswer> = None;
    let mut steam_guard: Option<SteamGuardAnswer> = None;

    let user = loop {
        let result = match manager
            .login(&username, &password, captcha.as_ref(), steam_guard.as_ref())
            .await
        {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Login failed: {}", e);
                return;
            }
        };

        if let Some(challenge) = result.captcha() {
            println!("Captcha required: {}", challenge.image_url.as_deref().unwrap_or("<no image>"));
            let text = prompt("captcha text").unwrap_or_default();
            captcha = challenge.gid.clone().map(|gid| CaptchaAnswer::new(gid, text));
        }

        if let Some(challenge) = result.steam_guard() {
            println!(
                "SteamGuard code sent to @{}",
                challenge.email_domain.as_deref().unwrap_or("?")
            );
            let code = prompt("steam guard code").unwrap_or_default();
            steam_guard = challenge.id.clone().map(|id| SteamGuardAnswer::new(id, code));
        }

        match result {
            LoginResult::Success { user, .. } => break user,
            LoginResult::Failure { message } => {
                eprintln!("Steam rejected the login: {}", message);
                return;
            }
            _ => continue,
        }
    };
    println!("✓ Logged in as {}", user.steam_id);

    match manager.exchange_login_key_for_access_token(&user).await {
        Ok(response) => println!("✓ Session upgrade: {}", response.content()),
        Err(e) => eprintln!("Session upgrade failed: {}", e),
    }

    if let Ok(key) = std::env::var("STEAM_API_KEY") {
        let mut api = match SteamClient::new("https://api.steampowered.com/") {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to create API client: {}", e);
                return;
            }
        };
        api.set_authenticator(Arc::new(ApiKeyAuthenticator::new(key)));

        match api.get_owned_games(user.steam_id, true, false).await {
            Ok(owned) => {
                println!("✓ {} games owned", owned.game_count);
                for game in owned.games.iter().take(10) {
                    println!("  {} ({} min)", game.name.as_deref().unwrap_or("?"), game.playtime_forever);
                }
            }
            Err(e) => eprintln!("GetOwnedGames failed: {}", e),
        }
    }

    println!("\n✓ Login example complete");
}
