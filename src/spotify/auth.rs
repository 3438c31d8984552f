use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::{sync::Mutex, time::Instant};

use crate::{
    Res,
    config::Config,
    error::ClientError,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the browser to hit the callback.
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE flow and stores the resulting token.
///
/// 1. Generates the code verifier and its SHA-256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits for the callback to exchange the code
/// 5. Persists the token for later runs
pub async fn auth(config: Config, shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(&config, &code_challenge)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or("Authentication failed or timed out.")?;

    TokenManager::new(token).persist().await?;
    success!("Authentication successful!");
    Ok(())
}

pub fn authorize_url(config: &Config, code_challenge: &str) -> Result<Url, ClientError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            (
                "client_id",
                config
                    .client_id()
                    .map_err(|e| ClientError::Token(e.to_string()))?,
            ),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| ClientError::Other(format!("invalid authorize url: {e}")))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges the authorization code received by the callback for a token.
pub async fn exchange_code_pkce(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, ClientError> {
    let client_id = config
        .client_id()
        .map_err(|e| ClientError::Token(e.to_string()))?;

    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let body: TokenResponse = super::decode(response).await?;
    let refresh_token = body
        .refresh_token
        .clone()
        .ok_or_else(|| ClientError::Token("token response without refresh token".to_string()))?;
    Ok(into_token(body, refresh_token))
}

/// Trades the refresh token of `current` for a fresh access token.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    current: &Token,
) -> Result<Token, ClientError> {
    let client_id = config
        .client_id()
        .map_err(|e| ClientError::Token(e.to_string()))?;

    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
            ("client_id", client_id),
        ])
        .send()
        .await?;

    let body: TokenResponse = super::decode(response).await?;
    let refresh_token = body
        .refresh_token
        .clone()
        .unwrap_or_else(|| current.refresh_token.clone());
    Ok(into_token(body, refresh_token))
}

fn into_token(body: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token,
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
