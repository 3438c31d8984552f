use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{
    config::{self, Config},
    error::{CatalogError, ClientError},
    spotify,
    types::Token,
};

/// Seconds before expiry at which a token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Loads the stored token. Without one the user has to authorize first.
    pub async fn load() -> Result<Self, CatalogError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            CatalogError::Unauthorized(format!("no token at {}: {}", path.display(), e))
        })?;
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| CatalogError::Unauthorized(format!("unreadable token: {e}")))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Access token, refreshed and persisted first when it is about to expire.
    pub async fn get_valid_token(
        &mut self,
        http: &Client,
        config: &Config,
    ) -> Result<String, ClientError> {
        if self.is_expired(Utc::now().timestamp() as u64) {
            let refreshed = spotify::auth::refresh_token(http, config, &self.token).await?;
            self.token = refreshed;
            if let Err(e) = self.persist().await {
                crate::warning!("Failed to persist refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now + REFRESH_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
