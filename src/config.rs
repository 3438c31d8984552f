//! Configuration management for discografy.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{
    catalog::{MAX_RELEASE_PAGE_SIZE, ThrottlePolicy},
    error::CatalogError,
};

pub const APP_DIR: &str = "discografy";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-modify-public user-follow-modify";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_THROTTLE_DELAY_MS: u64 = 500;
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Loads environment variables from `.env` in the local data directory.
///
/// The directory is created when missing. A missing `.env` file is not an
/// error since every value can also come from the process environment.
///
/// The file lives in:
/// - Linux: `~/.local/share/discografy/.env`
/// - macOS: `~/Library/Application Support/discografy/.env`
/// - Windows: `%LOCALAPPDATA%/discografy/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Platform specific data directory of the application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub client_id: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub user_id: Option<String>,
    pub server_address: String,
    pub throttle_delay: Duration,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let var_or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let page_size = parse_value("PAGE_SIZE", var("PAGE_SIZE"), DEFAULT_PAGE_SIZE)?;
        if !(1..=MAX_RELEASE_PAGE_SIZE).contains(&page_size) {
            return Err(CatalogError::Config(format!(
                "PAGE_SIZE must be between 1 and {MAX_RELEASE_PAGE_SIZE}, got {page_size}"
            )));
        }

        Ok(Self {
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            client_id: var("SPOTIFY_API_AUTH_CLIENT_ID"),
            redirect_uri: var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            user_id: var("SPOTIFY_USER_ID"),
            server_address: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            throttle_delay: Duration::from_millis(parse_value(
                "THROTTLE_DELAY_MS",
                var("THROTTLE_DELAY_MS"),
                DEFAULT_THROTTLE_DELAY_MS,
            )?),
            page_size,
        })
    }

    pub fn throttle_policy(&self) -> ThrottlePolicy {
        if self.throttle_delay.is_zero() {
            ThrottlePolicy::Disabled
        } else {
            ThrottlePolicy::FixedDelay(self.throttle_delay)
        }
    }

    pub fn client_id(&self) -> Result<&str, CatalogError> {
        self.client_id
            .as_deref()
            .ok_or_else(|| missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    }

    pub fn user_id(&self) -> Result<&str, CatalogError> {
        self.user_id
            .as_deref()
            .ok_or_else(|| missing("SPOTIFY_USER_ID"))
    }
}

fn parse_value<T: std::str::FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, CatalogError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CatalogError::Config(format!("{name} has an invalid value '{raw}'"))),
        None => Ok(default),
    }
}

fn missing(name: &str) -> CatalogError {
    CatalogError::Config(format!("{name} must be set"))
}
