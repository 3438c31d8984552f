//! # Spotify Integration Module
//!
//! [`SpotifyClient`] implements [`CatalogClient`] on top of the Spotify Web
//! API. It owns the HTTP client and the stored OAuth token, refreshing the
//! token shortly before it expires.
//!
//! ## API Coverage
//!
//! - `GET /artists/{id}` - artist name
//! - `GET /artists/{id}/albums` - releases of one group, offset paginated
//! - `GET /albums?ids=` - up to 20 releases with their first page of tracks
//! - `GET /albums/{id}/tracks` - further track pages of a long release
//! - `GET /tracks?ids=` - up to 50 tracks with ISRC and popularity
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - add up to 100 tracks
//! - `PUT /me/following` - follow an artist
//!
//! ## Rate Limiting
//!
//! Request pacing is the pipeline's throttle. When Spotify still answers
//! `429 Too Many Requests`, a `Retry-After` of at most two minutes is waited
//! out and the request is sent once more. Any other non-success status is
//! returned as [`ClientError::Status`].
//!
//! [`auth`] implements the PKCE authorization flow that produces the token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    catalog::{CatalogClient, ReleaseGroup},
    config::Config,
    error::{CatalogError, ClientError},
    management::TokenManager,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, Artist, CreatePlaylistRequest,
        FullTrack, GetSeveralReleasesResponse, GetSeveralTracksResponse, Page, Playlist,
        ReleaseDetail, ReleaseItem, TrackItem,
    },
    warning,
};

pub mod auth;

/// Longest `Retry-After` that is waited out instead of failing.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API client backing the catalog pipeline.
///
/// Holds one `reqwest::Client` for connection reuse and the stored OAuth
/// token behind a `tokio::sync::Mutex`. Every request goes through [`send`],
/// so rate limit handling is the same for all endpoints.
pub struct SpotifyClient {
    http: Client,
    config: Config,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Builds a client from the stored token.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints and credentials used for requests and token refresh
    ///
    /// # Returns
    ///
    /// - `Ok(SpotifyClient)` - Client ready to serve the pipeline
    /// - `Err(CatalogError::Unauthorized)` - No readable token on disk, so
    ///   `discografy auth` has to run first
    pub async fn connect(config: Config) -> Result<Self, CatalogError> {
        let tokens = TokenManager::load().await?;
        Ok(Self {
            http: Client::new(),
            config,
            tokens: Mutex::new(tokens),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Current access token, refreshed when it is about to expire.
    async fn token(&self) -> Result<String, ClientError> {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.http, &self.config).await
    }

    /// Authorized `GET` against the Web API, decoded into `T`.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let token = self.token().await?;
        let request = self.http.get(self.url(path)).bearer_auth(token).query(query);
        decode(send(request).await?).await
    }
}

/// Sends a request and applies the shared status handling.
///
/// # Arguments
///
/// * `request` - Fully built request, including the bearer token
///
/// # Returns
///
/// - `Ok(Response)` - A 2xx response
/// - `Err(ClientError::Status)` - Any other status, with the response body
/// - `Err(ClientError::Http)` - Connection or protocol failure
///
/// # Rate Limiting
///
/// - Detects `429 Too Many Requests`
/// - Reads the `Retry-After` header (seconds)
/// - Waits and sends the request once more when the delay is at most
///   [`MAX_RETRY_AFTER_SECS`]
/// - Warns and fails for longer delays
/// - Fails without waiting when the request cannot be cloned for a replay
///
/// A second 429 after the retry is returned as an error; pacing between
/// requests is left to the pipeline's throttle.
async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    let retry = request.try_clone();
    let response = request.send().await?;

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if let (Some(secs), Some(retry)) = (retry_after, retry) {
            if secs <= MAX_RETRY_AFTER_SECS {
                sleep(Duration::from_secs(secs)).await;
                return check(retry.send().await?).await;
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try again later.",
                secs
            );
        }
    }

    check(response).await
}

/// Turns a non-success status into [`ClientError::Status`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

/// Checks the status and parses the JSON body into `T`.
///
/// The body is read as text first so a schema mismatch surfaces as
/// [`ClientError::Decode`] instead of a transport error.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    /// Fetches the artist whose name is used to filter track credits.
    ///
    /// # API Endpoint
    ///
    /// `GET /artists/{id}`
    async fn artist(&self, artist_id: &str) -> Result<Artist, ClientError> {
        self.get(&format!("artists/{artist_id}"), &[]).await
    }

    /// Retrieves one page of an artist's releases for a single group.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify ID of the artist
    /// * `group` - Release group sent as `include_groups`
    /// * `limit` - Page size (1-50)
    /// * `offset` - Index of the first release of the page
    ///
    /// # Returns
    ///
    /// The page items only. An empty vector marks the end of the group.
    ///
    /// # API Endpoint
    ///
    /// `GET /artists/{id}/albums?include_groups=&limit=&offset=`
    async fn artist_releases(
        &self,
        artist_id: &str,
        group: ReleaseGroup,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ReleaseItem>, ClientError> {
        let page: Page<ReleaseItem> = self
            .get(
                &format!("artists/{artist_id}/albums"),
                &[
                    ("include_groups", group.to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// Fetches up to 20 releases with the first page of their track listing.
    ///
    /// Ids Spotify does not know come back as `null` and are skipped.
    ///
    /// # API Endpoint
    ///
    /// `GET /albums?ids=`
    async fn several_releases(&self, ids: &[String]) -> Result<Vec<ReleaseDetail>, ClientError> {
        let response: GetSeveralReleasesResponse =
            self.get("albums", &[("ids", ids.join(","))]).await?;
        Ok(response.albums.into_iter().flatten().collect())
    }

    /// Fetches a further page of a release's track listing.
    ///
    /// # API Endpoint
    ///
    /// `GET /albums/{id}/tracks?limit=&offset=`
    async fn release_tracks(
        &self,
        release_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<TrackItem>, ClientError> {
        self.get(
            &format!("albums/{release_id}/tracks"),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Fetches up to 50 tracks with their ISRC and popularity.
    ///
    /// Unavailable tracks keep their `None` slot so the caller can match by id.
    ///
    /// # API Endpoint
    ///
    /// `GET /tracks?ids=`
    async fn several_tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, ClientError> {
        let response: GetSeveralTracksResponse =
            self.get("tracks", &[("ids", ids.join(","))]).await?;
        Ok(response.tracks)
    }

    /// Creates an empty playlist owned by `SPOTIFY_USER_ID`.
    ///
    /// # Arguments
    ///
    /// * `name` - Playlist name
    /// * `description` - Playlist description shown in the Spotify clients
    /// * `public` - Whether the playlist is listed on the user's profile
    ///
    /// # Returns
    ///
    /// - `Ok(Playlist)` - The created playlist with its id
    /// - `Err(ClientError::Other)` - `SPOTIFY_USER_ID` is not configured
    ///
    /// # API Endpoint
    ///
    /// `POST /users/{user_id}/playlists`
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, ClientError> {
        let user_id = self
            .config
            .user_id()
            .map_err(|e| ClientError::Other(e.to_string()))?;
        let token = self.token().await?;
        let request = self
            .http
            .post(self.url(&format!("users/{user_id}/playlists")))
            .bearer_auth(token)
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
                description: description.to_string(),
                public,
                collaborative: false,
            });
        decode(send(request).await?).await
    }

    /// Appends up to 100 track uris and returns the new snapshot id.
    ///
    /// # API Endpoint
    ///
    /// `POST /playlists/{id}/tracks`
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ClientError> {
        let token = self.token().await?;
        let request = self
            .http
            .post(self.url(&format!("playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&AddTrackToPlaylistRequest {
                uris: uris.to_vec(),
            });
        let response: AddTrackToPlaylistResponse = decode(send(request).await?).await?;
        Ok(response.snapshot_id)
    }

    /// Follows the artist for the authorized user.
    ///
    /// # API Endpoint
    ///
    /// `PUT /me/following?type=artist` with the id in the JSON body
    async fn follow_artist(&self, artist_id: &str) -> Result<(), ClientError> {
        let token = self.token().await?;
        let request = self
            .http
            .put(self.url("me/following"))
            .bearer_auth(token)
            .query(&[("type", "artist")])
            .json(&json!({ "ids": [artist_id] }));
        send(request).await?;
        Ok(())
    }
}
