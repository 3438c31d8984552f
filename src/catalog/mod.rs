//! # Catalog Module
//!
//! Collects an artist's complete catalog and reduces it to one canonical
//! track per recording.
//!
//! ```text
//! fetch      all releases, group by group, page by page
//!   ↓
//! loader     release details in batches of 20, track details in batches of 50
//!   ↓
//! model      one TrackRecord per (track, release) crediting the artist
//!   ↓
//! resolve    one record per ISRC, most official release wins
//!   ↓
//! alternates drop live/remix/... versions that have a plain sibling
//! ```
//!
//! Every stage talks to the remote service through [`CatalogClient`] and waits
//! on a [`Throttle`] after each request. Requests are strictly sequential.

use async_trait::async_trait;

use crate::{
    error::ClientError,
    types::{Artist, FullTrack, Page, Playlist, ReleaseDetail, ReleaseItem, TrackItem},
};

pub mod alternates;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod resolve;
pub mod throttle;

pub use model::{Release, ReleaseGroup, ReleaseKind, TrackRecord};
pub use pipeline::{Discography, Pipeline};
pub use throttle::{Throttle, ThrottlePolicy};

/// Maximum number of release ids per several-releases request.
pub const RELEASE_BATCH_SIZE: usize = 20;
/// Maximum number of track ids per several-tracks request.
pub const TRACK_BATCH_SIZE: usize = 50;
/// Maximum number of uris per playlist insertion request.
pub const PLAYLIST_CHUNK_SIZE: usize = 100;
/// Page size of the release tracks endpoint.
pub const TRACK_PAGE_SIZE: u32 = 50;
/// Largest page the artist releases endpoint accepts.
pub const MAX_RELEASE_PAGE_SIZE: u32 = 50;

/// Remote operations the pipeline and the playlist step depend on.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn artist(&self, artist_id: &str) -> Result<Artist, ClientError>;

    async fn artist_releases(
        &self,
        artist_id: &str,
        group: ReleaseGroup,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ReleaseItem>, ClientError>;

    /// Unknown ids yield no entry.
    async fn several_releases(&self, ids: &[String]) -> Result<Vec<ReleaseDetail>, ClientError>;

    async fn release_tracks(
        &self,
        release_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<TrackItem>, ClientError>;

    /// Unknown or restricted ids yield `None` in their slot.
    async fn several_tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, ClientError>;

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, ClientError>;

    /// Returns the playlist snapshot id after insertion.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, ClientError>;

    async fn follow_artist(&self, artist_id: &str) -> Result<(), ClientError>;
}
