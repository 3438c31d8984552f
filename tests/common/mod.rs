#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use discografy::{
    catalog::{CatalogClient, ReleaseGroup, ReleaseKind, TrackRecord},
    error::ClientError,
    types::{
        Artist, ArtistRef, ExternalIds, FullTrack, Page, Playlist, ReleaseDetail, ReleaseItem,
        TrackItem,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Artist(String),
    ArtistReleases { group: ReleaseGroup, offset: u32 },
    SeveralReleases(Vec<String>),
    ReleaseTracks { id: String, offset: u32 },
    SeveralTracks(Vec<String>),
    CreatePlaylist(String),
    AddTracks(usize),
    Follow(String),
}

/// In-memory catalog recording every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    pub artist: Option<Artist>,
    pub releases: HashMap<ReleaseGroup, Vec<ReleaseItem>>,
    /// Serve the first page forever, never an empty one.
    pub never_empty: bool,
    /// Full track listing per release.
    pub listings: HashMap<String, Vec<TrackItem>>,
    /// Tracks embedded in a release detail before the listing continues.
    pub embedded_limit: usize,
    pub full_tracks: HashMap<String, FullTrack>,
    pub fail_group: Option<ReleaseGroup>,
    pub fail_add_call: Option<usize>,
    pub fail_follow: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new(artist_name: &str) -> Self {
        Self {
            artist: Some(Artist {
                id: "artist1".to_string(),
                name: artist_name.to_string(),
            }),
            embedded_limit: 50,
            ..Default::default()
        }
    }

    pub fn with_release(
        mut self,
        group: ReleaseGroup,
        release: ReleaseItem,
        tracks: Vec<TrackItem>,
    ) -> Self {
        self.listings.insert(release.id.clone(), tracks);
        self.releases.entry(group).or_default().push(release);
        self
    }

    pub fn with_full_track(mut self, id: &str, isrc: Option<&str>, popularity: u32) -> Self {
        self.full_tracks.insert(id.to_string(), full_track(id, isrc, popularity));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page_of(&self, id: &str, limit: usize, offset: usize) -> Page<TrackItem> {
        let listing = self.listings.get(id).cloned().unwrap_or_default();
        let end = (offset + limit).min(listing.len());
        let items = if offset < listing.len() {
            listing[offset..end].to_vec()
        } else {
            Vec::new()
        };
        Page {
            items,
            next: (end < listing.len()).then(|| format!("{id}?offset={end}")),
        }
    }
}

fn failure(what: &str) -> ClientError {
    ClientError::Other(format!("{what} failed"))
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn artist(&self, artist_id: &str) -> Result<Artist, ClientError> {
        self.record(Call::Artist(artist_id.to_string()));
        self.artist.clone().ok_or_else(|| failure("artist"))
    }

    async fn artist_releases(
        &self,
        _artist_id: &str,
        group: ReleaseGroup,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ReleaseItem>, ClientError> {
        self.record(Call::ArtistReleases { group, offset });
        if self.fail_group == Some(group) {
            return Err(failure("artist releases"));
        }

        let all = self.releases.get(&group).cloned().unwrap_or_default();
        let offset = if self.never_empty { 0 } else { offset as usize };
        Ok(all
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn several_releases(&self, ids: &[String]) -> Result<Vec<ReleaseDetail>, ClientError> {
        self.record(Call::SeveralReleases(ids.to_vec()));
        let mut details = Vec::new();
        for id in ids {
            let Some(item) = self.releases.values().flatten().find(|r| &r.id == id) else {
                continue;
            };
            details.push(ReleaseDetail {
                id: item.id.clone(),
                name: item.name.clone(),
                release_date: item.release_date.clone(),
                tracks: self.page_of(id, self.embedded_limit, 0),
            });
        }
        Ok(details)
    }

    async fn release_tracks(
        &self,
        release_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<TrackItem>, ClientError> {
        self.record(Call::ReleaseTracks {
            id: release_id.to_string(),
            offset,
        });
        Ok(self.page_of(release_id, limit as usize, offset as usize))
    }

    async fn several_tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, ClientError> {
        self.record(Call::SeveralTracks(ids.to_vec()));
        Ok(ids.iter().map(|id| self.full_tracks.get(id).cloned()).collect())
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, ClientError> {
        self.record(Call::CreatePlaylist(name.to_string()));
        Ok(Playlist {
            id: "playlist1".to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            public: Some(public),
            snapshot_id: None,
        })
    }

    async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<String, ClientError> {
        let call_number = self
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::AddTracks(_)))
            .count()
            + 1;
        self.record(Call::AddTracks(uris.len()));
        if self.fail_add_call == Some(call_number) {
            return Err(failure("add tracks"));
        }
        Ok(format!("snapshot{call_number}"))
    }

    async fn follow_artist(&self, artist_id: &str) -> Result<(), ClientError> {
        self.record(Call::Follow(artist_id.to_string()));
        if self.fail_follow {
            return Err(failure("follow"));
        }
        Ok(())
    }
}

pub fn release_item(id: &str, date: &str, kind: ReleaseKind) -> ReleaseItem {
    ReleaseItem {
        id: id.to_string(),
        name: format!("Release {id}"),
        album_type: kind,
        release_date: date.to_string(),
        release_date_precision: "day".to_string(),
    }
}

pub fn track(id: &str, name: &str, artists: &[&str]) -> TrackItem {
    TrackItem {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        duration_ms: 180_000,
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                name: a.to_string(),
            })
            .collect(),
    }
}

pub fn full_track(id: &str, isrc: Option<&str>, popularity: u32) -> FullTrack {
    FullTrack {
        id: id.to_string(),
        name: id.to_string(),
        popularity: Some(popularity),
        external_ids: ExternalIds {
            isrc: isrc.map(str::to_string),
        },
    }
}

pub fn record(id: &str, title: &str, isrc: Option<&str>, kind: ReleaseKind, external: bool) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        title: title.to_string(),
        uri: format!("spotify:track:{id}"),
        release_id: format!("release-{id}"),
        release_name: format!("Release {id}"),
        release_date: "2020-01-01".to_string(),
        kind,
        isrc: isrc.map(str::to_string),
        popularity: None,
        external,
        duration_ms: 200_000,
        artists: vec!["Artist".to_string()],
    }
}

pub fn ids(records: &[TrackRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
