use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ArtistRef, FullTrack, ReleaseItem, TrackItem};

/// Listing an artist's releases is filtered by one of these groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseGroup {
    Album,
    Single,
    Compilation,
    AppearsOn,
}

impl ReleaseGroup {
    /// Fetch order of the groups.
    pub const ALL: [ReleaseGroup; 4] = [
        ReleaseGroup::Album,
        ReleaseGroup::Single,
        ReleaseGroup::Compilation,
        ReleaseGroup::AppearsOn,
    ];
}

impl fmt::Display for ReleaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseGroup::Album => "album",
            ReleaseGroup::Single => "single",
            ReleaseGroup::Compilation => "compilation",
            ReleaseGroup::AppearsOn => "appears_on",
        };
        f.write_str(s)
    }
}

/// The release's own type. Unknown types count as singles, which is how the
/// catalog labels EPs and other short releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    Album,
    Compilation,
    #[serde(other)]
    Single,
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseKind::Album => "album",
            ReleaseKind::Single => "single",
            ReleaseKind::Compilation => "compilation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub group: ReleaseGroup,
    pub kind: ReleaseKind,
}

impl Release {
    pub fn from_item(item: ReleaseItem, group: ReleaseGroup) -> Self {
        Self {
            id: item.id,
            name: item.name,
            release_date: item.release_date,
            release_date_precision: item.release_date_precision,
            group,
            kind: item.album_type,
        }
    }

    /// Parsed release date; year and month precision resolve to the first day.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_release_date(&self.release_date, &self.release_date_precision)
    }

    /// Tracks of a guest appearance are not primarily credited to the artist.
    pub fn is_external(&self) -> bool {
        self.group == ReleaseGroup::AppearsOn
    }
}

pub fn parse_release_date(date: &str, precision: &str) -> Option<NaiveDate> {
    match precision {
        "year" => NaiveDate::parse_from_str(&format!("{date}-01-01"), "%Y-%m-%d").ok(),
        "month" => NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub title: String,
    pub uri: String,
    pub release_id: String,
    pub release_name: String,
    pub release_date: String,
    pub kind: ReleaseKind,
    pub isrc: Option<String>,
    pub popularity: Option<u32>,
    pub external: bool,
    pub duration_ms: u64,
    pub artists: Vec<String>,
}

impl TrackRecord {
    pub fn new(release: &Release, track: TrackItem) -> Self {
        Self {
            id: track.id,
            title: track.name,
            uri: track.uri,
            release_id: release.id.clone(),
            release_name: release.name.clone(),
            release_date: release.release_date.clone(),
            kind: release.kind,
            isrc: None,
            popularity: None,
            external: release.is_external(),
            duration_ms: track.duration_ms,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }

    pub fn enrich(&mut self, track: &FullTrack) {
        self.isrc = track.external_ids.isrc.clone();
        self.popularity = track.popularity;
    }

    /// Key used when the filter writes its output.
    pub fn recording_key(&self) -> &str {
        self.isrc.as_deref().unwrap_or(&self.id)
    }
}

/// Whether `owner` is credited on the track by exact name.
pub fn credits_artist(artists: &[ArtistRef], owner: &str) -> bool {
    artists.iter().any(|a| a.name == owner)
}

/// Turns one release and its full track listing into records. Tracks that do
/// not credit `owner` are dropped.
pub fn build_records(release: &Release, tracks: Vec<TrackItem>, owner: &str) -> Vec<TrackRecord> {
    tracks
        .into_iter()
        .filter(|t| credits_artist(&t.artists, owner))
        .map(|t| TrackRecord::new(release, t))
        .collect()
}
