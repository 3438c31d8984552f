use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{catalog::TrackRecord, types::TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Accepts a bare id, a `spotify:artist:<id>` uri or an artist URL.
pub fn parse_artist_id(input: &str) -> Result<String, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("artist id cannot be empty".to_string());
    }

    let id = if let Some(rest) = input.strip_prefix("spotify:artist:") {
        rest
    } else if let Some(pos) = input.find("/artist/") {
        let rest = &input[pos + "/artist/".len()..];
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        input
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("invalid artist id '{input}'"));
    }
    Ok(id.to_string())
}

pub fn track_uris(tracks: &[TrackRecord]) -> Vec<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}

pub fn track_table_rows(tracks: &[TrackRecord]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            date: t.release_date.clone(),
            release: t.release_name.clone(),
            title: t.title.clone(),
            kind: if t.external {
                format!("{} (guest)", t.kind)
            } else {
                t.kind.to_string()
            },
            isrc: t.isrc.clone().unwrap_or_else(|| "-".to_string()),
            popularity: t
                .popularity
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

pub fn total_duration(tracks: &[TrackRecord]) -> String {
    format_duration(tracks.iter().map(|t| t.duration_ms).sum())
}

pub fn playlist_description(artist_name: &str, tracks: &[TrackRecord]) -> String {
    format!(
        "Every {artist_name} track, one version each. {count} tracks, {duration}.",
        count = tracks.len(),
        duration = total_duration(tracks)
    )
}
