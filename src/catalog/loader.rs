use std::collections::{HashMap, HashSet};

use indicatif::ProgressBar;

use crate::{
    catalog::{
        CatalogClient, RELEASE_BATCH_SIZE, Release, TRACK_BATCH_SIZE, TRACK_PAGE_SIZE, Throttle,
        TrackRecord, model::build_records,
    },
    error::{CatalogError, Stage},
    types::{FullTrack, ReleaseDetail},
};

/// Loads the track listing of every release and flattens it into records.
///
/// Releases are requested in batches of [`RELEASE_BATCH_SIZE`]. Listings longer
/// than the embedded first page are completed through the release tracks
/// endpoint before flattening. Only tracks crediting `owner` by exact name are
/// kept.
pub async fn load_tracks<C: CatalogClient + ?Sized>(
    client: &C,
    releases: &[Release],
    owner: &str,
    throttle: &mut Throttle,
    progress: &ProgressBar,
) -> Result<Vec<TrackRecord>, CatalogError> {
    let batches = releases.len().div_ceil(RELEASE_BATCH_SIZE);
    let mut records: Vec<TrackRecord> = Vec::new();

    for (index, batch) in releases.chunks(RELEASE_BATCH_SIZE).enumerate() {
        progress.set_message(format!(
            "Loading release details (batch {current}/{batches})...",
            current = index + 1
        ));

        let ids: Vec<String> = batch.iter().map(|r| r.id.clone()).collect();
        let mut details = client.several_releases(&ids).await.map_err(|e| {
            CatalogError::upstream(
                Stage::LoadReleases,
                format!("batch {}/{}", index + 1, batches),
                e,
            )
        })?;
        throttle.pause().await;

        for detail in details.iter_mut() {
            complete_track_listing(client, detail, throttle).await?;
        }

        records = flatten_batch(records, batch, &details, owner);
    }

    Ok(records)
}

async fn complete_track_listing<C: CatalogClient + ?Sized>(
    client: &C,
    detail: &mut ReleaseDetail,
    throttle: &mut Throttle,
) -> Result<(), CatalogError> {
    while detail.tracks.next.is_some() {
        let offset = detail.tracks.items.len() as u32;
        let page = client
            .release_tracks(&detail.id, TRACK_PAGE_SIZE, offset)
            .await
            .map_err(|e| {
                CatalogError::upstream(
                    Stage::LoadTrackPages,
                    format!("release {} offset {}", detail.id, offset),
                    e,
                )
            })?;
        throttle.pause().await;

        if page.items.is_empty() {
            break;
        }
        detail.tracks.items.extend(page.items);
        detail.tracks.next = page.next;
    }

    Ok(())
}

/// Appends the records of one batch, keeping the batch's release order.
/// Releases without a detail entry contribute nothing.
pub fn flatten_batch(
    mut records: Vec<TrackRecord>,
    batch: &[Release],
    details: &[ReleaseDetail],
    owner: &str,
) -> Vec<TrackRecord> {
    for release in batch {
        if let Some(detail) = details.iter().find(|d| d.id == release.id) {
            records.extend(build_records(release, detail.tracks.items.clone(), owner));
        }
    }
    records
}

/// Attaches ISRC and popularity to every record, in batches of
/// [`TRACK_BATCH_SIZE`] distinct track ids.
///
/// Records whose track is missing from the response keep no ISRC and later
/// resolve as singletons.
pub async fn enrich<C: CatalogClient + ?Sized>(
    client: &C,
    mut records: Vec<TrackRecord>,
    throttle: &mut Throttle,
    progress: &ProgressBar,
) -> Result<Vec<TrackRecord>, CatalogError> {
    let ids = distinct_track_ids(&records);
    let batches = ids.len().div_ceil(TRACK_BATCH_SIZE);

    for (index, chunk) in ids.chunks(TRACK_BATCH_SIZE).enumerate() {
        progress.set_message(format!(
            "Loading track details (batch {current}/{batches})...",
            current = index + 1
        ));

        let tracks = client.several_tracks(chunk).await.map_err(|e| {
            CatalogError::upstream(
                Stage::EnrichTracks,
                format!("batch {}/{}", index + 1, batches),
                e,
            )
        })?;
        throttle.pause().await;

        records = enrich_batch(records, tracks.into_iter().flatten().collect());
    }

    Ok(records)
}

/// Matches one batch of track details to records by track id.
pub fn enrich_batch(mut records: Vec<TrackRecord>, tracks: Vec<FullTrack>) -> Vec<TrackRecord> {
    let by_id: HashMap<&str, &FullTrack> = tracks.iter().map(|t| (t.id.as_str(), t)).collect();
    for record in records.iter_mut() {
        if let Some(track) = by_id.get(record.id.as_str()) {
            record.enrich(track);
        }
    }
    records
}

fn distinct_track_ids(records: &[TrackRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.id.as_str()))
        .map(|r| r.id.clone())
        .collect()
}
