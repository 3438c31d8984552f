use indicatif::ProgressBar;

use crate::catalog::{
    CatalogClient, Throttle, ThrottlePolicy, TrackRecord, alternates,
    fetch::{self, FetchOptions},
    loader, resolve,
};
use crate::error::{CatalogError, Stage};
use crate::types::Artist;

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct Discography {
    pub artist: Artist,
    pub releases: usize,
    /// Records before duplicate resolution.
    pub loaded: usize,
    /// Records after duplicate resolution, before the alternate filter.
    pub resolved: usize,
    pub tracks: Vec<TrackRecord>,
}

/// Runs the whole catalog pipeline for one artist at a time.
pub struct Pipeline<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    throttle: Throttle,
    options: FetchOptions,
    progress: ProgressBar,
}

impl<'a, C: CatalogClient + ?Sized> Pipeline<'a, C> {
    pub fn new(client: &'a C, policy: ThrottlePolicy) -> Self {
        Self {
            client,
            throttle: Throttle::new(policy),
            options: FetchOptions::default(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Reports stage progress through the given bar instead of a hidden one.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Canonical tracks of the artist, oldest release first.
    pub async fn run(&mut self, artist_id: &str) -> Result<Discography, CatalogError> {
        self.progress.set_message("Fetching artist...");
        let artist = self
            .client
            .artist(artist_id)
            .await
            .map_err(|e| CatalogError::upstream(Stage::FetchArtist, artist_id, e))?;
        self.throttle.pause().await;

        let mut releases = fetch::fetch_all_releases(
            self.client,
            artist_id,
            self.options,
            &mut self.throttle,
            &self.progress,
        )
        .await?;
        fetch::order_by_release_date(&mut releases);

        let records = loader::load_tracks(
            self.client,
            &releases,
            &artist.name,
            &mut self.throttle,
            &self.progress,
        )
        .await?;
        let records =
            loader::enrich(self.client, records, &mut self.throttle, &self.progress).await?;

        self.progress.set_message("Resolving duplicates...");
        let loaded = records.len();
        let resolved = resolve::resolve(records);
        let resolved_count = resolved.len();
        let tracks = alternates::filter_alternates(resolved);

        self.progress.finish_and_clear();
        Ok(Discography {
            artist,
            releases: releases.len(),
            loaded,
            resolved: resolved_count,
            tracks,
        })
    }
}
