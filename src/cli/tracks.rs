use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog::{Discography, Pipeline, fetch::FetchOptions},
    config::Config,
    error,
    error::CatalogError,
    info,
    spotify::SpotifyClient,
    success, utils,
};

pub async fn tracks(config: Config, artist: String) {
    let client = connect(&config).await;
    let discography = load_discography(&client, &config, &artist).await;

    let table = Table::new(utils::track_table_rows(&discography.tracks));
    println!("{}", table);
    success!(
        "{count} tracks by {artist}, {duration} in total.",
        count = discography.tracks.len(),
        artist = discography.artist.name,
        duration = utils::total_duration(&discography.tracks)
    );
}

pub(crate) async fn connect(config: &Config) -> SpotifyClient {
    match SpotifyClient::connect(config.clone()).await {
        Ok(client) => client,
        Err(CatalogError::Unauthorized(e)) => {
            error!("Not authorized. Please run discografy auth\n Error: {}", e)
        }
        Err(e) => error!("{}", e),
    }
}

/// Runs the catalog pipeline, exiting with a message on failure.
pub(crate) async fn load_discography(
    client: &SpotifyClient,
    config: &Config,
    artist: &str,
) -> Discography {
    let artist_id = match utils::parse_artist_id(artist) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let options = FetchOptions {
        page_size: config.page_size,
        ..FetchOptions::default()
    };
    let result = Pipeline::new(client, config.throttle_policy())
        .with_options(options)
        .with_progress(pb.clone())
        .run(&artist_id)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(discography) => {
            info!(
                "{releases} releases, {loaded} tracks, {resolved} after deduplication, {kept} after removing alternate versions",
                releases = discography.releases,
                loaded = discography.loaded,
                resolved = discography.resolved,
                kept = discography.tracks.len()
            );
            discography
        }
        Err(e) => error!("Cannot load catalog of {}: {}", artist_id, e),
    }
}
