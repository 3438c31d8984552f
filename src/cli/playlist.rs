use crate::{config::Config, error, error::CatalogError, info, playlist, success, utils, warning};

use super::tracks::{connect, load_discography};

pub async fn playlist(
    config: Config,
    artist: String,
    name: Option<String>,
    public: bool,
    follow: bool,
) {
    if let Err(e) = config.user_id() {
        error!("{}", e);
    }

    let client = connect(&config).await;
    let discography = load_discography(&client, &config, &artist).await;
    if discography.tracks.is_empty() {
        warning!("No tracks found for {}", discography.artist.name);
        return;
    }

    let name =
        name.unwrap_or_else(|| format!("{} - Complete Discography", discography.artist.name));
    let description = utils::playlist_description(&discography.artist.name, &discography.tracks);
    let uris = utils::track_uris(&discography.tracks);

    info!("Create playlist {} with {} tracks", name, uris.len());
    match playlist::create_and_fill(&client, &name, &description, public, &uris).await {
        Ok(created) => success!("Playlist {} created ({}).", created.name, created.id),
        Err(e @ CatalogError::PlaylistInsert { .. }) => {
            error!("Playlist is incomplete, run again to start over: {}", e)
        }
        Err(e) => error!("{}", e),
    }

    if follow && playlist::follow_best_effort(&client, &discography.artist.id).await {
        success!("Following {}.", discography.artist.name);
    }
}
