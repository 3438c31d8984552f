//! Playlist population for the tracks the pipeline produced.

use crate::{
    catalog::{CatalogClient, PLAYLIST_CHUNK_SIZE},
    error::CatalogError,
    types::Playlist,
    warning,
};

/// Inserts `uris` in chunks of at most `chunk_size`, in order.
///
/// Returns the number of insertion calls made. A failing chunk stops the
/// insertion; chunks inserted before it stay in the playlist and the error
/// reports which chunk failed.
pub async fn add_in_chunks<C: CatalogClient + ?Sized>(
    client: &C,
    playlist_id: &str,
    uris: &[String],
    chunk_size: usize,
) -> Result<usize, CatalogError> {
    let chunk_size = chunk_size.clamp(1, PLAYLIST_CHUNK_SIZE);
    let chunks = uris.len().div_ceil(chunk_size);
    let mut inserted = 0;

    for (index, chunk) in uris.chunks(chunk_size).enumerate() {
        client
            .add_tracks(playlist_id, chunk)
            .await
            .map_err(|source| CatalogError::PlaylistInsert {
                chunk: index + 1,
                chunks,
                inserted,
                source,
            })?;
        inserted += chunk.len();
    }

    Ok(chunks)
}

/// Creates the playlist and fills it with `uris`.
pub async fn create_and_fill<C: CatalogClient + ?Sized>(
    client: &C,
    name: &str,
    description: &str,
    public: bool,
    uris: &[String],
) -> Result<Playlist, CatalogError> {
    let playlist = client
        .create_playlist(name, description, public)
        .await
        .map_err(CatalogError::PlaylistCreate)?;

    add_in_chunks(client, &playlist.id, uris, PLAYLIST_CHUNK_SIZE).await?;
    Ok(playlist)
}

/// Follows the artist. Failures are only logged.
pub async fn follow_best_effort<C: CatalogClient + ?Sized>(client: &C, artist_id: &str) -> bool {
    match client.follow_artist(artist_id).await {
        Ok(()) => true,
        Err(e) => {
            warning!("Failed to follow artist {}: {}", artist_id, e);
            false
        }
    }
}
