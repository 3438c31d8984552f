mod common;

use common::{Call, FakeCatalog};
use discografy::{
    error::CatalogError,
    playlist::{add_in_chunks, create_and_fill, follow_best_effort},
};

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:t{i}")).collect()
}

fn add_calls(fake: &FakeCatalog) -> Vec<usize> {
    fake.calls()
        .iter()
        .filter_map(|c| match c {
            Call::AddTracks(len) => Some(*len),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_add_in_chunks_splits_by_hundred() {
    let fake = FakeCatalog::new("Nova");

    let calls = add_in_chunks(&fake, "playlist1", &uris(250), 100).await.unwrap();

    assert_eq!(calls, 3);
    assert_eq!(add_calls(&fake), vec![100, 100, 50]);
}

#[tokio::test]
async fn test_add_in_chunks_with_nothing_to_add() {
    let fake = FakeCatalog::new("Nova");

    let calls = add_in_chunks(&fake, "playlist1", &[], 100).await.unwrap();

    assert_eq!(calls, 0);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_add_in_chunks_caps_chunk_size() {
    let fake = FakeCatalog::new("Nova");

    add_in_chunks(&fake, "playlist1", &uris(150), 500).await.unwrap();

    assert_eq!(add_calls(&fake), vec![100, 50]);
}

#[tokio::test]
async fn test_add_in_chunks_reports_failed_chunk() {
    let mut fake = FakeCatalog::new("Nova");
    fake.fail_add_call = Some(2);

    let result = add_in_chunks(&fake, "playlist1", &uris(250), 100).await;

    match result {
        Err(CatalogError::PlaylistInsert {
            chunk,
            chunks,
            inserted,
            ..
        }) => {
            assert_eq!(chunk, 2);
            assert_eq!(chunks, 3);
            assert_eq!(inserted, 100);
        }
        other => panic!("expected insert error, got {:?}", other),
    }
    // the third chunk is never sent
    assert_eq!(add_calls(&fake), vec![100, 100]);
}

#[tokio::test]
async fn test_create_and_fill_creates_then_inserts() {
    let fake = FakeCatalog::new("Nova");

    let playlist = create_and_fill(&fake, "Nova - Complete", "every track", false, &uris(120))
        .await
        .unwrap();

    assert_eq!(playlist.id, "playlist1");
    assert_eq!(playlist.public, Some(false));
    assert_eq!(
        fake.calls(),
        vec![
            Call::CreatePlaylist("Nova - Complete".to_string()),
            Call::AddTracks(100),
            Call::AddTracks(20),
        ]
    );
}

#[tokio::test]
async fn test_follow_failure_is_not_fatal() {
    let mut fake = FakeCatalog::new("Nova");
    assert!(follow_best_effort(&fake, "artist1").await);

    fake.fail_follow = true;
    assert!(!follow_best_effort(&fake, "artist1").await);
    assert_eq!(fake.calls().len(), 2);
}
