mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::record;
use discografy::catalog::{
    Release, ReleaseGroup, ReleaseKind, ThrottlePolicy, model::parse_release_date,
};
use discografy::types::ReleaseItem;
use discografy::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");

    assert!(!challenge.is_empty());
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // URL-safe base64 without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_artist_id_accepts_id_uri_and_url() {
    let id = "0OdUWJ0sBjDrqHygGUXeCF";

    assert_eq!(parse_artist_id(id).unwrap(), id);
    assert_eq!(parse_artist_id(&format!("  {id} ")).unwrap(), id);
    assert_eq!(parse_artist_id(&format!("spotify:artist:{id}")).unwrap(), id);
    assert_eq!(
        parse_artist_id(&format!("https://open.spotify.com/artist/{id}?si=abc")).unwrap(),
        id
    );
    assert_eq!(
        parse_artist_id(&format!("https://open.spotify.com/intl-de/artist/{id}/")).unwrap(),
        id
    );
}

#[test]
fn test_parse_artist_id_rejects_garbage() {
    assert!(parse_artist_id("").is_err());
    assert!(parse_artist_id("   ").is_err());
    assert!(parse_artist_id("spotify:artist:").is_err());
    assert!(parse_artist_id("not an id").is_err());
    assert!(parse_artist_id("https://open.spotify.com/artist/").is_err());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(59_999), "0:59");
    assert_eq!(format_duration(185_000), "3:05");
    assert_eq!(format_duration(3_600_000), "1:00:00");
    assert_eq!(format_duration(3_725_000), "1:02:05");
}

#[test]
fn test_playlist_description_counts_tracks() {
    let tracks = vec![
        record("a", "A", None, ReleaseKind::Album, false),
        record("b", "B", None, ReleaseKind::Album, false),
    ];

    assert_eq!(total_duration(&tracks), "6:40");
    assert_eq!(
        playlist_description("Nova", &tracks),
        "Every Nova track, one version each. 2 tracks, 6:40."
    );
    assert_eq!(
        track_uris(&tracks),
        vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()]
    );
}

#[test]
fn test_track_table_rows_mark_guest_appearances() {
    let mut own = record("a", "Own", Some("ISRC1"), ReleaseKind::Single, false);
    own.popularity = Some(42);
    let guest = record("b", "Guest", None, ReleaseKind::Compilation, true);

    let rows = track_table_rows(&[own, guest]);

    assert_eq!(rows[0].kind, "single");
    assert_eq!(rows[0].isrc, "ISRC1");
    assert_eq!(rows[0].popularity, "42");
    assert_eq!(rows[1].kind, "compilation (guest)");
    assert_eq!(rows[1].isrc, "-");
    assert_eq!(rows[1].popularity, "-");
}

#[test]
fn test_release_group_display_and_order() {
    assert_eq!(ReleaseGroup::Album.to_string(), "album");
    assert_eq!(ReleaseGroup::AppearsOn.to_string(), "appears_on");
    assert_eq!(
        ReleaseGroup::ALL,
        [
            ReleaseGroup::Album,
            ReleaseGroup::Single,
            ReleaseGroup::Compilation,
            ReleaseGroup::AppearsOn,
        ]
    );
}

#[test]
fn test_release_kind_unknown_type_counts_as_single() {
    let kind: ReleaseKind = serde_json::from_str("\"compilation\"").unwrap();
    assert_eq!(kind, ReleaseKind::Compilation);

    let kind: ReleaseKind = serde_json::from_str("\"ep\"").unwrap();
    assert_eq!(kind, ReleaseKind::Single);
    assert_eq!(kind.to_string(), "single");
}

#[test]
fn test_release_items_decode_with_unknown_album_type() {
    let body = r#"[
        {"id": "r1", "name": "Debut", "album_type": "album",
         "release_date": "2019-04-12", "release_date_precision": "day",
         "total_tracks": 11, "artists": [{"id": "a1", "name": "Nova"}]},
        {"id": "r2", "name": "Hits", "album_type": "compilation", "release_date": "2021"},
        {"id": "r3", "name": "Short One", "album_type": "ep",
         "release_date": "2020-02", "release_date_precision": "month"}
    ]"#;

    let items: Vec<ReleaseItem> = serde_json::from_str(body).unwrap();
    let kinds: Vec<ReleaseKind> = items.iter().map(|i| i.album_type).collect();

    assert_eq!(
        kinds,
        vec![ReleaseKind::Album, ReleaseKind::Compilation, ReleaseKind::Single]
    );
    assert_eq!(items[1].release_date_precision, "day");

    let release = Release::from_item(items[2].clone(), ReleaseGroup::Single);
    let json = serde_json::to_string(&release).unwrap();
    assert!(json.contains(r#""kind":"single""#));
    assert_eq!(serde_json::from_str::<Release>(&json).unwrap(), release);
}

#[test]
fn test_parse_release_date_precisions() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);

    assert_eq!(parse_release_date("2021-07-09", "day"), date(2021, 7, 9));
    assert_eq!(parse_release_date("2021-07", "month"), date(2021, 7, 1));
    assert_eq!(parse_release_date("2021", "year"), date(2021, 1, 1));
    assert_eq!(parse_release_date("soon", "year"), None);
    assert_eq!(parse_release_date("2021", "day"), None);
}

#[test]
fn test_throttle_policy_per_second() {
    assert_eq!(
        ThrottlePolicy::per_second(4),
        ThrottlePolicy::MinInterval(Duration::from_millis(250))
    );
    assert_eq!(ThrottlePolicy::per_second(0), ThrottlePolicy::Disabled);
    assert_eq!(
        ThrottlePolicy::default(),
        ThrottlePolicy::FixedDelay(Duration::from_millis(500))
    );
}
