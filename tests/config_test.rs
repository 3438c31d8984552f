use std::{collections::HashMap, time::Duration};

use discografy::{catalog::ThrottlePolicy, config::Config, error::CatalogError};

fn config_from(vars: &[(&str, &str)]) -> Result<Config, CatalogError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_defaults_without_variables() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(config.page_size, 50);
    assert_eq!(config.throttle_delay, Duration::from_millis(500));
    assert!(config.client_id().is_err());
    assert!(config.user_id().is_err());
}

#[test]
fn test_page_size_must_be_within_endpoint_limit() {
    for bad in ["0", "51", "1000"] {
        let result = config_from(&[("PAGE_SIZE", bad)]);
        assert!(
            matches!(result, Err(CatalogError::Config(_))),
            "PAGE_SIZE={bad} was accepted"
        );
    }

    assert_eq!(config_from(&[("PAGE_SIZE", "1")]).unwrap().page_size, 1);
    assert_eq!(config_from(&[("PAGE_SIZE", " 20 ")]).unwrap().page_size, 20);
}

#[test]
fn test_invalid_numbers_are_config_errors() {
    assert!(matches!(
        config_from(&[("PAGE_SIZE", "fifty")]),
        Err(CatalogError::Config(_))
    ));
    assert!(matches!(
        config_from(&[("THROTTLE_DELAY_MS", "-5")]),
        Err(CatalogError::Config(_))
    ));
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = config_from(&[("PAGE_SIZE", "  "), ("SPOTIFY_USER_ID", "")]).unwrap();

    assert_eq!(config.page_size, 50);
    assert!(config.user_id().is_err());
}

#[test]
fn test_zero_delay_disables_throttle() {
    let config = config_from(&[("THROTTLE_DELAY_MS", "0")]).unwrap();
    assert_eq!(config.throttle_policy(), ThrottlePolicy::Disabled);

    let config = config_from(&[("THROTTLE_DELAY_MS", "250")]).unwrap();
    assert_eq!(
        config.throttle_policy(),
        ThrottlePolicy::FixedDelay(Duration::from_millis(250))
    );
}
