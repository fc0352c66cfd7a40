//! Integration tests for configuration and its validated newtypes.

use payment_portal::clients::HttpBackend;
use payment_portal::rest::resources::Product;
use payment_portal::rest::ResourceClient;
use payment_portal::{
    ApiBaseUrl, ApiKey, ApiVersion, ClientConfig, ClientConfigBuilder, ConfigError, RetryPolicy,
};
use std::time::Duration;

fn test_key() -> ApiKey {
    ApiKey::new("sk_test_4eC39HqLyjWDarjtT1zdp7dc").unwrap()
}

// ============================================================================
// Newtype validation
// ============================================================================

#[test]
fn test_api_key_validation() {
    assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    assert!(matches!(
        ApiKey::new("sk_test_ 123"),
        Err(ConfigError::MalformedApiKey)
    ));
    assert!(matches!(
        ApiKey::new("sk_test_123\n"),
        Err(ConfigError::MalformedApiKey)
    ));

    let live = ApiKey::new("rk_live_abc").unwrap();
    assert!(live.is_live_mode());
    assert!(!live.is_test_mode());
}

#[test]
fn test_api_key_debug_hides_secret() {
    let debug = format!("{:?}", test_key());

    assert!(!debug.contains("4eC39HqLyjWDarjtT1zdp7dc"));
    assert!(debug.contains("sk_test_"));
}

#[test]
fn test_api_base_validation() {
    for url in [
        "api.stripe.com/v1",
        "ftp://api.stripe.com",
        "https://",
        "https://api.stripe.com/v1?x=1",
    ] {
        assert!(
            matches!(ApiBaseUrl::new(url), Err(ConfigError::InvalidApiBase { .. })),
            "{url} should be rejected"
        );
    }

    let base = ApiBaseUrl::new("https://api.stripe.com/v1/").unwrap();
    assert_eq!(base.as_ref(), "https://api.stripe.com/v1");
    assert_eq!(base.join("/plans"), "https://api.stripe.com/v1/plans");
}

#[test]
fn test_api_version_parsing_and_ordering() {
    let older: ApiVersion = "2017-08-15".parse().unwrap();
    let newer: ApiVersion = "2018-02-28".parse().unwrap();

    assert!(older < newer);
    assert_eq!(newer, ApiVersion::new(2018, 2, 28).unwrap());

    for bad in ["2018-13-01", "2018-02-00", "18-02-28", "latest", ""] {
        assert!(
            matches!(
                bad.parse::<ApiVersion>(),
                Err(ConfigError::InvalidApiVersion { .. })
            ),
            "{bad} should be rejected"
        );
    }
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_requires_key() {
    let result = ClientConfigBuilder::new().build();

    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "api_key" })
    ));
}

#[test]
fn test_builder_carries_every_setting() {
    let config = ClientConfig::builder()
        .api_key(test_key())
        .api_base(ApiBaseUrl::new("http://localhost:12111/v1").unwrap())
        .api_version("2018-02-28".parse().unwrap())
        .retry(RetryPolicy::new(2, Duration::from_millis(250)))
        .timeout(Duration::from_secs(10))
        .user_agent_prefix("wobscale-portal/1.0")
        .build()
        .unwrap();

    assert_eq!(config.api_key(), &test_key());
    assert_eq!(config.api_base().as_ref(), "http://localhost:12111/v1");
    assert_eq!(config.api_version().map(ToString::to_string).as_deref(), Some("2018-02-28"));
    assert_eq!(config.retry().max_attempts(), 3);
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.user_agent_prefix(), Some("wobscale-portal/1.0"));
}

#[test]
fn test_retry_policy_defaults_to_single_attempt() {
    assert_eq!(RetryPolicy::default().max_attempts(), 1);
    assert_eq!(RetryPolicy::new(u32::MAX, Duration::ZERO).max_attempts(), u32::MAX);
}

#[test]
fn test_config_builds_transport_and_clients() {
    let config = ClientConfig::builder()
        .api_key(test_key())
        .user_agent_prefix("wobscale-portal/1.0")
        .build()
        .unwrap();

    let backend = HttpBackend::new(&config).unwrap();
    let user_agent = backend.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("wobscale-portal/1.0 | Payment Portal Library v"));
    assert!(!backend.default_headers().contains_key("Stripe-Version"));

    let products = ResourceClient::<Product>::from_config(&config).unwrap();
    assert_eq!(products.key(), config.api_key());
}

#[test]
fn test_config_is_send_sync() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<ClientConfig>();
    assert_send_sync::<ResourceClient<Product>>();
}
