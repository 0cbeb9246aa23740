//! Credential manager behavior against stub HTTP endpoints: refresh-on-401
//! retry policy, fail-fast statuses, and authorization-code exchange.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spotr_setup::auth::config::{
    ConfigStore, KEY_ACCESS_TOKEN, KEY_BASIC_CREDENTIALS, KEY_GENIUS_TOKEN, KEY_REFRESH_TOKEN,
};
use spotr_setup::auth::{AuthError, CredentialManager, CredentialProvider, SpotifyAuthorization};

fn authorized_config(dir: &TempDir) -> ConfigStore {
    let mut config = ConfigStore::load(dir.path().join("config.json")).unwrap();
    config.set(KEY_ACCESS_TOKEN, "stale");
    config.set(KEY_REFRESH_TOKEN, "refresh-1");
    config.set(KEY_BASIC_CREDENTIALS, "blob64");
    config
}

fn manager_for(server: &MockServer, config: ConfigStore) -> CredentialManager {
    CredentialManager::with_config(config)
        .unwrap()
        .with_accounts_url(server.uri())
}

#[test]
fn config_round_trips_all_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Spotr").join("config.json");

    let mut config = ConfigStore::load(&path).unwrap();
    config.set(KEY_ACCESS_TOKEN, "k");
    config.set(KEY_REFRESH_TOKEN, "r");
    config.set(KEY_BASIC_CREDENTIALS, "b");
    config.set(KEY_GENIUS_TOKEN, "g");
    config.persist();

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.get(KEY_ACCESS_TOKEN), Some("k"));
    assert_eq!(reloaded.get(KEY_REFRESH_TOKEN), Some("r"));
    assert_eq!(reloaded.get(KEY_BASIC_CREDENTIALS), Some("b"));
    assert_eq!(reloaded.get(KEY_GENIUS_TOKEN), Some("g"));
}

#[tokio::test]
async fn unauthorized_response_refreshes_once_and_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", "Basic blob64"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut manager = manager_for(&server, authorized_config(&dir));

    let body = manager
        .request(Method::GET, &format!("{}/v1/me", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, Some(json!({ "id": "user-1" })));
    assert_eq!(manager.config().get(KEY_ACCESS_TOKEN), Some("fresh"));

    // The refreshed key was persisted, not just kept in memory.
    let reloaded = ConfigStore::load(dir.path().join("config.json")).unwrap();
    assert_eq!(reloaded.get(KEY_ACCESS_TOKEN), Some("fresh"));
}

#[tokio::test]
async fn server_error_triggers_no_refresh_and_no_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut manager = manager_for(&server, authorized_config(&dir));

    let result = manager
        .request(Method::GET, &format!("{}/v1/me", server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(AuthError::RequestFailed { status: 500 })
    ));
}

#[tokio::test]
async fn success_with_non_json_body_is_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/play"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut manager = manager_for(&server, authorized_config(&dir));

    let body = manager
        .request(Method::GET, &format!("{}/v1/play", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, None);
}

#[tokio::test]
async fn refresh_without_stored_credentials_is_not_authorized() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let empty = ConfigStore::load(dir.path().join("config.json")).unwrap();
    let mut manager = manager_for(&server, empty);

    let result = manager.refresh_access_token().await;
    assert!(matches!(result, Err(AuthError::NotAuthorized(_))));
}

#[tokio::test]
async fn authorization_code_exchange_stores_and_persists_credentials() {
    let server = MockServer::start().await;
    let expected_blob = BASE64.encode("my-id:my-secret");

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", format!("Basic {expected_blob}")))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=validcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "first-access",
            "refresh_token": "long-lived",
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    let mut config = ConfigStore::load(&config_path).unwrap();

    let spotify = SpotifyAuthorization::new("my-id", "my-secret")
        .unwrap()
        .with_accounts_url(server.uri());
    spotify
        .complete_flow(&mut config, "validcode")
        .await
        .unwrap();

    assert_eq!(config.get(KEY_REFRESH_TOKEN), Some("long-lived"));
    assert_eq!(config.get(KEY_BASIC_CREDENTIALS), Some(expected_blob.as_str()));

    // Both keys hit the disk before complete_flow returned.
    let reloaded = ConfigStore::load(&config_path).unwrap();
    assert_eq!(reloaded.get(KEY_REFRESH_TOKEN), Some("long-lived"));
    assert_eq!(
        reloaded.get(KEY_BASIC_CREDENTIALS),
        Some(expected_blob.as_str())
    );
}

#[tokio::test]
async fn rejected_code_exchange_is_a_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = ConfigStore::load(dir.path().join("config.json")).unwrap();

    let spotify = SpotifyAuthorization::new("my-id", "my-secret")
        .unwrap()
        .with_accounts_url(server.uri());
    let result = spotify.complete_flow(&mut config, "badcode").await;

    assert!(matches!(
        result,
        Err(AuthError::TokenExchange { status: 400 })
    ));
    assert!(config.get(KEY_REFRESH_TOKEN).is_none());
}
