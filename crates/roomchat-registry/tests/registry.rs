//! Integration tests for the registry client against a mock HTTP registry.

use std::time::Duration;

use roomchat_protocol::{ParticipantName, RoomIdentity};
use roomchat_registry::{AdminCredential, RegistryClient, RegistryConfig, RegistryError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a mock registry and a client pointed at its `/chat` prefix.
async fn setup() -> (MockServer, RegistryClient) {
    let server = MockServer::start().await;
    let config = RegistryConfig::default()
        .http_base(format!("{}/chat", server.uri()))
        .create_timeout(Duration::from_secs(2))
        .admin_timeout(Duration::from_secs(2));
    let client = RegistryClient::new(config).expect("client should build");
    (server, client)
}

fn admin(room: &str, token: &str) -> AdminCredential {
    AdminCredential::new(RoomIdentity::new(room), token)
}

// =========================================================================
// create_room
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_bound_credential() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/chat/create"))
        .and(query_param("room", "lobby"))
        .respond_with(ResponseTemplate::new(201).set_body_string("tok-123"))
        .expect(1)
        .mount(&server)
        .await;

    let cred = client
        .create_room(&RoomIdentity::new("lobby"))
        .await
        .expect("create should succeed");
    assert_eq!(cred.room(), &RoomIdentity::new("lobby"));
    assert_eq!(cred.token(), "tok-123");
}

#[tokio::test]
async fn test_create_existing_room_fails_without_side_effects() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/chat/create"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;
    // Nothing may touch the existing room after a refused create.
    Mock::given(path("/chat/lobby/delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .create_room(&RoomIdentity::new("lobby"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, RegistryError::RoomAlreadyExists(ref room) if room.as_str() == "lobby"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_create_with_200_is_still_a_conflict() {
    // Only 201 means "created".
    let (server, client) = setup().await;
    Mock::given(path("/chat/create"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tok"))
        .mount(&server)
        .await;

    let err = client
        .create_room(&RoomIdentity::new("lobby"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::RoomAlreadyExists(_)));
}

#[tokio::test]
async fn test_create_unreachable_registry_is_unavailable() {
    let config = RegistryConfig::default().http_base("http://127.0.0.1:1/chat");
    let client = RegistryClient::new(config).unwrap();

    let err = client
        .create_room(&RoomIdentity::new("lobby"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn test_create_times_out() {
    let server = MockServer::start().await;
    Mock::given(path("/chat/create"))
        .respond_with(
            ResponseTemplate::new(201).set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let config = RegistryConfig::default()
        .http_base(format!("{}/chat", server.uri()))
        .create_timeout(Duration::from_millis(100));
    let client = RegistryClient::new(config).unwrap();

    let err = client
        .create_room(&RoomIdentity::new("lobby"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unavailable(_)), "got {err:?}");
}

// =========================================================================
// kick_user / close_room
// =========================================================================

#[tokio::test]
async fn test_kick_user_sends_user_and_admin_token() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/chat/lobby/delete"))
        .and(query_param("user", "bob"))
        .and(query_param("admin", "tok-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let kicked = client
        .kick_user(&admin("lobby", "tok-123"), &ParticipantName::new("bob"))
        .await;
    assert!(kicked);
}

#[tokio::test]
async fn test_kick_with_wrong_token_returns_false() {
    let (server, client) = setup().await;
    Mock::given(path("/chat/lobby/delete"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let kicked = client
        .kick_user(&admin("lobby", "wrong"), &ParticipantName::new("bob"))
        .await;
    assert!(!kicked);
}

#[tokio::test]
async fn test_close_room_sends_only_admin_token() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/chat/lobby/delete"))
        .and(query_param("admin", "tok-123"))
        .and(query_param_is_missing("user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.close_room(&admin("lobby", "tok-123")).await);
}

#[tokio::test]
async fn test_close_with_wrong_token_returns_false() {
    let (server, client) = setup().await;
    Mock::given(path("/chat/lobby/delete"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert!(!client.close_room(&admin("lobby", "wrong")).await);
}

#[tokio::test]
async fn test_admin_calls_on_unreachable_registry_return_false() {
    let config = RegistryConfig::default()
        .http_base("http://127.0.0.1:1/chat")
        .admin_timeout(Duration::from_secs(1));
    let client = RegistryClient::new(config).unwrap();
    let cred = admin("lobby", "tok");

    assert!(!client.kick_user(&cred, &ParticipantName::new("bob")).await);
    assert!(!client.close_room(&cred).await);
}

#[tokio::test]
async fn test_room_name_is_path_encoded() {
    let (server, client) = setup().await;
    Mock::given(path("/chat/my%20room/delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.close_room(&admin("my room", "tok")).await);
}
