#![allow(clippy::unwrap_used)]
// Behavior tests for `HomeModeSwitch` against a wiremock station.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use synohome_core::{CoreError, HomeModeSwitch, SwitchConfig, ToggleState};

// ── Helpers ─────────────────────────────────────────────────────────

async fn mount_station(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/webapi/query.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "SYNO.API.Auth": { "path": "auth.cgi" },
                "SYNO.SurveillanceStation.HomeMode": { "path": "entry.cgi" }
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .and(query_param("method", "Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "sid": "S1" }
        })))
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> SwitchConfig {
    SwitchConfig::new(
        server.uri().parse().unwrap(),
        "viewer",
        "test-password".to_string().into(),
    )
}

async fn setup(server: &MockServer) -> HomeModeSwitch {
    HomeModeSwitch::setup(config(server)).await.unwrap()
}

async fn mount_home_mode_info(server: &MockServer, on: bool) {
    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .and(query_param("method", "GetInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "on": on }
        })))
        .mount(server)
        .await;
}

// ── Entity surface ──────────────────────────────────────────────────

#[tokio::test]
async fn test_defaults_before_first_poll() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    let switch = setup(&server).await;

    assert_eq!(switch.name(), "Surveillance Station Home Mode");
    assert_eq!(switch.state(), ToggleState::Off);
    assert!(!switch.is_on());
    assert_eq!(switch.icon(), "mdi:home-outline");
}

#[tokio::test]
async fn test_poll_updates_state_and_icon() {
    let server = MockServer::start().await;
    mount_station(&server).await;
    mount_home_mode_info(&server, true).await;

    let mut switch = setup(&server).await;
    switch.poll().await.unwrap();

    assert!(switch.is_on());
    assert_eq!(switch.state(), ToggleState::On);
    assert_eq!(switch.icon(), "mdi:home-account");
}

#[tokio::test]
async fn test_poll_turns_state_back_off() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    // First poll sees on, second sees off.
    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .and(query_param("method", "GetInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "on": true }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_home_mode_info(&server, false).await;

    let mut switch = setup(&server).await;
    switch.poll().await.unwrap();
    assert!(switch.is_on());

    switch.poll().await.unwrap();
    assert!(!switch.is_on());
}

#[tokio::test]
async fn test_turn_on_is_fire_and_forget() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .and(query_param("method", "Switch"))
        .and(query_param("on", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let switch = setup(&server).await;
    switch.turn_on().await.unwrap();

    // Local state is only refreshed by the next poll.
    assert!(!switch.is_on());
}

#[tokio::test]
async fn test_turn_off_sends_wire_string() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .and(query_param("method", "Switch"))
        .and(query_param("on", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let switch = setup(&server).await;
    switch.turn_off().await.unwrap();
}

#[tokio::test]
async fn test_rejected_switch_is_not_an_error() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .and(query_param("method", "Switch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": 402 }
        })))
        .mount(&server)
        .await;

    let switch = setup(&server).await;
    switch.turn_on().await.unwrap();
}

// ── Error propagation ───────────────────────────────────────────────

#[tokio::test]
async fn test_poll_error_propagates() {
    let server = MockServer::start().await;
    mount_station(&server).await;

    Mock::given(method("GET"))
        .and(path("/webapi/entry.cgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut switch = setup(&server).await;
    let result = switch.poll().await;

    assert!(
        matches!(result, Err(CoreError::Api { .. })),
        "expected Api error, got: {result:?}"
    );
    // A failed poll leaves the last-known state in place.
    assert!(!switch.is_on());
}

#[tokio::test]
async fn test_setup_fails_on_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webapi/query.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "SYNO.API.Auth": { "path": "auth.cgi" },
                "SYNO.SurveillanceStation.HomeMode": { "path": "entry.cgi" }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": 400 }
        })))
        .mount(&server)
        .await;

    let result = HomeModeSwitch::setup(config(&server)).await;

    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "expected AuthenticationFailed, got: {result:?}"
    );
}
