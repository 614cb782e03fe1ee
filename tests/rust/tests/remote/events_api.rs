//! EventsApiClient tests with mock HTTP server

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hevents_core::{ClientError, EventId, EventRepository, SignupRepository};
use hevents_remote::{http::build_client, AccessTokenSource, EventsApiClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::*;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> EventsApiClient {
    EventsApiClient::new(server.uri(), build_client(Duration::from_secs(5)))
}

struct StaticToken(&'static str);

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

fn event_json(id: serde_json::Value, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "Fireworks after dark",
        "date": "2024-07-04",
        "time": "18:30:00",
        "location": "Main Street",
        "image_url": "https://img.hevents.dev/block-party.jpg",
        "category": "Community"
    })
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn list_decodes_string_and_numeric_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            event_json(json!(1), "Block Party"),
            event_json(json!("abc"), "Jazz Night"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let events = client(&server).list().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, EventId::new("1"));
    assert_eq!(events[0].time, time("18:30"));
    assert_eq!(events[1].id, EventId::new("abc"));
}

#[tokio::test]
async fn list_tolerates_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "title": "Open Mic",
            "date": "2024-05-01",
            "time": "19:00"
        }])))
        .mount(&server)
        .await;

    let events = client(&server).list().await.unwrap();

    assert_eq!(events[0].category, "");
    assert!(!events[0].has_category());
}

#[tokio::test]
async fn list_server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).list().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn list_malformed_body_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).list().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport() {
    let client = EventsApiClient::new("http://127.0.0.1:9", build_client(Duration::from_secs(1)));

    let err = client.list().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn create_posts_fields_with_bearer_and_reads_data_wrapper() {
    let server = MockServer::start().await;
    let fields = test_fields("Block Party", "Community");
    Mock::given(method("POST"))
        .and(path("/admin/events"))
        .and(bearer_token("staff-token"))
        .and(body_json(json!({
            "title": "Block Party",
            "description": "Test event: Block Party",
            "date": "2024-07-04",
            "time": "18:30",
            "location": "Main Street",
            "image_url": "https://img.hevents.dev/block-party.jpg",
            "category": "Community"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "data": [event_json(json!(42), "Block Party")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).with_token_source(Arc::new(StaticToken("staff-token")));
    let event = EventRepository::create(&client, &fields).await.unwrap();

    assert_eq!(event.id, EventId::new("42"));
    assert_eq!(event.title, "Block Party");
}

#[tokio::test]
async fn create_validation_error_maps_to_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/events"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "title required" })),
        )
        .mount(&server)
        .await;

    let err = EventRepository::create(&client(&server), &test_fields("", "Community"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn create_forbidden_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/events"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = EventRepository::create(&client(&server), &test_fields("Block Party", "Community"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn update_puts_to_event_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/events/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [event_json(json!(7), "Late Jazz Night")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = client(&server)
        .update(&EventId::new("7"), &test_fields("Late Jazz Night", "Music"))
        .await
        .unwrap();

    assert_eq!(event.title, "Late Jazz Night");
}

#[tokio::test]
async fn update_with_empty_data_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/events/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = client(&server)
        .update(&EventId::new("7"), &test_fields("Ghost", "Music"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/events/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete(&EventId::new("7")).await.unwrap();
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/events/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).delete(&EventId::new("7")).await.unwrap_err();

    assert!(err.is_not_found());
}

// =============================================================================
// Signups
// =============================================================================

#[tokio::test]
async fn list_joined_queries_by_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/signups"))
        .and(query_param("email", MEMBER_EMAIL))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([event_json(json!(1), "Block Party")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let events = client(&server).list_joined(MEMBER_EMAIL).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, EventId::new("1"));
}

#[tokio::test]
async fn create_signup_posts_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signups"))
        .and(body_json(json!({ "event_id": "1", "user_email": MEMBER_EMAIL })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "event_id": "1", "user_email": MEMBER_EMAIL })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let signup = SignupRepository::create(&client(&server), &EventId::new("1"), MEMBER_EMAIL)
        .await
        .unwrap();

    assert_eq!(signup.event_id, EventId::new("1"));
    assert_eq!(signup.user_email, MEMBER_EMAIL);
}

#[tokio::test]
async fn signup_keeps_numeric_id_from_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([event_json(json!(1), "Block Party")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/signups"))
        .and(body_json(json!({ "event_id": 1, "user_email": MEMBER_EMAIL })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server);

    let events = client.list().await.unwrap();
    let signup = SignupRepository::create(&client, &events[0].id, MEMBER_EMAIL)
        .await
        .unwrap();

    assert_eq!(signup.event_id, EventId::new("1"));
}

#[tokio::test]
async fn create_signup_with_empty_body_uses_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signups"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let signup = SignupRepository::create(&client(&server), &EventId::new("1"), MEMBER_EMAIL)
        .await
        .unwrap();

    assert_eq!(signup.user_email, MEMBER_EMAIL);
}

#[tokio::test]
async fn duplicate_signup_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signups"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({
                "message": "duplicate key value violates unique constraint"
            })),
        )
        .mount(&server)
        .await;

    let err = SignupRepository::create(&client(&server), &EventId::new("1"), MEMBER_EMAIL)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}
