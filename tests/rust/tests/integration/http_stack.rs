//! Application services wired to the HTTP adapters
//!
//! One mock server plays both the identity service and the data service.

use std::sync::Arc;
use std::time::Duration;

use hevents_core::application::{GuardState, JoinOutcome, Route, SignupPanel};
use hevents_core::{
    ApplicationServices, ApplicationServicesBuilder, ClientError, EventBus, EventId, LoadState,
    Role,
};
use hevents_remote::{http::build_client, AuthApiClient, EventsApiClient, RoleApiClient};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::fixtures::*;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "anon-key";

fn stack(server: &MockServer) -> ApplicationServices {
    let http = build_client(Duration::from_secs(5));
    let auth = Arc::new(AuthApiClient::new(server.uri(), API_KEY, http.clone()));
    let events = Arc::new(
        EventsApiClient::new(server.uri(), http.clone()).with_token_source(auth.clone()),
    );
    let roles =
        Arc::new(RoleApiClient::new(server.uri(), API_KEY, http).with_token_source(auth.clone()));

    ApplicationServicesBuilder::new()
        .with_event_bus(Arc::new(EventBus::new()))
        .with_event_repo(events.clone())
        .with_signup_repo(events)
        .with_role_repo(roles)
        .with_identity_provider(auth)
        .build()
        .unwrap()
}

fn user_json(id: &str, email: &str) -> Value {
    json!({ "id": id, "email": email })
}

fn block_party_json() -> Value {
    json!({
        "id": 1,
        "title": "Block Party",
        "description": "Test event: Block Party",
        "date": "2024-07-04",
        "time": "18:30:00",
        "location": "Main Street",
        "image_url": "https://img.hevents.dev/block-party.jpg",
        "category": "Community"
    })
}

/// Password grant and session lookup for one account
async fn mount_account(server: &MockServer, id: &str, email: &str, token: &str, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(body_json(json!({ "email": email, "password": PASSWORD })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "user": user_json(id, email)
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(bearer_token(token))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id, email)))
        .mount(server)
        .await;
    // Row-level security: the row is only visible with the user's own token
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", email)))
        .and(bearer_token(token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": role }])))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

async fn mount_events(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([block_party_json()])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn staff_signs_in_and_publishes_with_token() {
    let server = MockServer::start().await;
    mount_account(&server, "user-staff", STAFF_EMAIL, "staff-token", "staff").await;
    mount_events(&server).await;
    Mock::given(method("POST"))
        .and(path("/admin/events"))
        .and(bearer_token("staff-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": [{
                "id": 2,
                "title": "Harvest Fair",
                "description": "Test event: Harvest Fair",
                "date": "2024-07-04",
                "time": "18:30",
                "location": "Main Street",
                "image_url": "https://img.hevents.dev/block-party.jpg",
                "category": "Community"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let services = stack(&server);

    let login = services.auth().sign_in(STAFF_EMAIL, PASSWORD).await.unwrap();
    assert_eq!(login.landing, Route::Admin);

    let tracker = services.tracker();
    let decision = services.route_guard(tracker.clone()).evaluate().await;
    tracker.teardown().await;
    assert_eq!(decision.state, GuardState::Authorized(staff()));

    let mut dashboard = services.admin_dashboard(&decision).unwrap();
    assert!(matches!(dashboard.load().await, LoadState::Loaded(_)));

    let created = dashboard
        .create(&test_fields("Harvest Fair", "Community"))
        .await
        .unwrap();

    assert_eq!(created.id, EventId::new("2"));
    let titles: Vec<&str> = dashboard.events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Block Party", "Harvest Fair"]);
}

#[tokio::test]
async fn staff_role_row_requires_session_token() {
    let server = MockServer::start().await;
    mount_account(&server, "user-staff", STAFF_EMAIL, "staff-token", "staff").await;
    let services = stack(&server);

    let login = services.auth().sign_in(STAFF_EMAIL, PASSWORD).await.unwrap();
    assert_eq!(login.role, Role::Staff);
    assert_eq!(login.landing, Route::Admin);

    let tracker = services.tracker();
    let decision = services.route_guard(tracker.clone()).evaluate().await;
    tracker.teardown().await;
    assert_eq!(decision.state, GuardState::Authorized(staff()));
    assert!(services.admin_dashboard(&decision).is_ok());
}

#[tokio::test]
async fn member_joins_over_http() {
    let server = MockServer::start().await;
    mount_account(&server, "user-ana", MEMBER_EMAIL, "member-token", "member").await;
    mount_events(&server).await;
    // Empty for the panel and the pre-write check, then the new signup is visible
    Mock::given(method("GET"))
        .and(path("/signups"))
        .and(query_param("email", MEMBER_EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/signups"))
        .and(query_param("email", MEMBER_EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([block_party_json()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/signups"))
        .and(bearer_token("member-token"))
        .and(body_json(json!({ "event_id": 1, "user_email": MEMBER_EMAIL })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let services = stack(&server);

    let login = services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.unwrap();
    assert_eq!(login.landing, Route::Calendar);

    let tracker = services.tracker();
    let view = services.event_detail_view(tracker.clone());
    let mut detail = view.load(&EventId::new("1")).await.unwrap();
    assert_eq!(
        detail.signup,
        SignupPanel::Available {
            email: MEMBER_EMAIL.to_string()
        }
    );

    let outcome = view.join(&mut detail).await.unwrap();
    tracker.teardown().await;

    assert!(matches!(outcome, JoinOutcome::Joined { confirmed: true, .. }));
    assert_eq!(
        detail.signup,
        SignupPanel::AlreadyJoined {
            email: MEMBER_EMAIL.to_string()
        }
    );
}

#[tokio::test]
async fn member_is_denied_admin_over_http() {
    let server = MockServer::start().await;
    mount_account(&server, "user-ana", MEMBER_EMAIL, "member-token", "member").await;
    let services = stack(&server);
    services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.unwrap();

    let tracker = services.tracker();
    let decision = services.route_guard(tracker.clone()).evaluate().await;
    tracker.teardown().await;

    assert_eq!(decision.state, GuardState::Denied(member()));
    assert!(matches!(
        services.admin_dashboard(&decision),
        Err(ClientError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn data_outage_surfaces_as_failed_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let services = stack(&server);

    let state = services.directory().load().await;

    assert!(state.is_failed());
}
