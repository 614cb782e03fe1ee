//! Tests for AuthAppService
//!
//! Validates role-based landing, sign-out, and password recovery.

use hevents_core::application::Route;
use hevents_core::{ClientError, DomainEvent, Role};
use pretty_assertions::assert_eq;
use tests::async_helpers::QUIET;
use tests::events::collect_events;
use tests::fixtures::*;
use tests::mocks::*;

fn mocks() -> MockRepositories {
    MockRepositories::with(
        MockRemoteService::new()
            .with_role(STAFF_EMAIL, "staff")
            .with_role(MEMBER_EMAIL, "member"),
        FakeIdentityProvider::new()
            .with_account(staff(), PASSWORD)
            .with_account(member(), PASSWORD),
    )
}

#[tokio::test]
async fn staff_lands_on_admin() {
    let mocks = mocks();
    let services = mocks.services();
    let mut rx = services.subscribe();

    let outcome = services.auth().sign_in(STAFF_EMAIL, PASSWORD).await.unwrap();

    assert_eq!(outcome.identity, staff());
    assert_eq!(outcome.role, Role::Staff);
    assert_eq!(outcome.landing, Route::Admin);
    assert_eq!(
        collect_events(&mut rx, QUIET).await,
        vec![DomainEvent::SignedIn {
            email: STAFF_EMAIL.to_string(),
            role: Role::Staff,
        }]
    );
}

#[tokio::test]
async fn member_lands_on_calendar() {
    let mocks = mocks();
    let services = mocks.services();

    let outcome = services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.unwrap();

    assert_eq!(outcome.role, Role::Member);
    assert_eq!(outcome.landing, Route::Calendar);
}

#[tokio::test]
async fn role_failure_lands_on_calendar() {
    let mocks = mocks();
    mocks
        .remote
        .fail(RemoteOp::FindRole, ClientError::transport("role store down"));
    let services = mocks.services();

    let outcome = services.auth().sign_in(STAFF_EMAIL, PASSWORD).await.unwrap();

    assert_eq!(outcome.role, Role::Member);
    assert_eq!(outcome.landing, Route::Calendar);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let mocks = mocks();
    let services = mocks.services();
    let mut rx = services.subscribe();

    let err = services
        .auth()
        .sign_in(MEMBER_EMAIL, "nope")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(collect_events(&mut rx, QUIET).await.is_empty());
}

#[tokio::test]
async fn blank_credentials_are_rejected_locally() {
    let services = mocks().services();

    assert!(matches!(
        services.auth().sign_in("  ", PASSWORD).await,
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        services.auth().sign_in(MEMBER_EMAIL, "").await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn sign_out_clears_session_and_emits() {
    let mocks = mocks();
    let services = mocks.services();
    services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.unwrap();
    let mut rx = services.subscribe();

    services.auth().sign_out().await.unwrap();

    let tracker = services.tracker();
    tracker.start().await;
    assert_eq!(tracker.resolved().await, None);
    assert_eq!(
        collect_events(&mut rx, QUIET).await,
        vec![DomainEvent::SignedOut {
            email: Some(MEMBER_EMAIL.to_string()),
        }]
    );
    tracker.teardown().await;
}

#[tokio::test]
async fn password_reset_passes_configured_redirect() {
    let mocks = mocks();
    let services =
        mocks.services_with_redirect(Some("https://hevents.dev/reset-password".to_string()));

    services
        .auth()
        .request_password_reset(" ana@example.com ")
        .await
        .unwrap();

    assert_eq!(
        mocks.identity.reset_requests(),
        vec![(
            MEMBER_EMAIL.to_string(),
            Some("https://hevents.dev/reset-password".to_string())
        )]
    );
}

#[tokio::test]
async fn password_reset_requires_email() {
    let mocks = mocks();
    let services = mocks.services();

    let result = services.auth().request_password_reset("").await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(mocks.identity.reset_requests().is_empty());
}

#[tokio::test]
async fn update_password_for_signed_in_user() {
    let mocks = mocks();
    let services = mocks.services();
    services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.unwrap();

    services.auth().update_password("new secret").await.unwrap();
    services.auth().sign_out().await.unwrap();

    assert_eq!(mocks.identity.password_updates(), vec!["new secret".to_string()]);
    assert!(services.auth().sign_in(MEMBER_EMAIL, PASSWORD).await.is_err());
    assert!(services.auth().sign_in(MEMBER_EMAIL, "new secret").await.is_ok());
}

#[tokio::test]
async fn update_password_rejects_empty() {
    let mocks = mocks();
    let services = mocks.services();

    let result = services.auth().update_password("").await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(mocks.identity.password_updates().is_empty());
}
