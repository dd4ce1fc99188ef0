//! End-to-end tests of the client stack against the stub service
//!
//! Run with: cargo test -p integration-tests --test presence_tests

use std::sync::Arc;

use integration_tests::{fixtures::*, TestServer};
use presence_core::{PresenceStatus, TokenStorage};
use presence_service::{
    login_error_message, AuthService, PresenceSnapshot, PresenceViewModel, Route, ServiceContext,
};
use presence_store::{MemoryTokenStorage, TOKEN_KEY};

fn names(vm: &PresenceViewModel) -> Vec<String> {
    vm.derived_view().into_iter().map(|m| m.full_name).collect()
}

async fn logged_in(server: &TestServer, username: &str) -> ServiceContext {
    let ctx = server
        .boot(Arc::new(MemoryTokenStorage::new()))
        .expect("Failed to boot");
    AuthService::new(&ctx)
        .login(username, PASSWORD)
        .await
        .expect("Login failed");
    ctx
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_stores_returned_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let storage = Arc::new(MemoryTokenStorage::new());
    let ctx = server.boot(storage.clone()).unwrap();
    assert_eq!(ctx.navigator().current(), Route::Login);

    AuthService::new(&ctx).login("samc", PASSWORD).await.unwrap();

    let token = ctx.session().current_token().expect("token stored");
    assert!(!token.is_empty());
    assert!(ctx.session().is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some(token));
    assert_eq!(ctx.navigator().current(), Route::Dashboard);
    assert_eq!(server.state.active_tokens(), 1);
}

#[tokio::test]
async fn test_bad_credentials_show_server_detail() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = server.boot(Arc::new(MemoryTokenStorage::new())).unwrap();

    let err = AuthService::new(&ctx)
        .login("samc", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert_eq!(login_error_message(&err), "Invalid username or password");
    assert!(!ctx.session().is_authenticated());
    assert_eq!(ctx.navigator().current(), Route::Login);
}

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = server.boot(Arc::new(MemoryTokenStorage::new())).unwrap();
    let vm = PresenceViewModel::from_context(&ctx);

    let err = vm.refresh_team().await.unwrap_err();

    assert!(err.is_authentication_lost());
    assert!(vm.team().is_empty());
    assert_eq!(vm.last_error(), None);
}

// ============================================================================
// Roster Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_then_filter() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = logged_in(&server, "samc").await;
    let vm = PresenceViewModel::from_context(&ctx);

    vm.refresh_team().await.unwrap();
    assert_eq!(names(&vm), roster_order());

    vm.toggle_filter(PresenceStatus::WorkingRemotely);
    assert_eq!(names(&vm), ["Aretha Franklin"]);
    assert_eq!(vm.team().len(), TEAM.len());

    // Re-query with the filter applied remotely
    vm.refresh_team().await.unwrap();
    assert_eq!(vm.team().len(), 1);
    assert_eq!(names(&vm), ["Aretha Franklin"]);
}

#[tokio::test]
async fn test_filter_with_several_statuses() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = logged_in(&server, "otis").await;
    let vm = PresenceViewModel::from_context(&ctx);

    vm.toggle_filter(PresenceStatus::Working);
    vm.toggle_filter(PresenceStatus::OnVacation);
    vm.refresh_team().await.unwrap();

    assert_eq!(names(&vm), ["Luther Vandross", "Otis Redding", "Sam Cooke"]);

    vm.clear_filters();
    vm.toggle_filter(PresenceStatus::BusinessTrip);
    vm.toggle_filter(PresenceStatus::BusinessTrip);
    assert!(vm.filter_set().is_empty());
}

#[tokio::test]
async fn test_no_matches_message() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = logged_in(&server, "samc").await;
    let vm = PresenceViewModel::from_context(&ctx);

    vm.refresh_team().await.unwrap();
    assert_eq!(vm.empty_state_message(), None);

    // Nobody is on a business trip once Gladys is back
    let gladys = logged_in(&server, "gknight").await;
    PresenceViewModel::from_context(&gladys)
        .change_own_status(PresenceStatus::Working)
        .await
        .unwrap();

    vm.toggle_filter(PresenceStatus::BusinessTrip);
    vm.refresh_team().await.unwrap();

    assert!(vm.derived_view().is_empty());
    assert_eq!(
        vm.empty_state_message(),
        Some("No team members match the selected filters")
    );
}

// ============================================================================
// Status Tests
// ============================================================================

#[tokio::test]
async fn test_change_own_status_refreshes_roster() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = logged_in(&server, "samc").await;
    let vm = PresenceViewModel::from_context(&ctx);

    let before = server.state.member("Sam Cooke").unwrap();
    vm.change_own_status(PresenceStatus::OnVacation).await.unwrap();

    assert_eq!(vm.own_status(), Some(PresenceStatus::OnVacation));
    assert!(!vm.is_busy());

    let me = vm
        .team()
        .into_iter()
        .find(|m| m.full_name == "Sam Cooke")
        .unwrap();
    assert_eq!(me.presence_status(), Some(PresenceStatus::OnVacation));
    assert!(me.updated_at >= before.updated_at);
    assert_eq!(vm.team().len(), TEAM.len());
}

#[tokio::test]
async fn test_status_change_visible_to_teammates() {
    let server = TestServer::start().await.expect("Failed to start server");
    let sam = logged_in(&server, "samc").await;
    let otis = logged_in(&server, "otis").await;

    PresenceViewModel::from_context(&sam)
        .change_own_status(PresenceStatus::BusinessTrip)
        .await
        .unwrap();

    let vm = PresenceViewModel::from_context(&otis);
    vm.toggle_filter(PresenceStatus::BusinessTrip);
    vm.refresh_team().await.unwrap();

    assert_eq!(names(&vm), ["Gladys Knight", "Sam Cooke"]);
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_revoked_session_returns_to_fresh_boot() {
    let server = TestServer::start().await.expect("Failed to start server");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let ctx = server.boot_with_file(&path).unwrap();
    AuthService::new(&ctx).login("samc", PASSWORD).await.unwrap();
    let vm = PresenceViewModel::from_context(&ctx);
    vm.refresh_team().await.unwrap();
    vm.toggle_filter(PresenceStatus::Working);

    server.state.revoke_all();
    let err = vm.change_own_status(PresenceStatus::OnVacation).await.unwrap_err();

    assert!(err.is_authentication_lost());
    assert_eq!(ctx.session().current_token(), None);
    assert!(!ctx.session().is_authenticated());
    assert_eq!(ctx.navigator().current(), Route::Login);
    assert_eq!(vm.snapshot(), PresenceSnapshot::default());

    // A restart finds nothing to restore
    let rebooted = server.boot_with_file(&path).unwrap();
    assert!(!rebooted.session().is_authenticated());
    assert_eq!(rebooted.navigator().current(), Route::Login);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let server = TestServer::start().await.expect("Failed to start server");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let ctx = server.boot_with_file(&path).unwrap();
    AuthService::new(&ctx).login("afranklin", PASSWORD).await.unwrap();
    let token = ctx.session().current_token();
    drop(ctx);

    let rebooted = server.boot_with_file(&path).unwrap();
    assert_eq!(rebooted.session().current_token(), token);
    assert_eq!(rebooted.navigator().current(), Route::Dashboard);

    let vm = PresenceViewModel::from_context(&rebooted);
    vm.refresh_team().await.unwrap();
    assert_eq!(vm.team().len(), TEAM.len());
}

#[tokio::test]
async fn test_logout_then_request_fails() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ctx = logged_in(&server, "samc").await;

    AuthService::new(&ctx).logout().unwrap();
    assert_eq!(ctx.navigator().current(), Route::Login);

    let err = PresenceViewModel::from_context(&ctx)
        .refresh_team()
        .await
        .unwrap_err();
    assert!(err.is_authentication_lost());
}

#[tokio::test]
async fn test_boot_from_config() {
    let server = TestServer::start().await.expect("Failed to start server");
    let dir = tempfile::tempdir().unwrap();
    let config = server
        .client_config(&dir.path().join("session.json"))
        .unwrap();

    let ctx = ServiceContext::from_config(&config).unwrap();
    assert_eq!(ctx.navigator().current(), Route::Login);

    AuthService::new(&ctx).login("kingluther", PASSWORD).await.unwrap();

    let rebooted = ServiceContext::from_config(&config).unwrap();
    assert!(rebooted.session().is_authenticated());
}
