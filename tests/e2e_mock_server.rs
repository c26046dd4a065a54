//! E2E tests using the mock Sonar server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::sync::Arc;

use reqwest::StatusCode;
use sonarapi::mock_server::{Fixtures, MockServer, MockState};
use sonarapi::{
    BasicAuthTransport, List, Project, ProjectListOptions, SonarClient, SonarError,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    server.shutdown().await;

    // After shutdown, nothing answers
    let result = Project::list(&client, None).await;

    assert!(matches!(result, Err(SonarError::Transport(_))));
}

// =============================================================================
// Pagination Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_walk_all_pages() {
    let server = MockServer::start().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    let mut keys = Vec::new();
    let mut page = 1;
    loop {
        let options = ProjectListOptions::new(page, 3, Vec::<String>::new());
        let response = Project::list(&client, Some(&options))
            .await
            .expect("Failed to list projects");

        keys.extend(response.data.iter().filter_map(|p| p.key.clone()));
        if !response.data.has_more() {
            break;
        }
        page += 1;
    }

    assert_eq!(page, 2);
    assert_eq!(keys, vec!["teste", "api", "billing", "web"]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_by_project_keys() {
    let server = MockServer::start().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    let options = ProjectListOptions::new(1, 10, ["billing", "teste"]);
    let response = Project::list(&client, Some(&options)).await.unwrap();

    assert_eq!(response.data.paging.total, 2);
    let keys: Vec<_> = response.data.iter().filter_map(|p| p.key.as_deref()).collect();
    assert_eq!(keys, vec!["teste", "billing"]);
    assert!(response.data.components[1].is_private());

    server.shutdown().await;
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let server = MockServer::start().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    let options = ProjectListOptions::new(9, 10, Vec::<String>::new());
    let response = Project::list(&client, Some(&options)).await.unwrap();

    assert!(response.data.is_empty());
    assert_eq!(response.data.paging.total, 4);

    server.shutdown().await;
}

// =============================================================================
// Authentication and Error Tests
// =============================================================================

#[tokio::test]
async fn test_required_token_accepted() {
    let state = MockState::new()
        .with_projects(Fixtures::default_projects())
        .with_required_token("squ_secret");
    let server = MockServer::with_state(state).await;
    let client = SonarClient::with_token("squ_secret", Some(server.url())).unwrap();

    let response = Project::list(&client, None).await.unwrap();
    assert_eq!(response.data.paging.total, 4);

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let state = MockState::new().with_required_token("squ_secret");
    let server = MockServer::with_state(state).await;
    let client = SonarClient::with_token("squ_wrong", Some(server.url())).unwrap();

    let err = Project::list(&client, None).await.unwrap_err();

    match err {
        SonarError::Service(e) => {
            assert_eq!(e.status, StatusCode::UNAUTHORIZED);
            assert_eq!(e.message, "Authentication required");
            assert_eq!(e.request, "api/projects/search");
        }
        other => panic!("Expected service error, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_unauthenticated_client_rejected() {
    let state = MockState::new().with_required_token("squ_secret");
    let server = MockServer::with_state(state).await;
    let client = SonarClient::new(Some(server.url()), None).unwrap();

    let err = Project::list(&client, None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));

    server.shutdown().await;
}

#[tokio::test]
async fn test_custom_inner_transport() {
    let state = MockState::new()
        .with_project(Fixtures::project("solo", "Solo"))
        .with_required_token("squ_secret");
    let server = MockServer::with_state(state).await;

    let inner = Arc::new(sonarapi::http_transport(Some(std::time::Duration::from_secs(5))).unwrap());
    let transport = BasicAuthTransport::with_transport("squ_secret", None, inner).unwrap();
    let client = SonarClient::new(Some(server.url()), Some(Arc::new(transport))).unwrap();

    let response = Project::list(&client, None).await.unwrap();
    assert_eq!(response.data.components[0].key.as_deref(), Some("solo"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_oversized_page_rejected() {
    let server = MockServer::start().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    let options = ProjectListOptions::new(1, 501, Vec::<String>::new());
    let err = Project::list(&client, Some(&options)).await.unwrap_err();

    match err {
        SonarError::Service(e) => {
            assert_eq!(e.status, StatusCode::BAD_REQUEST);
            assert!(e.message.contains("'ps'"));
        }
        other => panic!("Expected service error, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_forced_server_failure() {
    let state = MockState::new().with_failure(StatusCode::SERVICE_UNAVAILABLE);
    let server = MockServer::with_state(state).await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    let err = Project::list(&client, None).await.unwrap_err();

    match err {
        SonarError::Service(e) => {
            assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(e.message, "Service Unavailable");
        }
        other => panic!("Expected service error, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_visible_to_next_call() {
    let server = MockServer::start_empty().await;
    let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();

    assert!(Project::list(&client, None).await.unwrap().data.is_empty());

    server
        .state()
        .write()
        .await
        .projects
        .push(Fixtures::project("late", "Late Arrival"));

    let response = Project::list(&client, None).await.unwrap();
    assert_eq!(response.data.len(), 1);

    server.shutdown().await;
}
