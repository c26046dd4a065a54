//! Mock Sonar API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Sonar API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server answers searches from its project list,
//! so paging and filtering behave like the real service.
//!
//! # Example
//!
//! ```ignore
//! use sonarapi::mock_server::MockServer;
//! use sonarapi::{List, Project, SonarClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = SonarClient::with_token("test-token", Some(server.url())).unwrap();
//!
//!     // Server comes with default fixtures
//!     let response = Project::list(&client, None).await.unwrap();
//!     assert!(!response.data.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
