//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Sonar API server.

use std::sync::Arc;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::RwLock;

use crate::Project;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects in creation order.
    pub projects: Vec<Project>,

    /// Optional authentication token. If set, requests must send it as the
    /// Basic auth username.
    pub required_token: Option<String>,

    /// If set, every API request fails with this status.
    pub failure: Option<StatusCode>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Add several projects to the state.
    pub fn with_projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.projects.extend(projects);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Make every API request fail with `status`.
    pub fn with_failure(mut self, status: StatusCode) -> Self {
        self.failure = Some(status);
        self
    }

    /// Check an `Authorization` header against the required token.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        let Some(token) = &self.required_token else {
            return true;
        };
        let expected = format!("Basic {}", STANDARD.encode(format!("{token}:")));
        authorization == Some(expected.as_str())
    }

    /// Projects whose key is in `keys`, or all projects when `keys` is `None`.
    pub fn search_projects(&self, keys: Option<&[&str]>) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| match keys {
                Some(keys) => p.key.as_deref().is_some_and(|k| keys.contains(&k)),
                None => true,
            })
            .collect()
    }
}
