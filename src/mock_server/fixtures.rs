//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::Project;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a never-analyzed public project.
    pub fn project(key: &str, name: &str) -> Project {
        Project {
            organization: Some("default-organization".to_string()),
            id: Some(format!("AX-{key}")),
            key: Some(key.to_string()),
            name: Some(name.to_string()),
            qualifier: Some("TRK".to_string()),
            visibility: Some("public".to_string()),
            last_analysis_date: None,
            revision: None,
        }
    }

    /// Create a project that has been analyzed at `date` for SCM `revision`.
    pub fn analyzed_project(key: &str, name: &str, date: &str, revision: &str) -> Project {
        let mut project = Self::project(key, name);
        project.last_analysis_date = Some(date.to_string());
        project.revision = Some(revision.to_string());
        project
    }

    /// Create a private project.
    pub fn private_project(key: &str, name: &str) -> Project {
        let mut project = Self::project(key, name);
        project.visibility = Some("private".to_string());
        project
    }

    /// Projects served by a default mock server, in creation order.
    pub fn default_projects() -> Vec<Project> {
        vec![
            Self::analyzed_project(
                "teste",
                "teste",
                "2019-09-26T14:18:52+0000",
                "a37e0a446129120538489350be32f97aa7e5893f",
            ),
            Self::analyzed_project(
                "api",
                "API Gateway",
                "2024-03-01T09:30:00+0000",
                "4f1c2d9e8b7a6f5e4d3c2b1a0f9e8d7c6b5a4f3e",
            ),
            Self::private_project("billing", "Billing Service"),
            Self::project("web", "Web Frontend"),
        ]
    }
}
