//! Project model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{ApiResponse, SonarClient};
use crate::error::{Result, SonarError};
use crate::pagination::Page;
use crate::traits::List;

/// Page requested when none is given.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size requested when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const SEARCH_PATH: &str = "projects/search";

/// Timestamp layout used by the service, e.g. `2019-09-26T14:18:52+0000`.
const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A project registered for analysis.
///
/// The service may omit any field, so every field is optional: an absent
/// key is `None`, distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Organization the project belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Server-assigned project ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique project key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Component kind (e.g., "TRK" for a top-level project).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    /// "public" or "private".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    /// When the project was last analyzed, as sent by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_analysis_date: Option<String>,

    /// SCM revision of the last analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Project {
    /// Check if anyone may browse this project.
    pub fn is_public(&self) -> bool {
        self.visibility.as_deref() == Some("public")
    }

    /// Check if browsing requires permission.
    pub fn is_private(&self) -> bool {
        self.visibility.as_deref() == Some("private")
    }

    /// Parse [`last_analysis_date`](Self::last_analysis_date).
    ///
    /// Returns `None` if the project was never analyzed or the timestamp is
    /// not in a recognized format.
    pub fn last_analyzed_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.last_analysis_date.as_deref()?;
        DateTime::parse_from_str(raw, ANALYSIS_DATE_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }
}

/// Pagination and filters for listing projects.
///
/// Zero page numbers and sizes are replaced with [`DEFAULT_PAGE`] and
/// [`DEFAULT_PAGE_SIZE`]; zero is never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListOptions {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Restrict results to these project keys.
    pub projects: Vec<String>,
}

impl Default for ProjectListOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            projects: Vec::new(),
        }
    }
}

/// Wire form of [`ProjectListOptions`].
#[derive(Debug, Serialize)]
struct SearchQuery {
    p: u32,
    ps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<String>,
}

impl ProjectListOptions {
    /// Create options, replacing zero `page` or `page_size` with the defaults.
    pub fn new<I, S>(page: u32, page_size: u32, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            page: normalize(page, DEFAULT_PAGE),
            page_size: normalize(page_size, DEFAULT_PAGE_SIZE),
            projects: projects.into_iter().map(Into::into).collect(),
        }
    }

    /// The project keys joined with commas, or `None` when no filter is set.
    pub fn projects_filter(&self) -> Option<String> {
        Some(self.projects.join(",")).filter(|joined| !joined.is_empty())
    }

    /// Encode as a query string (`p`, `ps` and, when filtering, `projects`).
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::QueryEncode`](crate::SonarError::QueryEncode) if
    /// the parameters cannot be encoded.
    pub fn to_query(&self) -> Result<String> {
        let query = SearchQuery {
            p: normalize(self.page, DEFAULT_PAGE),
            ps: normalize(self.page_size, DEFAULT_PAGE_SIZE),
            projects: self.projects_filter(),
        };
        Ok(serde_qs::to_string(&query)?)
    }
}

fn normalize(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

#[async_trait]
impl List for Project {
    type Options = ProjectListOptions;

    #[tracing::instrument(skip(client))]
    async fn list(
        client: &SonarClient,
        options: Option<&Self::Options>,
    ) -> Result<ApiResponse<Page<Self>>> {
        let options = options.cloned().unwrap_or_default();
        let path = format!("{SEARCH_PATH}?{}", options.to_query()?);

        let request = client.new_request(Method::GET, &path, None)?;
        client.execute_json(request).await
    }
}

impl Project {
    /// Fetch the project whose key is exactly `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::NotFound`] if no project has that key, along
    /// with every error [`List::list`] can return.
    pub async fn find(client: &SonarClient, key: &str) -> Result<Self> {
        let options = ProjectListOptions::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, [key]);
        let response = Self::list(client, Some(&options)).await?;

        response
            .data
            .into_iter()
            .find(|p| p.key.as_deref() == Some(key))
            .ok_or_else(|| SonarError::NotFound {
                entity_type: "Project",
                id: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn decode_query(query: &str) -> HashMap<String, String> {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    fn sample_project() -> Project {
        serde_json::from_value(serde_json::json!({
            "organization": "default-organization",
            "id": "AW1qZC7qcyZaoJOWxgwC",
            "key": "teste",
            "name": "teste",
            "qualifier": "TRK",
            "visibility": "public",
            "lastAnalysisDate": "2019-09-26T14:18:52+0000",
            "revision": "a37e0a446129120538489350be32f97aa7e5893f"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_normalizes_zero() {
        let options = ProjectListOptions::new(0, 0, Vec::<String>::new());
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, 10);
        assert_eq!(options, ProjectListOptions::default());

        let options = ProjectListOptions::new(3, 0, ["a"]);
        assert_eq!(options.page, 3);
        assert_eq!(options.page_size, 10);
    }

    #[test]
    fn test_query_never_sends_zero() {
        let options = ProjectListOptions {
            page: 0,
            page_size: 0,
            projects: vec![],
        };
        let query = decode_query(&options.to_query().unwrap());

        assert_eq!(query["p"], "1");
        assert_eq!(query["ps"], "10");
        assert!(!query.contains_key("projects"));
    }

    #[test]
    fn test_query_omits_blank_projects() {
        let options = ProjectListOptions::new(1, 10, [""]);
        assert_eq!(options.projects_filter(), None);

        let query = decode_query(&options.to_query().unwrap());
        assert!(!query.contains_key("projects"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_query_joins_projects() {
        let options = ProjectListOptions::new(2, 50, ["api", "web", "worker"]);
        let query = decode_query(&options.to_query().unwrap());

        assert_eq!(query["p"], "2");
        assert_eq!(query["ps"], "50");
        assert_eq!(query["projects"], "api,web,worker");
    }

    #[test]
    fn test_projects_filter() {
        assert_eq!(ProjectListOptions::default().projects_filter(), None);
        assert_eq!(
            ProjectListOptions::new(1, 10, ["solo"]).projects_filter().as_deref(),
            Some("solo")
        );
    }

    #[test]
    fn test_project_deserialize() {
        let project = sample_project();

        assert_eq!(project.organization.as_deref(), Some("default-organization"));
        assert_eq!(project.id.as_deref(), Some("AW1qZC7qcyZaoJOWxgwC"));
        assert_eq!(project.key.as_deref(), Some("teste"));
        assert_eq!(project.qualifier.as_deref(), Some("TRK"));
        assert_eq!(
            project.revision.as_deref(),
            Some("a37e0a446129120538489350be32f97aa7e5893f")
        );
        assert!(project.is_public());
        assert!(!project.is_private());
    }

    #[test]
    fn test_absent_fields_differ_from_empty() {
        let project: Project = serde_json::from_str(r#"{"key": ""}"#).unwrap();
        assert_eq!(project.key.as_deref(), Some(""));
        assert_eq!(project.name, None);

        let serialized = serde_json::to_value(&project).unwrap();
        assert_eq!(serialized, serde_json::json!({"key": ""}));
    }

    #[test]
    fn test_last_analyzed_at() {
        let project = sample_project();
        let analyzed = project.last_analyzed_at().unwrap();
        assert_eq!(analyzed.to_rfc3339(), "2019-09-26T14:18:52+00:00");

        let never = Project::default();
        assert!(never.last_analyzed_at().is_none());

        let garbled = Project {
            last_analysis_date: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(garbled.last_analyzed_at().is_none());
    }
}
