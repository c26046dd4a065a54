//! List trait for fetching pages of entities.

use async_trait::async_trait;

use crate::client::{ApiResponse, SonarClient};
use crate::error::Result;
use crate::pagination::Page;

/// Search entities one page at a time.
///
/// A call fetches exactly one page. To walk every result, call again with
/// the next page index until [`Page::has_more`] returns false.
///
/// # Example
///
/// ```no_run
/// use sonarapi::{List, Project, ProjectListOptions, SonarClient};
///
/// # async fn example() -> sonarapi::Result<()> {
/// let client = SonarClient::from_env()?;
///
/// // First page with default size
/// let response = Project::list(&client, None).await?;
/// println!("{} projects in total", response.data.paging.total);
///
/// // Second page, 50 per page, two specific projects
/// let options = ProjectListOptions::new(2, 50, ["api", "web"]);
/// let response = Project::list(&client, Some(&options)).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Pagination and filter parameters.
    type Options: Default + Send + Sync;

    /// List one page of entities.
    ///
    /// # Arguments
    ///
    /// * `client` - The Sonar API client
    /// * `options` - Pagination and filters, or `None` for the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service rejects it, or the
    /// body cannot be decoded.
    async fn list(
        client: &SonarClient,
        options: Option<&Self::Options>,
    ) -> Result<ApiResponse<Page<Self>>>;
}
