//! Sonar API client library.
//!
//! A Rust library for the SonarQube / SonarCloud web API. Requests are
//! built relative to an API base URL, sent through a pluggable
//! [`Transport`], and decoded into typed models. Non-200 responses become
//! a structured [`ServiceError`].
//!
//! # Quick Start
//!
//! ```no_run
//! use sonarapi::{List, Project, ProjectListOptions, SonarClient};
//!
//! #[tokio::main]
//! async fn main() -> sonarapi::Result<()> {
//!     // Create client from environment variables
//!     let client = SonarClient::from_env()?;
//!
//!     // First page of projects
//!     let response = Project::list(&client, None).await?;
//!     println!("Found {} projects", response.data.paging.total);
//!
//!     // A specific page, filtered to two project keys
//!     let options = ProjectListOptions::new(1, 50, ["api", "web"]);
//!     let response = Project::list(&client, Some(&options)).await?;
//!     for project in &response.data {
//!         println!("{:?}", project.key);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Authentication
//!
//! [`BasicAuthTransport`] adds HTTP Basic credentials to each request. The
//! service convention is an API token as the username with no password:
//!
//! ```no_run
//! use std::sync::Arc;
//! use sonarapi::{BasicAuthTransport, SonarClient};
//!
//! # fn example() -> sonarapi::Result<()> {
//! let transport = BasicAuthTransport::new("squ_token", None)?;
//! let client = SonarClient::new(Some("http://localhost:9000/api/"), Some(Arc::new(transport)))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`SonarClient::from_env`] reads:
//!
//! - `SONAR_TOKEN` (required) - API token
//! - `SONAR_URL` (optional) - Base URL (defaults to `https://sonarcloud.io/api/`)
//! - `SONAR_PASSWORD` (optional) - Password, for username/password logins
//! - `SONAR_TIMEOUT_SECS` (optional) - Per-request timeout
//!
//! # Cancellation
//!
//! Dropping the future returned by an operation aborts the request. Wrap
//! calls in `tokio::time::timeout` or set a transport timeout to bound them.

pub mod cli;
mod client;
mod config;
mod error;
mod models;
pub mod output;
mod pagination;
mod traits;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ApiResponse, RawResponse, SonarClient, DEFAULT_BASE_URL, USER_AGENT};
pub use config::ClientConfig;
pub use error::{Result, ServiceError, SonarError};
pub use pagination::{Page, Paging};
pub use transport::{http_transport, BasicAuthTransport, Transport};

// Re-export traits
pub use traits::List;

// Re-export models
pub use models::{Project, ProjectListOptions, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

pub use output::PrettyPrint;
