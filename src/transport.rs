//! Request transports.
//!
//! A [`Transport`] performs one HTTP round trip. The default transport is a
//! plain `reqwest::Client`; [`BasicAuthTransport`] wraps another transport
//! and adds HTTP Basic credentials to every request it forwards.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request, Response};

use crate::error::{Result, SonarError};

/// Executes a single HTTP request.
///
/// The request is borrowed: implementations that need to alter it must work
/// on their own copy, leaving the caller's request untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::Transport`] when no response was received.
    async fn round_trip(&self, request: &Request) -> Result<Response>;
}

#[async_trait]
impl Transport for Client {
    async fn round_trip(&self, request: &Request) -> Result<Response> {
        let request = replay(request)?;
        self.execute(request).await.map_err(SonarError::Transport)
    }
}

/// Build the default transport.
///
/// Compression is negotiated automatically. `timeout` bounds the whole
/// request; `None` leaves requests unbounded.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_transport(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().brotli(true).gzip(true).deflate(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(SonarError::Transport)
}

/// Copy a request so it can be sent or modified independently of the original.
///
/// The copy owns its header map. Body bytes are shared.
fn replay(request: &Request) -> Result<Request> {
    request.try_clone().ok_or(SonarError::UnclonableRequest)
}

/// Transport that authenticates every request with HTTP Basic credentials.
///
/// The service expects an API token as the username and an empty password.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sonarapi::{BasicAuthTransport, SonarClient};
///
/// # fn example() -> sonarapi::Result<()> {
/// let transport = BasicAuthTransport::new("my-token", None)?;
/// let client = SonarClient::new(None, Some(Arc::new(transport)))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BasicAuthTransport {
    username: String,
    authorization: HeaderValue,
    inner: Arc<dyn Transport>,
}

impl std::fmt::Debug for BasicAuthTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthTransport")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl BasicAuthTransport {
    /// Authenticate through the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be built or the
    /// credentials cannot be carried in a header.
    pub fn new(username: &str, password: Option<&str>) -> Result<Self> {
        Self::with_transport(username, password, Arc::new(http_transport(None)?))
    }

    /// Authenticate through `transport` instead of the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be carried in a header.
    pub fn with_transport(
        username: &str,
        password: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let credentials = format!("{username}:{}", password.unwrap_or_default());
        let mut authorization =
            HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(credentials)))?;
        authorization.set_sensitive(true);

        Ok(Self {
            username: username.to_string(),
            authorization,
            inner: transport,
        })
    }

    /// The username credentials are sent for.
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait]
impl Transport for BasicAuthTransport {
    async fn round_trip(&self, request: &Request) -> Result<Response> {
        let mut authed = replay(request)?;
        authed
            .headers_mut()
            .insert(AUTHORIZATION, self.authorization.clone());
        self.inner.round_trip(&authed).await
    }
}
