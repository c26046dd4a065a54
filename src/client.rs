//! Sonar API client.
//!
//! Low-level HTTP client that builds requests relative to the API base URL,
//! executes them through a [`Transport`], and classifies failed responses.
//! Endpoint operations are implemented via traits on entity types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, ServiceError, SonarError};
use crate::transport::{http_transport, BasicAuthTransport, Transport};

/// Public SonarCloud API.
pub const DEFAULT_BASE_URL: &str = "https://sonarcloud.io/api/";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("sonarapi/", env!("CARGO_PKG_VERSION"));

const DEFAULT_ERROR_MESSAGE: &str = "api request error";

/// Low-level Sonar API client.
///
/// Builds requests against the base URL and executes them. Entity-specific
/// operations are implemented via the [`List`](crate::List) trait on model
/// types.
///
/// The client is never mutated after construction, and clones share the
/// same transport, so one instance can serve concurrent callers.
///
/// # Example
///
/// ```no_run
/// use sonarapi::SonarClient;
///
/// # fn example() -> sonarapi::Result<()> {
/// // Create from environment variables
/// let client = SonarClient::from_env()?;
///
/// // Or point a token at a self-hosted server
/// let client = SonarClient::with_token("squ_token", Some("http://localhost:9000/api/"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SonarClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<Url>,
    user_agent: &'static str,
}

impl std::fmt::Debug for SonarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// A response whose status was 200, with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// URL the request was sent to.
    pub url: Url,
    /// Response headers.
    pub headers: HeaderMap,
    /// Undecoded body text.
    pub body: String,
}

/// A decoded response together with the raw response it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded body.
    pub data: T,
    /// The response as received.
    pub raw: RawResponse,
}

/// Error payload returned by the service on 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    request: Option<String>,
}

impl SonarClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if `SONAR_TOKEN` is not set or the configuration is invalid.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env()?.build()
    }

    /// Create a client that authenticates with an API token.
    ///
    /// The token is sent as the Basic auth username with an empty password.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot be built.
    pub fn with_token(token: &str, base_url: Option<&str>) -> Result<Self> {
        let transport = BasicAuthTransport::new(token, None)?;
        Self::new(base_url, Some(Arc::new(transport)))
    }

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL (e.g., `http://localhost:9000/api/`), or
    ///   `None` for [`DEFAULT_BASE_URL`]. A missing trailing `/` is added.
    /// * `transport` - Transport used to send requests, or `None` for an
    ///   unauthenticated default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the default transport
    /// cannot be built.
    pub fn new(base_url: Option<&str>, transport: Option<Arc<dyn Transport>>) -> Result<Self> {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);

        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let parsed =
            Url::parse(&base_url_str).map_err(|e| SonarError::invalid_url(base_url, e))?;

        let transport = match transport {
            Some(t) => t,
            None => Arc::new(http_transport(None)?),
        };

        Ok(Self {
            transport,
            base_url: Arc::new(parsed),
            user_agent: USER_AGENT,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        self.user_agent
    }

    /// Build a request for `path`, resolved against the base URL.
    ///
    /// `path` may carry an encoded query string and must not start with `/`.
    /// Mutating methods get a JSON `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::InvalidUrl`] if `path` starts with `/`, is an
    /// absolute URL, or cannot be parsed.
    pub fn new_request(&self, method: Method, path: &str, body: Option<String>) -> Result<Request> {
        if path.starts_with('/') {
            return Err(SonarError::invalid_url(
                path,
                "relative path must not start with '/'",
            ));
        }
        if Url::parse(path).is_ok() {
            return Err(SonarError::invalid_url(path, "expected a relative path"));
        }

        let url = self
            .base_url
            .join(path)
            .map_err(|e| SonarError::invalid_url(path, e))?;

        let sends_json = method == Method::POST || method == Method::PUT || method == Method::PATCH;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        if sends_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(self.user_agent));

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }

    /// Send a request and read the whole body.
    ///
    /// Non-200 responses are returned as [`SonarError::Service`].
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: Request) -> Result<RawResponse> {
        let response = self.transport.round_trip(&request).await?;
        let response = Self::check_response(request.method(), request.url(), response).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(SonarError::Transport)?;

        tracing::debug!(%status, bytes = body.len(), "received response");

        Ok(RawResponse {
            status,
            url: request.url().clone(),
            headers,
            body,
        })
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::Decode`] if the body does not match `T`, along
    /// with every error [`execute`](Self::execute) can return.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: Request) -> Result<ApiResponse<T>> {
        let raw = self.execute(request).await?;
        let data = serde_json::from_str(&raw.body)?;
        Ok(ApiResponse { data, raw })
    }

    /// Check response status and convert errors.
    ///
    /// Only 200 counts as success. Server errors (5xx) get the status reason
    /// as their message without the body being read. Other statuses are
    /// expected to carry an `{"error": ..., "request": ...}` payload; when
    /// the body is unreadable or not that payload, the failure's own
    /// description becomes the message.
    pub async fn check_response(method: &Method, url: &Url, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(response);
        }

        let mut error = ServiceError {
            method: method.clone(),
            url: url.clone(),
            status,
            message: DEFAULT_ERROR_MESSAGE.to_string(),
            request: url.to_string(),
        };

        if status.as_u16() >= 500 {
            if let Some(reason) = status.canonical_reason() {
                error.message = reason.to_string();
            }
            tracing::debug!(%status, "server error");
            return Err(error.into());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
                Ok(payload) => {
                    if let Some(message) = payload.error.filter(|m| !m.is_empty()) {
                        error.message = message;
                    }
                    if let Some(request) = payload.request {
                        error.request = request;
                    }
                }
                Err(e) => error.message = e.to_string(),
            },
            Err(e) => error.message = e.to_string(),
        }

        tracing::debug!(%status, message = %error.message, "request rejected");
        Err(error.into())
    }
}
