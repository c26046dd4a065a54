//! Client configuration.
//!
//! Settings come from the environment or from CLI flags that mirror it.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::transport::{http_transport, BasicAuthTransport};

/// API token, sent as the Basic auth username.
pub const TOKEN_ENV: &str = "SONAR_TOKEN";
/// Optional password for username/password authentication.
pub const PASSWORD_ENV: &str = "SONAR_PASSWORD";
/// Optional API base URL.
pub const URL_ENV: &str = "SONAR_URL";
/// Optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SONAR_TIMEOUT_SECS";

/// Everything needed to build an authenticated [`SonarClient`].
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// API base URL; `None` uses the public service.
    pub base_url: Option<String>,
    /// Token or username.
    pub token: String,
    /// Password; usually absent since tokens go without one.
    pub password: Option<String>,
    /// Bound on each request; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Read configuration from environment variables.
    ///
    /// Uses `SONAR_TOKEN` for authentication and optionally `SONAR_URL`,
    /// `SONAR_PASSWORD` and `SONAR_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `SONAR_TOKEN` is not set or the timeout is not a
    /// whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let token = env::var(TOKEN_ENV).map_err(|_| {
            SonarError::ConfigMissing(format!("{TOKEN_ENV} environment variable not set"))
        })?;

        let timeout = match env::var(TIMEOUT_ENV) {
            Ok(secs) => Some(parse_timeout(&secs)?),
            Err(_) => None,
        };

        Ok(Self {
            base_url: env::var(URL_ENV).ok().filter(|u| !u.is_empty()),
            token,
            password: env::var(PASSWORD_ENV).ok(),
            timeout,
        })
    }

    /// Build a client that authenticates every request with these credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot be built.
    pub fn build(self) -> Result<SonarClient> {
        if self.token.is_empty() {
            return Err(SonarError::ConfigMissing("token must not be empty".to_string()));
        }

        let inner = Arc::new(http_transport(self.timeout)?);
        let transport =
            BasicAuthTransport::with_transport(&self.token, self.password.as_deref(), inner)?;

        tracing::debug!(base_url = ?self.base_url, timeout = ?self.timeout, "building client");
        SonarClient::new(self.base_url.as_deref(), Some(Arc::new(transport)))
    }
}

fn parse_timeout(secs: &str) -> Result<Duration> {
    secs.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| SonarError::ConfigMissing(format!("{TIMEOUT_ENV} must be whole seconds, got '{secs}'")))
}
