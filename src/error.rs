//! Error types for Sonar API operations.

use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

/// Errors that can occur during Sonar API operations.
#[derive(Debug, Error)]
pub enum SonarError {
    /// Configuration is missing or incomplete.
    #[error("Sonar configuration required: {0}")]
    ConfigMissing(String),

    /// A base URL or relative request path could not be used.
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// HTTP transport error (connection refused, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request carries a streaming body that cannot be copied for sending.
    #[error("Request body cannot be replayed")]
    UnclonableRequest,

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The service answered with a non-200 status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The response body was not valid JSON for the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A value could not be rendered as JSON output.
    #[error("Failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    /// Query parameters could not be encoded.
    #[error("Failed to encode query: {0}")]
    QueryEncode(#[from] serde_qs::Error),

    /// Credentials produced an unusable header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl SonarError {
    pub(crate) fn invalid_url(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status of the failed response, if the service answered at all.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Service(e) => Some(e.status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// A non-200 response from the Sonar API.
#[derive(Debug, Clone, Error)]
#[error("{method} {url}: {} {message}", .status.as_u16())]
pub struct ServiceError {
    /// Method of the request that failed.
    pub method: Method,
    /// Absolute URL of the request that failed.
    pub url: Url,
    /// Response status.
    pub status: StatusCode,
    /// Message reported by the service, or a synthesized one.
    pub message: String,
    /// The `request` field of the error payload, or the request URL when
    /// the payload carries none.
    pub request: String,
}

/// Result type alias for Sonar operations.
pub type Result<T> = core::result::Result<T, SonarError>;
