//! Domain errors for profile lookups.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Profile Connector and Context APIs.
#[derive(Error, Debug)]
pub enum ConnectorApiError {
    /// Credentials rejected (HTTP 401)
    #[error("Authentication failed (401): {0}")]
    Unauthorized(String),

    /// Permission denied (HTTP 403)
    #[error("Forbidden (403): {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found (404): {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded (429): {0}")]
    RateLimitExceeded(String),

    /// Server error from the platform (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Any other non-success status
    #[error("Unexpected response ({0}): {1}")]
    UnknownError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Success status with a body we could not decode
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ConnectorApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded(body),
            status if status.is_server_error() => Self::ServerError(status, body),
            status => Self::UnknownError(status, body),
        }
    }
}

/// Errors a profile lookup can end with.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Neither phone nor email was supplied
    #[error("Either phone or email must be provided.")]
    MissingIdentifier,

    /// Connector resolution, profile find, or summary call failed
    #[error(transparent)]
    Upstream(#[from] ConnectorApiError),

    /// The background context-link task panicked or was cancelled
    #[error("Context link task did not complete: {0}")]
    BackgroundTask(String),
}

impl LookupError {
    /// True when the request itself was rejected before any network call.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingIdentifier)
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
