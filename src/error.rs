//! Error types for the MealDB client.

use thiserror::Error;

/// Result type for MealDB operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Longest slice of an error body kept in [`Error::Api`] messages.
const MAX_ERROR_BODY: usize = 200;

/// Error types for the MealDB client.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The endpoint is gated behind a paid subscription.
    #[error("You need to subscribe to The Meal DB API to access this endpoint")]
    SubscriptionRequired,

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a downloaded file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An argument cannot be turned into a request or file name.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    /// Build an error from a non-success response.
    ///
    /// Only `endpoint` is recorded; the request path carries the API key.
    pub(crate) async fn from_response(response: reqwest::Response, endpoint: &str) -> Self {
        let status = response.status().as_u16();

        // The API serves HTML error pages, so keep only a short prefix
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                body.trim().chars().take(MAX_ERROR_BODY).collect()
            }
            _ => "Unknown error".to_string(),
        };

        match status {
            404 => Error::NotFound(endpoint.to_string()),
            _ => Error::Api { status, message },
        }
    }

    /// Map a failed send into a timeout or transport error.
    ///
    /// The URL is stripped so the API key never reaches `Display`.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err.without_url())
        }
    }

    /// True for failures that happened before any HTTP status was received.
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Http(e) => e.status().is_none(),
            _ => false,
        }
    }

    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound(_) => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
