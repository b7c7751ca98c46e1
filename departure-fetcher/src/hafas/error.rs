//! HAFAS client error types.

use std::fmt;

use crate::domain::StationId;

/// Errors from the HAFAS HTTP client.
#[derive(Debug)]
pub enum HafasError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// The requested stop does not exist
    StationNotFound(StationId),

    /// Rate limited by the API
    RateLimited,
}

impl fmt::Display for HafasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HafasError::Http(e) => write!(f, "HTTP error: {e}"),
            HafasError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            HafasError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            HafasError::StationNotFound(id) => write!(f, "station not found: {id}"),
            HafasError::RateLimited => write!(f, "rate limited by HAFAS API"),
        }
    }
}

impl std::error::Error for HafasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HafasError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HafasError {
    fn from(err: reqwest::Error) -> Self {
        HafasError::Http(err)
    }
}
