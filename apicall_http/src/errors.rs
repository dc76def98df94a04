//! Error types for the HTTP connection.

use crate::Response;

/// Errors raised by the HTTP layer before a service gets to classify anything.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL or request path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The underlying `reqwest::Client` could not be built.
    #[error("Failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    /// The request was sent but no usable response came back.
    #[error("Request failed")]
    Transport(#[source] reqwest::Error),
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,
    /// A non-success status, raised because the connection runs with
    /// `raise_for_status` enabled.
    #[error("Request failed with status {}", .0.status)]
    Status(Response),
}

impl Error {
    /// The response carried by this error, if the server answered at all.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    /// Consumes the error, keeping only the carried response.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
