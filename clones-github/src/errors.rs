use std::fmt;

use reqwest::StatusCode;

/// Transport-level failure of a single GitHub request, before it is
/// translated into a [`clones_core::PluginError`] by the calling step.
#[derive(Debug)]
pub(crate) enum ApiFailure {
    /// The server answered with a non-2xx status.
    Status(StatusCode),
    /// The request was sent but nothing came back (connect error, timeout).
    NoResponse(String),
    /// Building the request or decoding the body failed.
    Request(String),
}

impl ApiFailure {
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::Status(status);
        }

        if error.is_connect() || error.is_timeout() {
            Self::NoResponse(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Self::Status(StatusCode::NOT_FOUND))
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(
                f,
                "Error fetching data from GitHub API. Status: {}, Message: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
            Self::NoResponse(cause) => {
                write!(f, "No response received from GitHub API. {}", cause)
            }
            Self::Request(cause) => write!(f, "Request error: {}", cause),
        }
    }
}
