//! Transport error types

use super::VsdErrorDetail;

/// Errors that can occur while building or performing a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Structured error body returned by VSD, if any.
        detail: Option<Box<VsdErrorDetail>>,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL provided or built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value could not be encoded.
    #[error("Invalid header {name}: {value}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// Failed to parse the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl TransportError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a new HTTP error with the VSD error body.
    pub fn http_with_detail(status: u16, detail: VsdErrorDetail) -> Self {
        Self::Http {
            status,
            message: detail.to_string(),
            detail: Some(Box::new(detail)),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the VSD error detail if available.
    pub fn vsd_detail(&self) -> Option<&VsdErrorDetail> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the error means the server could not be reached.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Self::Network(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
