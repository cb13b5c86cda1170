//! Backend client error types

use thiserror::Error;

/// Coarse error class, used by the relay to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Connection,
    Upstream,
    InvalidResponse,
    InvalidRequest,
}

/// Errors that can occur while talking to the agents backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: refused, reset, DNS, timeout
    #[error("Backend Connection Error: could not connect to the backend at {base_url}. Please ensure the backend service is running.")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status; `message` is its own text
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// 2xx body that is not the JSON we expect
    #[error("Unexpected response from backend")]
    InvalidResponse { detail: String },

    /// Request could not be built (bad slug, bad URL, bad MIME type)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn connection(base_url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Connection {
            base_url: base_url.into(),
            source,
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ClientErrorKind {
        match self {
            Self::Connection { .. } => ClientErrorKind::Connection,
            Self::Upstream { .. } => ClientErrorKind::Upstream,
            Self::InvalidResponse { .. } => ClientErrorKind::InvalidResponse,
            Self::InvalidRequest(_) => ClientErrorKind::InvalidRequest,
        }
    }

    /// True when the backend could not be reached at all
    pub fn is_connectivity(&self) -> bool {
        self.kind() == ClientErrorKind::Connection
    }

    /// Upstream HTTP status, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
