use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Error from a ProdManage API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-OK status.
    Rejected {
        status: u16,
        /// The envelope's `error` string, if any
        message: Option<String>,
        /// Per-field messages from the envelope's `errors` map
        field_errors: BTreeMap<String, String>,
    },
    /// The request never produced a response.
    Network(String),
    /// The response body could not be decoded.
    Decode(String),
}

/// Error envelope shape: `{ "error": "...", "errors": { field: message } }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ApiError {
    pub(crate) fn rejected(status: u16, envelope: ErrorEnvelope) -> Self {
        Self::Rejected {
            status,
            message: envelope.error.filter(|m| !m.is_empty()),
            field_errors: envelope.errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Rejected { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Message for a failure toast.
    ///
    /// Server rejections surface the server's `error` verbatim, or `fallback`
    /// when it sent none. Transport and decode failures read
    /// `Network error: <cause>`.
    pub fn failure_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            Self::Network(cause) | Self::Decode(cause) => format!("Network error: {cause}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                status,
                message: Some(message),
                ..
            } => write!(f, "HTTP {status}: {message}"),
            Self::Rejected { status, .. } => write!(f, "HTTP {status}"),
            Self::Network(cause) => write!(f, "network error: {cause}"),
            Self::Decode(cause) => write!(f, "invalid response: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
