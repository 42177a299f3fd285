use models::ErrorResponse;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PayRestError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{message} (status {status})")]
    Remote {
        status: u16,
        message: String,
        details: Option<ErrorResponse>,
    },
    #[error("no access token in authentication response")]
    Authentication,
    #[error("invalid endpoint: `{endpoint}`")]
    InvalidEndpoint { endpoint: String },
}

impl PayRestError {
    pub(crate) fn remote(status: StatusCode, body: &str) -> Self {
        let details = serde_json::from_str::<ErrorResponse>(body).ok();
        let message = details
            .as_ref()
            .and_then(|details| details.message.clone())
            .or_else(|| status.canonical_reason().map(ToString::to_string))
            .unwrap_or_else(|| status.to_string());
        Self::Remote {
            status: status.as_u16(),
            message,
            details,
        }
    }
}

/// A failed call, together with the request body that was sent (if any).
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct RequestFailed {
    #[source]
    pub error: PayRestError,
    pub request: Option<String>,
}

impl RequestFailed {
    pub(crate) fn new(error: impl Into<PayRestError>, request: Option<String>) -> Self {
        Self {
            error: error.into(),
            request,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
#[error("unknown mode: `{0}`, expected `sandbox` or `live`")]
pub struct ParseModeError(pub(crate) String);
