use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid json pointer: `{pointer}`")]
    InvalidPointer { pointer: String },
    #[error("unknown patch operation: `{op}`")]
    UnknownOp { op: String },
    #[error("`{op}` operation requires `from`")]
    MissingFrom { op: String },
    #[error("`{op}` operation requires `value`")]
    MissingValue { op: String },
}

/// Error body returned by the payment service on a failed call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetails>,
}

/// A single field-level problem reported inside an [`ErrorResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct ErrorDetails {
    pub field: String,
    pub issue: String,
}
