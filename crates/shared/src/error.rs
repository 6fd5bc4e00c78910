use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification shared by every failure the works client can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A read (remote or cached) produced nothing usable.
    DataUnavailable,
    /// A create/update/delete against the works endpoint failed.
    WriteFailure,
    /// Stored or received JSON could not be decoded.
    MalformedInput,
    /// A draft is missing required fields.
    Validation,
}

/// User-facing notification for a failed operation.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
