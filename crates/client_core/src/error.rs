use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

use crate::draft::DraftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list works",
            Self::Create => "create work",
            Self::Update => "update work",
            Self::Delete => "delete work",
        }
    }

    pub fn is_write(self) -> bool {
        !matches!(self, Self::List)
    }
}

#[derive(Debug, Error)]
pub enum WorksError {
    #[error("{} request failed: {source}", .operation.as_str())]
    Transport {
        operation: Operation,
        source: reqwest::Error,
    },
    #[error("server rejected {} with status {status}", .operation.as_str())]
    Rejected { operation: Operation, status: u16 },
    #[error("works payload could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("draft is incomplete: {0}")]
    Draft(#[from] DraftError),
}

impl WorksError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { operation, .. } | Self::Rejected { operation, .. } => {
                if operation.is_write() {
                    ErrorCode::WriteFailure
                } else {
                    ErrorCode::DataUnavailable
                }
            }
            Self::Malformed(_) => ErrorCode::MalformedInput,
            Self::Draft(_) => ErrorCode::Validation,
        }
    }

    pub fn to_notification(&self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }
}
