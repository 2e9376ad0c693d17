use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteOp::Create => "create",
            WriteOp::Update => "update",
            WriteOp::Delete => "delete",
        })
    }
}

/// Failure reported by the remote task store.
///
/// Every variant is non-fatal; callers display the message and drop the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{message}")]
    ReadFailure { message: String },
    #[error("{message}")]
    WriteFailure { op: WriteOp, message: String },
}

impl StoreError {
    pub fn read(message: impl Into<String>) -> Self {
        Self::ReadFailure {
            message: message.into(),
        }
    }

    pub fn write(op: WriteOp, message: impl Into<String>) -> Self {
        Self::WriteFailure {
            op,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ReadFailure { message } | Self::WriteFailure { message, .. } => message,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
