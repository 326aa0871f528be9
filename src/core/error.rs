use std::collections::TryReserveError;

use thiserror::Error;

use crate::core::types::ShapeId;

#[derive(Error, Debug)]
pub enum VisError {
    #[error("Allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("Malformed command at line {line}: {reason}")]
    MalformedCommand { line: usize, reason: String },

    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl VisError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        VisError::MalformedCommand {
            line,
            reason: reason.into(),
        }
    }

    /// Recoverable errors are logged and skipped by the command stream
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VisError::MalformedCommand { .. } | VisError::ShapeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VisError>;
