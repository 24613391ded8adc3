//! Error types for area partitioning.
//!
//! Errors carry a status code plus a human-readable message.

use std::fmt;
use thiserror::Error;

/// Error codes for partitioning and CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid argument provided (empty input, bad area, bad configuration).
    InvalidArgument,
    /// Input file or resource not found.
    NotFound,
    /// Input could not be parsed.
    DataLoss,
    /// Unexpected internal failure.
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::DataLoss => write!(f, "DATA_LOSS"),
            ErrorCode::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Main error type for partitioning operations.
#[derive(Error, Debug, Clone)]
pub struct PartitionError {
    code: ErrorCode,
    message: String,
}

impl PartitionError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, msg)
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, msg)
    }

    /// Create a data loss (parse) error.
    pub fn data_loss(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataLoss, msg)
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }

    /// True for errors caused by the caller's input.
    pub fn is_invalid_argument(&self) -> bool {
        self.code == ErrorCode::InvalidArgument
    }
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<std::io::Error> for PartitionError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::InvalidData => Self::data_loss(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for PartitionError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::internal(err.to_string())
        } else {
            Self::data_loss(err.to_string())
        }
    }
}

/// Result type alias for partitioning operations.
pub type Result<T> = std::result::Result<T, PartitionError>;
