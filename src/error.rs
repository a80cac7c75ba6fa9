//! Error types for the user service client
//!
//! Provides unified error handling using thiserror.

use reqwest::StatusCode;
use thiserror::Error;

// == Error Kind ==
/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Liveness gate closed, no request was sent
    Unavailable,
    /// The user service answered with a well-formed rejection
    Rejected,
    /// Connection error, timeout, non-2xx status or malformed payload
    TransportFailure,
    /// 2xx other than 200: the change was not acknowledged
    NotAcknowledged,
}

// == Service Error Enum ==
/// Unified error type for every user service operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The user service is currently reported as down
    #[error("User service unavailable")]
    Unavailable,

    /// Credentials rejected (HTTP 401 on login)
    #[error("Rejected by user service")]
    Rejected,

    /// Connection refused, timeout or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx status that is not a recognised rejection
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    /// A 2xx status other than 200
    #[error("Unexpected success status: {0}")]
    UnexpectedSuccess(StatusCode),

    /// Well-formed response carrying data we cannot accept
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    // == Kind ==
    /// Maps the error onto the failure taxonomy callers branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unavailable => ErrorKind::Unavailable,
            ServiceError::Rejected => ErrorKind::Rejected,
            ServiceError::UnexpectedSuccess(_) => ErrorKind::NotAcknowledged,
            ServiceError::Http(_)
            | ServiceError::UnexpectedStatus(_)
            | ServiceError::InvalidResponse(_) => ErrorKind::TransportFailure,
        }
    }

    /// Classifies a status other than 200 that is not a rejection.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            ServiceError::UnexpectedSuccess(status)
        } else {
            ServiceError::UnexpectedStatus(status)
        }
    }

    /// Returns true if this failure should trigger a liveness re-check.
    pub fn is_transport_failure(&self) -> bool {
        self.kind() == ErrorKind::TransportFailure
    }
}

// == Result Type Alias ==
/// Convenience Result type for the user service client.
pub type Result<T> = std::result::Result<T, ServiceError>;
