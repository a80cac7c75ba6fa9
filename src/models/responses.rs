//! Response DTOs for the user service API
//!
//! Defines the structure of incoming HTTP response bodies and the login outcome.

use serde::Deserialize;

use super::UserId;
use crate::error::{ErrorKind, Result};

/// Response body for a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

// == Login Outcome ==
/// Three-way result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted, carries the server-issued id
    Authenticated(UserId),
    /// The user service rejected the credentials
    InvalidCredentials,
    /// Service unavailable or the request failed
    Failed,
}

impl LoginOutcome {
    /// Legacy integer encoding: positive id, `0` for failure, `-1` for rejected
    /// credentials. Kept for callers still speaking the old protocol.
    pub fn legacy_code(&self) -> i64 {
        match self {
            LoginOutcome::Authenticated(id) => i64::from(*id),
            LoginOutcome::InvalidCredentials => -1,
            LoginOutcome::Failed => 0,
        }
    }
}

impl From<Result<UserId>> for LoginOutcome {
    fn from(result: Result<UserId>) -> Self {
        match result {
            Ok(id) => LoginOutcome::Authenticated(id),
            Err(err) if err.kind() == ErrorKind::Rejected => LoginOutcome::InvalidCredentials,
            Err(_) => LoginOutcome::Failed,
        }
    }
}
