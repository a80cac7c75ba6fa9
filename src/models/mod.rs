//! Wire models for the user service API
//!
//! This module defines the user snapshot plus the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use requests::{LoginRequest, LogoutRequest, UserPatch};
pub use responses::{LoginOutcome, LoginResponse};
pub use user::{User, UserId};
