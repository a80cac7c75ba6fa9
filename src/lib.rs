//! User Service Client - health-gated access to the remote user service
//!
//! Translates login, logout, lookup and update calls into HTTP requests,
//! short-circuits while the service is down and keeps recently seen users in
//! a bounded TTL/LRU cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod liveness;
pub mod models;
pub mod service;
pub mod tasks;

pub use config::Config;
pub use error::{ErrorKind, Result, ServiceError};
pub use liveness::{HttpPinger, LivenessOracle};
pub use models::{LoginOutcome, User, UserId};
pub use service::UserService;
pub use tasks::{spawn_cleanup_task, spawn_ping_task};
