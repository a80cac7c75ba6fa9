//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the client.
//!
//! # Tasks
//! - TTL Cleanup: Purges expired user snapshots at configured intervals
//! - Liveness Ping: Pings the user service so a closed gate can reopen

mod cleanup;
mod ping;

pub use cleanup::spawn_cleanup_task;
pub use ping::spawn_ping_task;
