//! Liveness Module
//!
//! The liveness oracle answers "is the user service reachable right now?".
//! Every gated operation reads it before sending a request; transport
//! failures ask it to check again.
//!
//! # Data Flow
//! ```text
//! Periodic ping task / transport failure
//!     → check_now()
//!     → update shared alive flag
//!     → is_alive() read by the availability gate
//! ```

use async_trait::async_trait;

use crate::error::Result;

mod pinger;

pub use pinger::HttpPinger;

// == Liveness Oracle ==
/// Shared, externally mutated view of the user service's health.
#[async_trait]
pub trait LivenessOracle: Send + Sync {
    /// Last known status. Must not block.
    fn is_alive(&self) -> bool;

    /// Forces a fresh ping and updates the shared status.
    ///
    /// The ping's own failure is returned so callers can log it.
    async fn check_now(&self) -> Result<()>;
}
