//! Availability Gate
//!
//! Short-circuits requests while the user service is reported down and
//! schedules a liveness re-check after transport failures.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Result, ServiceError};
use crate::liveness::LivenessOracle;

// == Availability Gate ==
#[derive(Clone)]
pub struct AvailabilityGate {
    oracle: Arc<dyn LivenessOracle>,
}

impl AvailabilityGate {
    pub fn new(oracle: Arc<dyn LivenessOracle>) -> Self {
        Self { oracle }
    }

    // == Ensure Open ==
    /// Fails with `Unavailable` when the oracle reports the service down.
    pub fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.oracle.is_alive() {
            Ok(())
        } else {
            debug!(operation, "User service down, request skipped");
            Err(ServiceError::Unavailable)
        }
    }

    // == Report Failure ==
    /// Spawns a fire-and-forget liveness re-check for transport failures.
    ///
    /// Rejections and gate-closed errors are ignored. The caller's result is
    /// never tied to the re-check; its outcome is only logged.
    pub fn report_failure(
        &self,
        operation: &'static str,
        error: &ServiceError,
    ) -> Option<JoinHandle<()>> {
        if !error.is_transport_failure() {
            return None;
        }

        warn!(operation, error = %error, "User service request failed, re-checking liveness");

        let oracle = Arc::clone(&self.oracle);
        Some(tokio::spawn(async move {
            if let Err(e) = oracle.check_now().await {
                warn!(operation, error = %e, "Liveness re-check failed");
            }
        }))
    }
}
