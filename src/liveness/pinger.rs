//! HTTP liveness pinger.
//!
//! # Responsibilities
//! - Ping the user service's ping endpoint
//! - Keep the last known status and ping time

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::liveness::LivenessOracle;

/// Liveness oracle backed by `GET {base}{ping_path}`.
///
/// Starts out optimistic (alive) so the first real request decides.
pub struct HttpPinger {
    client: reqwest::Client,
    ping_url: String,
    alive: AtomicBool,
    last_checked: Mutex<Option<DateTime<Utc>>>,
}

impl HttpPinger {
    pub fn new(client: reqwest::Client, ping_url: impl Into<String>) -> Self {
        Self {
            client,
            ping_url: ping_url.into(),
            alive: AtomicBool::new(true),
            last_checked: Mutex::new(None),
        }
    }

    /// Builds a pinger with its own client using the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(client, config.ping_url()))
    }

    pub fn ping_url(&self) -> &str {
        &self.ping_url
    }

    /// Time of the last completed ping, if any.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked.lock().ok().and_then(|guard| *guard)
    }

    async fn ping(&self) -> Result<()> {
        let response = self.client.get(&self.ping_url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ServiceError::UnexpectedStatus(status)),
        }
    }

    fn record(&self, healthy: bool) {
        let was_alive = self.alive.swap(healthy, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_checked.lock() {
            *guard = Some(Utc::now());
        }

        match (was_alive, healthy) {
            (false, true) => info!(url = %self.ping_url, "User service is back up"),
            (true, false) => warn!(url = %self.ping_url, "User service is down"),
            _ => debug!(url = %self.ping_url, alive = healthy, "Liveness unchanged"),
        }
    }
}

#[async_trait]
impl LivenessOracle for HttpPinger {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn check_now(&self) -> Result<()> {
        let result = self.ping().await;
        self.record(result.is_ok());
        result
    }
}
