//! User Service Client
//!
//! Health-gated HTTP operations against the user service, backed by the
//! shared user cache.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::liveness::LivenessOracle;
use crate::models::{LoginRequest, LoginResponse, LogoutRequest, User, UserId, UserPatch};
use crate::service::AvailabilityGate;

// == User Service ==
/// Client façade for the remote user service.
///
/// Construct once per process and share by reference. Failures never panic;
/// every operation reports a [`ServiceError`] the caller can match on.
pub struct UserService {
    http: reqwest::Client,
    base_url: String,
    cache: SharedCache,
    gate: AvailabilityGate,
}

impl UserService {
    // == Constructors ==
    /// Reference deployment: 100 cached users, 15 second TTL.
    pub fn new(base_url: &str, oracle: Arc<dyn LivenessOracle>) -> Result<Self> {
        Self::from_config(&Config::with_base_url(base_url), oracle)
    }

    pub fn from_config(config: &Config, oracle: Arc<dyn LivenessOracle>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let cache = CacheStore::new(config.cache_max_entries, config.cache_ttl_duration());

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            cache: Arc::new(RwLock::new(cache)),
            gate: AvailabilityGate::new(oracle),
        })
    }

    /// Shared handle to the user cache, for background maintenance.
    pub fn cache(&self) -> SharedCache {
        Arc::clone(&self.cache)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Login ==
    /// Authenticates a user and returns the server-issued id.
    ///
    /// Bad credentials yield [`ServiceError::Rejected`] and do not trigger a
    /// liveness re-check.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserId> {
        let result = self.try_login(username, password).await;
        self.settle("login", result)
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<UserId> {
        let request = self
            .http
            .post(self.url("/users/auth/login"))
            .json(&LoginRequest { username, password });
        let response = self.send("login", request).await?;

        match response.status() {
            StatusCode::OK => {
                let body: LoginResponse = response.json().await?;
                UserId::try_from(body.user_id)
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| {
                        ServiceError::InvalidResponse(format!(
                            "login returned userId {}",
                            body.user_id
                        ))
                    })
            }
            StatusCode::UNAUTHORIZED => {
                debug!(username, "Login rejected by user service");
                Err(ServiceError::Rejected)
            }
            status => Err(ServiceError::from_status(status)),
        }
    }

    // == Logout ==
    pub async fn logout(&self, user_id: UserId) -> Result<()> {
        let result = self.try_logout(user_id).await;
        self.settle("logout", result)
    }

    async fn try_logout(&self, user_id: UserId) -> Result<()> {
        let request = self
            .http
            .post(self.url("/users/auth/logout"))
            .json(&LogoutRequest { user_id });
        expect_ok(self.send("logout", request).await?)?;
        Ok(())
    }

    // == Get User By Id ==
    /// Returns the user, from cache when fresh, otherwise from the service.
    ///
    /// A cache hit skips the liveness check entirely.
    pub async fn get_user_by_id(&self, user_id: UserId) -> Result<User> {
        if let Some(user) = self.cached_user(user_id).await {
            debug!(user_id, "User served from cache");
            return Ok(user);
        }

        let result = self.fetch_user(user_id).await;
        self.settle("get_user_by_id", result)
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<User> {
        let request = self.http.get(self.user_url(user_id));
        let response = expect_ok(self.send("get_user_by_id", request).await?)?;
        let user: User = response.json().await?;

        self.cache.write().await.put(user.clone());
        Ok(user)
    }

    // == Field Setters ==
    /// Updates the campaign flags and returns the updated snapshot.
    pub async fn set_user_campaign_flags(&self, user: &User, campaign_flags: u32) -> Result<User> {
        self.patch_user(
            "set_user_campaign_flags",
            user,
            UserPatch::campaign_flags(campaign_flags),
            |u| u.campaign_flags = Some(campaign_flags),
        )
        .await
    }

    /// Updates the avatar and returns the updated snapshot.
    pub async fn set_user_avatar(&self, user: &User, avatar: u32) -> Result<User> {
        self.patch_user("set_user_avatar", user, UserPatch::avatar(avatar), |u| {
            u.avatar = Some(avatar)
        })
        .await
    }

    /// Updates the signature and returns the updated snapshot.
    pub async fn set_user_signature(
        &self,
        user: &User,
        signature: impl Into<String>,
    ) -> Result<User> {
        let signature = signature.into();
        self.patch_user(
            "set_user_signature",
            user,
            UserPatch::signature(signature.clone()),
            move |u| u.signature = Some(signature),
        )
        .await
    }

    /// Updates the title and returns the updated snapshot.
    pub async fn set_user_title(&self, user: &User, title: u32) -> Result<User> {
        self.patch_user("set_user_title", user, UserPatch::title(title), |u| {
            u.title = Some(title)
        })
        .await
    }

    /// Sends a single-field patch; on success applies it to a copy of
    /// `user`, caches that copy and returns it. Other fields keep the
    /// caller's values.
    async fn patch_user<F>(
        &self,
        operation: &'static str,
        user: &User,
        patch: UserPatch,
        apply: F,
    ) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        let result = self.put_user(operation, user.id, &patch).await;
        self.settle(operation, result)?;

        let mut updated = user.clone();
        apply(&mut updated);
        self.cache.write().await.put(updated.clone());

        info!(operation, user_id = user.id, "User updated");
        Ok(updated)
    }

    // == Update ==
    /// Sends the full user and caches it verbatim on success.
    pub async fn update(&self, user: &User) -> Result<()> {
        let result = self.put_user("update", user.id, user).await;
        self.settle("update", result)?;

        self.cache.write().await.put(user.clone());
        info!(user_id = user.id, "User updated");
        Ok(())
    }

    async fn put_user<B>(&self, operation: &'static str, user_id: UserId, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.put(self.user_url(user_id)).json(body);
        expect_ok(self.send(operation, request).await?)?;
        Ok(())
    }

    // == Cache Access ==
    /// Cache lookup without any network I/O.
    pub async fn cached_user(&self, user_id: UserId) -> Option<User> {
        self.cache.write().await.get(user_id)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Helpers ==
    /// Gate check, then send.
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        self.gate.ensure_open(operation)?;
        Ok(request.send().await?)
    }

    /// Hands transport failures to the gate for a re-check.
    fn settle<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.gate.report_failure(operation, error);
        }
        result
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{}", self.base_url, user_id)
    }
}

fn expect_ok(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        status => Err(ServiceError::from_status(status)),
    }
}
