//! Shared test fixtures: an in-process mock user service and a fake
//! liveness oracle.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use user_service_client::{LivenessOracle, Result};

// == Mock User Service ==

/// Observable state of the mock user service.
pub struct MockState {
    /// Requests to user endpoints (ping excluded)
    pub requests: AtomicUsize,
    pub pings: AtomicUsize,
    /// Status forced on every endpoint; 200 means normal behaviour
    pub status: AtomicU16,
    pub ping_status: AtomicU16,
    /// Id returned by a successful login
    pub login_user_id: AtomicI64,
    /// Answer logins with a 200 body missing `userId`
    pub malformed_login: AtomicBool,
    pub users: Mutex<HashMap<u32, Value>>,
    pub puts: Mutex<Vec<(u32, Value)>>,
    pub logouts: Mutex<Vec<Value>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            requests: AtomicUsize::new(0),
            pings: AtomicUsize::new(0),
            status: AtomicU16::new(200),
            ping_status: AtomicU16::new(200),
            login_user_id: AtomicI64::new(42),
            malformed_login: AtomicBool::new(false),
            users: Mutex::new(HashMap::new()),
            puts: Mutex::new(Vec::new()),
            logouts: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn force_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn insert_user(&self, user: Value) {
        let id = user["id"].as_u64().unwrap() as u32;
        self.users.lock().unwrap().insert(id, user);
    }

    pub fn puts(&self) -> Vec<(u32, Value)> {
        self.puts.lock().unwrap().clone()
    }

    fn hit(&self) -> Option<StatusCode> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.status.load(Ordering::SeqCst) {
            200 => None,
            code => Some(StatusCode::from_u16(code).unwrap()),
        }
    }
}

type Reply = (StatusCode, Json<Value>);

fn forced(status: StatusCode) -> Reply {
    (status, Json(json!({ "error": "forced failure" })))
}

async fn ping(State(state): State<Arc<MockState>>) -> StatusCode {
    state.pings.fetch_add(1, Ordering::SeqCst);
    StatusCode::from_u16(state.ping_status.load(Ordering::SeqCst)).unwrap()
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    if let Some(status) = state.hit() {
        return forced(status);
    }
    if state.malformed_login.load(Ordering::SeqCst) {
        return (StatusCode::OK, Json(json!({ "token": "nope" })));
    }
    if body["password"] == "pw" {
        let user_id = state.login_user_id.load(Ordering::SeqCst);
        (StatusCode::OK, Json(json!({ "userId": user_id })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid credentials" })))
    }
}

async fn logout(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    if let Some(status) = state.hit() {
        return forced(status);
    }
    state.logouts.lock().unwrap().push(body);
    (StatusCode::OK, Json(json!({})))
}

async fn get_user(State(state): State<Arc<MockState>>, Path(id): Path<u32>) -> Reply {
    if let Some(status) = state.hit() {
        return forced(status);
    }
    match state.users.lock().unwrap().get(&id) {
        Some(user) => (StatusCode::OK, Json(user.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "no such user" }))),
    }
}

async fn put_user(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u32>,
    Json(body): Json<Value>,
) -> Reply {
    if let Some(status) = state.hit() {
        return forced(status);
    }
    state.puts.lock().unwrap().push((id, body));
    (StatusCode::OK, Json(json!({})))
}

/// Mock user service bound to an ephemeral local port.
pub struct MockUserService {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockUserService {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::new());
        let app = Router::new()
            .route("/ping", get(ping))
            .route("/users/auth/login", post(login))
            .route("/users/auth/logout", post(logout))
            .route("/users/:id", get(get_user).put(put_user))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn ping_url(&self) -> String {
        format!("{}/ping", self.base_url)
    }
}

impl Drop for MockUserService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on: connections are refused.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

// == Fake Liveness Oracle ==

/// Oracle with a settable status that counts `check_now` calls.
pub struct FakeLiveness {
    alive: AtomicBool,
    checks: AtomicUsize,
}

impl FakeLiveness {
    pub fn new(alive: bool) -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(alive),
            checks: AtomicUsize::new(0),
        })
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    /// Waits for spawned re-checks to reach `expected`, then a little longer
    /// so extra ones would show up too.
    pub async fn settled_checks(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.checks() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.checks()
    }
}

#[async_trait]
impl LivenessOracle for FakeLiveness {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn check_now(&self) -> Result<()> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
