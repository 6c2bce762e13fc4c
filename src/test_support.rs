//! Mock Ollama server for tests
//!
//! Serves `/api/tags` and `/api/generate` on an ephemeral port. Tests configure
//! responses up front and inspect what the proxy sent afterwards.

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    response::Response,
    routing::{get, post},
    Router,
};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

struct MockState {
    tags_status: u16,
    tags_body: String,
    tags_delay: Duration,
    tags_calls: usize,
    generate_queue: VecDeque<(u16, String)>,
    generate_requests: Vec<serde_json::Value>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            tags_status: 200,
            tags_body: r#"{"models":[{"name":"gemma3:1b","size":815319791}]}"#.to_string(),
            tags_delay: Duration::ZERO,
            tags_calls: 0,
            generate_queue: VecDeque::new(),
            generate_requests: Vec::new(),
        }
    }
}

type SharedMockState = Arc<Mutex<MockState>>;

pub struct MockOllama {
    addr: SocketAddr,
    state: SharedMockState,
}

impl MockOllama {
    pub async fn start() -> Self {
        let state: SharedMockState = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .layer(DefaultBodyLimit::disable())
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock Ollama server failed");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_tags(&self, status: u16, body: &str) {
        let mut s = self.state.lock().unwrap();
        s.tags_status = status;
        s.tags_body = body.to_string();
    }

    pub fn set_tags_delay(&self, delay: Duration) {
        self.state.lock().unwrap().tags_delay = delay;
    }

    pub fn tags_calls(&self) -> usize {
        self.state.lock().unwrap().tags_calls
    }

    /// Configure the next response of `/api/generate`
    pub fn queue_generate(&self, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .generate_queue
            .push_back((status, body.to_string()));
    }

    /// Bodies received on `/api/generate` since the last drain
    pub fn drain_generate_requests(&self) -> Vec<serde_json::Value> {
        self.state.lock().unwrap().generate_requests.drain(..).collect()
    }
}

/// A base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn json_response(status: u16, body: String) -> Response {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn handle_tags(State(state): State<SharedMockState>) -> Response {
    let (status, body, delay) = {
        let mut s = state.lock().unwrap();
        s.tags_calls += 1;
        (s.tags_status, s.tags_body.clone(), s.tags_delay)
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    json_response(status, body)
}

async fn handle_generate(State(state): State<SharedMockState>, body: Bytes) -> Response {
    let body_json: serde_json::Value =
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    let (status, body) = {
        let mut s = state.lock().unwrap();
        s.generate_requests.push(body_json);
        s.generate_queue.pop_front().unwrap_or_else(|| {
            (
                200,
                r#"{"model":"gemma3:1b","response":"Default response (no mock queued)","done":true}"#
                    .to_string(),
            )
        })
    };

    json_response(status, body)
}
