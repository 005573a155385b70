//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use grtn_redirect::config::EdgeConfig;
use grtn_redirect::http::HttpServer;
use grtn_redirect::lifecycle::Shutdown;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Canned answer for one search query.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Duration,
}

impl Reply {
    /// 200 with the given page records in the search envelope.
    pub fn pages(pages: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "result": { "data": { "results": pages } } }),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: json!({ "error": "mock failure" }),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A mock wiki search endpoint.
pub struct MockWiki {
    pub addr: SocketAddr,
    /// Searches received.
    pub hits: Arc<AtomicUsize>,
    /// Searches answered (after any delay).
    pub completed: Arc<AtomicUsize>,
    /// `Cache-Control` values received.
    pub cache_control: Arc<Mutex<Vec<String>>>,
}

impl MockWiki {
    pub fn search_url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct WikiState {
    shortcuts: Reply,
    redirects: Reply,
    hits: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
    cache_control: Arc<Mutex<Vec<String>>>,
}

async fn search(
    State(state): State<WikiState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(value) = headers.get("cache-control").and_then(|v| v.to_str().ok()) {
        state.cache_control.lock().unwrap().push(value.to_string());
    }

    let input: Value = params
        .get("input")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(Value::Null);
    let reply = if input["match"]["grtn"] == json!(true) {
        state.shortcuts.clone()
    } else if input["match"]["grtnRedirects"] == json!(true) {
        state.redirects.clone()
    } else {
        Reply::status(400)
    };

    tokio::time::sleep(reply.delay).await;
    state.completed.fetch_add(1, Ordering::SeqCst);
    (reply.status, Json(reply.body))
}

/// Start a mock wiki answering the shortcut and redirect searches.
pub async fn start_wiki(shortcuts: Reply, redirects: Reply) -> MockWiki {
    let hits = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let cache_control = Arc::new(Mutex::new(Vec::new()));
    let state = WikiState {
        shortcuts,
        redirects,
        hits: hits.clone(),
        completed: completed.clone(),
        cache_control: cache_control.clone(),
    };

    let app = Router::new().route("/search", get(search)).with_state(state);
    let addr = serve(app).await;
    MockWiki {
        addr,
        hits,
        completed,
        cache_control,
    }
}

/// A mock sink recording every JSON body POSTed to it.
pub struct Recorder {
    pub addr: SocketAddr,
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    pub fn url(&self) -> String {
        format!("http://{}/ingest", self.addr)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Start a recording sink that answers `status` after `delay`.
pub async fn start_recorder(status: u16, delay: Duration) -> Recorder {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let store = bodies.clone();
    let status = StatusCode::from_u16(status).unwrap();

    let app = Router::new().route(
        "/ingest",
        post(move |Json(body): Json<Value>| {
            let store = store.clone();
            async move {
                tokio::time::sleep(delay).await;
                store.lock().unwrap().push(body);
                status
            }
        }),
    );
    let addr = serve(app).await;
    Recorder { addr, bodies }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Configuration pointing at `wiki`, with tracking and reporting off.
pub fn test_config(wiki: &MockWiki) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.wiki.search_url = wiki.search_url();
    config.wiki.site_url = "https://site.example".into();
    config.wiki.timeout_secs = 5;
    config.redirects.landing_url = "https://site.example/wiki/GRTN".into();
    config.redirects.fallback_base_url = "https://short.example/".into();
    config.telemetry.api_key = None;
    config.error_reporting.endpoint = None;
    config
}

/// A running redirect server.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_server(config: EdgeConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(server.run(listener, shutdown.subscribe()));
    TestServer { addr, shutdown }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
