//! Shared harness: a scripted fake CoinGecko and a proxy in front of it, both
//! on ephemeral local ports.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

use cryptodash::proxy::{self, AppState, ProxyConfig};

pub const TEST_API_KEY: &str = "CG-test-key";

/// One scripted upstream answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: Duration::ZERO,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn html(status: u16) -> Self {
        Self {
            status,
            body: "<!DOCTYPE html><html><body>Just a moment...</body></html>".to_string(),
            content_type: "text/html",
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// What the fake saw for one call.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub uri: String,
    pub api_key: Option<String>,
}

struct Inner {
    script: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

/// Fake CoinGecko. Replies are consumed in order; the last one repeats forever.
#[derive(Clone)]
pub struct FakeCoinGecko {
    pub url: String,
    inner: Arc<Inner>,
}

impl FakeCoinGecko {
    pub async fn start(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "script at least one reply");
        let inner = Arc::new(Inner {
            script: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(answer).with_state(inner.clone());
        let base = spawn(app).await;
        Self {
            url: format!("{}/api/v3", base),
            inner,
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn last_uri(&self) -> String {
        self.requests()
            .last()
            .map(|r| r.uri.clone())
            .expect("no upstream request recorded")
    }
}

async fn answer(State(inner): State<Arc<Inner>>, uri: Uri, headers: HeaderMap) -> Response {
    inner.calls.fetch_add(1, Ordering::SeqCst);
    inner.requests.lock().unwrap().push(Recorded {
        uri: uri.to_string(),
        api_key: headers
            .get("x-cg-demo-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    let reply = {
        let mut script = inner.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Proxy config pointed at `fake`, keyed, with a short upstream timeout.
pub fn proxy_config(fake: &FakeCoinGecko) -> ProxyConfig {
    ProxyConfig::default()
        .with_api_key(TEST_API_KEY)
        .with_upstream_url(&fake.url)
        .with_upstream_timeout(Duration::from_millis(500))
}

/// Start a proxy with `config`; returns its base URL.
pub async fn start_proxy(config: ProxyConfig) -> String {
    let state = AppState::new(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        proxy::serve_listener(listener, state).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn coin_row(id: &str, name: &str, symbol: &str, market_cap: f64) -> Value {
    serde_json::json!({
        "id": id,
        "symbol": symbol,
        "name": name,
        "image": format!("https://assets.example/{}.png", id),
        "current_price": 1.5,
        "market_cap": market_cap,
        "market_cap_rank": 1,
        "total_volume": 1000.0,
        "price_change_percentage_24h": 0.5
    })
}
