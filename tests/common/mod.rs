#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use fracflood::{app_state::AppState, config_loader::GatewayConfig, proxyweb::build_router};
use serde_json::Value;
use tower::ServiceExt;

/// What the mock prediction service saw for one call.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<Recorded>>,
}

/// A stand-in prediction service answering every route with one canned response.
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Recorded {
        self.state
            .seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("upstream was never called")
    }
}

async fn respond(State(st): State<Arc<MockState>>, uri: Uri, body: Bytes) -> Response {
    st.calls.fetch_add(1, Ordering::SeqCst);
    st.seen.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_owned),
        body: serde_json::from_slice(&body).ok(),
    });
    if !st.delay.is_zero() {
        tokio::time::sleep(st.delay).await;
    }
    (
        st.status,
        [(header::CONTENT_TYPE, "application/json")],
        st.body.clone(),
    )
        .into_response()
}

pub async fn spawn_upstream_raw(status: StatusCode, body: impl Into<String>) -> MockUpstream {
    spawn_upstream_delayed(status, body, Duration::ZERO).await
}

/// Like [`spawn_upstream_raw`], but every response is held back for `delay`.
pub async fn spawn_upstream_delayed(
    status: StatusCode,
    body: impl Into<String>,
    delay: Duration,
) -> MockUpstream {
    let state = Arc::new(MockState {
        status,
        body: body.into(),
        delay,
        calls: AtomicUsize::new(0),
        seen: Mutex::new(Vec::new()),
    });
    let app = Router::new().fallback(respond).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        state,
    }
}

pub async fn spawn_upstream(status: StatusCode, body: Value) -> MockUpstream {
    spawn_upstream_raw(status, body.to_string()).await
}

/// URL of a port nothing listens on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn gateway(base_url: &str) -> Router {
    gateway_with(GatewayConfig {
        prediction_api_url: base_url.to_string(),
        ..GatewayConfig::default()
    })
}

pub fn gateway_with(config: GatewayConfig) -> Router {
    build_router(AppState::shared(config).expect("state"))
}

/// Serve the gateway on an ephemeral port and return its base URL.
pub async fn spawn_gateway(base_url: &str) -> String {
    let app = gateway(base_url);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

pub fn json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).expect("response should be JSON")
}

pub fn reference_input() -> Value {
    serde_json::json!({
        "porosity": 22.5,
        "waterSaturation": 28.0,
        "oilSaturation": 72.0,
        "depth": 8500,
        "netPay": 85,
        "reservoirPressure": 3800,
        "viscosity": 1.2,
        "permeability": 125,
        "fieldStage": "early"
    })
}
