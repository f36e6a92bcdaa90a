//! Shared utilities for integration and load testing.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use price_gateway::config::GatewayConfig;
use price_gateway::http::HttpServer;
use price_gateway::lifecycle::Shutdown;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type BoxedReply = Pin<Box<dyn Future<Output = (u16, String)> + Send>>;
type Responder = Arc<dyn Fn() -> BoxedReply + Send + Sync>;

/// A request the mock downstream received.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Programmable stand-in for the price-lookup service.
#[derive(Clone)]
pub struct MockDownstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    received: Arc<Mutex<Vec<Received>>>,
}

#[allow(dead_code)]
impl MockDownstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    calls: Arc<AtomicU32>,
    received: Arc<Mutex<Vec<Received>>>,
    responder: Responder,
}

async fn mock_bestprice(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.received.lock().unwrap().push(Received {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let (status, body) = (state.responder)().await;
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// Start a mock downstream serving `POST /bestprice` with whatever `f` returns.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockDownstream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let responder: Responder = Arc::new(move || -> BoxedReply { Box::pin(f()) });
    let calls = Arc::new(AtomicU32::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/bestprice", post(mock_bestprice))
        .with_state(MockState {
            calls: calls.clone(),
            received: received.clone(),
            responder,
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockDownstream { addr, calls, received }
}

/// Start a mock downstream that always returns the same status and body.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockDownstream {
    start_programmable_backend(move || async move { (status, body.to_string()) }).await
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Gateway config pointing at `downstream_url`.
pub fn gateway_config(downstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.downstream.base_url = downstream_url.to_string();
    config.downstream.connect_timeout_secs = 2;
    config.downstream.request_timeout_secs = 5;
    config
}

/// A running gateway under test.
#[allow(dead_code)]
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Bind and start a gateway with `config`.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestGateway { addr, shutdown, handle }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
