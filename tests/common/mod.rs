//! Shared utilities for integration tests: a mock upstream and a running proxy.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    routing::any,
    Json, Router,
};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use cors_proxy::{HttpServer, ProxyConfig, Shutdown};

/// What the echo upstream saw.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        seen.entry(name.to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        headers: seen,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn delay(Query(params): Query<HashMap<String, String>>) -> &'static str {
    let ms = params.get("ms").and_then(|v| v.parse().ok()).unwrap_or(0);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "delayed"
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, format!("status {code}"))
}

async fn text() -> impl IntoResponse {
    (
        AppendHeaders([
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::SET_COOKIE, "a=1"),
            (header::SET_COOKIE, "b=2"),
        ]),
        "plain text",
    )
}

/// Sends headers and a first chunk, then stalls before the rest of the body.
async fn stall() -> Body {
    let head = stream::once(async { Ok::<_, Infallible>("head") });
    let tail = stream::once(async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok::<_, Infallible>("tail")
    });
    Body::from_stream(head.chain(tail))
}

fn upstream_app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/delay", any(delay))
        .route("/status/{code}", any(status))
        .route("/text", any(text))
        .route("/stall", any(stall))
}

/// Start the mock upstream on an ephemeral port.
pub async fn start_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, upstream_app()).await;
    });
    addr
}

/// A proxy instance bound to an ephemeral port; stops when dropped.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestProxy {
    /// Proxy URL forwarding to `target` with extra query `params`.
    pub fn url(&self, target: &str, params: &[(&str, &str)]) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("url", target);
        for (key, value) in params {
            query.append_pair(key, value);
        }
        format!("http://{}/?{}", self.addr, query.finish())
    }

    /// Proxy root without any query.
    pub fn root(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a proxy with `config`. The listener is bound before this returns.
pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
