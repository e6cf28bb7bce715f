//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use endpoint_registry::{AppConfig, Server};

/// Server with the given server-tier version and no built-in endpoints.
pub fn server_with_version(version: &str) -> Server {
    let mut config = AppConfig::default();
    config.server.version = version.to_string();
    config.server.builtin_ping = false;
    Server::new(config)
}

/// Send one request through the router and collect status and body.
pub async fn send(router: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
