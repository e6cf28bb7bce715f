//! Responses produced by handlers and the dispatcher.
//!
//! # Responsibilities
//! - Hold status, headers and a fully buffered body
//! - Convert common handler return types (text, JSON, bytes)
//! - Render into an axum response
//!
//! # Design Decisions
//! - The content type is set when the response is built, so nothing is
//!   guessed when it is written out
//! - Error bodies are plain text

use axum::body::{Body, Bytes};
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::http::stub::StubPayload;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct HandlerResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HandlerResponse {
    pub fn new(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::new(status, TEXT_PLAIN, body)
    }

    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::new(status, APPLICATION_JSON, body.to_string())
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::text(status, message.to_string())
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, "Not Found")
    }

    /// 200 with the stub file's bytes.
    pub fn stub(payload: StubPayload) -> Self {
        Self::new(StatusCode::OK, payload.content_type, payload.bytes)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<&'static str> for HandlerResponse {
    fn from(body: &'static str) -> Self {
        Self::text(StatusCode::OK, body)
    }
}

impl From<String> for HandlerResponse {
    fn from(body: String) -> Self {
        Self::text(StatusCode::OK, body)
    }
}

impl From<Value> for HandlerResponse {
    fn from(body: Value) -> Self {
        Self::json(StatusCode::OK, &body)
    }
}

impl From<(StatusCode, String)> for HandlerResponse {
    fn from((status, body): (StatusCode, String)) -> Self {
        Self::text(status, body)
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_conversion() {
        let response = HandlerResponse::from("pong");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], TEXT_PLAIN);
        assert_eq!(response.body().as_ref(), b"pong");
    }

    #[test]
    fn test_json_conversion() {
        let response = HandlerResponse::from(json!({"id": 7}));
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(response.body().as_ref(), br#"{"id":7}"#);
    }

    #[test]
    fn test_extra_headers_survive_rendering() {
        let mut response = HandlerResponse::text(StatusCode::ACCEPTED, "queued");
        response
            .headers_mut()
            .insert("location", HeaderValue::from_static("/jobs/1"));

        let rendered = response.into_response();
        assert_eq!(rendered.status(), StatusCode::ACCEPTED);
        assert_eq!(rendered.headers()["location"], "/jobs/1");
        assert_eq!(rendered.headers()[CONTENT_TYPE], TEXT_PLAIN);
    }

    #[tokio::test]
    async fn test_into_response() {
        let response = HandlerResponse::error(StatusCode::BAD_REQUEST, "missing").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(body.as_ref(), b"missing");
    }
}
