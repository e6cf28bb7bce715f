//! Method-exact request dispatch.
//!
//! # Responsibilities
//! - Look up the endpoint for an inbound `(method, path)`
//! - Invoke its bound handler or serve its stub file
//! - Answer 404 for anything not registered
//!
//! # Design Decisions
//! - A path registered under another method is a plain 404, never a 405
//! - Reads the compiled registry only; safe to share across request tasks

use std::sync::Arc;

use axum::http::{Method, StatusCode};

use crate::http::stub::StubResolver;
use crate::http::{HandlerRequest, HandlerResponse};
use crate::routing::registry::{EndpointTarget, Registry, ResolvedEndpoint};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    stubs: Arc<StubResolver>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, stubs: Arc<StubResolver>) -> Self {
        Self { registry, stubs }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Endpoint registered for exactly this method and path.
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<Arc<ResolvedEndpoint>> {
        self.registry.get(method, path).cloned()
    }

    /// Produce the response of a matched endpoint.
    ///
    /// A stub failure is logged in full; the client only sees the declared
    /// stub path.
    pub async fn respond(
        &self,
        endpoint: &ResolvedEndpoint,
        request: &HandlerRequest,
    ) -> HandlerResponse {
        match endpoint.target() {
            EndpointTarget::Handler(handler) => handler(request),
            EndpointTarget::Stub(stub) => match self.stubs.resolve(stub).await {
                Ok(payload) => HandlerResponse::stub(payload),
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint.key(),
                        error = %e,
                        "Stub file unavailable"
                    );
                    HandlerResponse::error(StatusCode::BAD_REQUEST, &e.client_message())
                }
            },
        }
    }

    /// Dispatch and respond in one step.
    pub async fn handle(&self, request: &HandlerRequest) -> HandlerResponse {
        match self.dispatch(request.method(), request.path()) {
            Some(endpoint) => self.respond(&endpoint, request).await,
            None => {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.path(),
                    "No endpoint matched"
                );
                HandlerResponse::not_found()
            }
        }
    }
}
