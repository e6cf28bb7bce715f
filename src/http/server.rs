//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Collect service registrations (`Server`)
//! - Compile them once into an immutable registry (`Server::compile`)
//! - Create the Axum Router feeding every request to the dispatcher
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and stop on shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::ValidationError;
use crate::config::AppConfig;
use crate::http::stub::StubResolver;
use crate::http::{HandlerRequest, HandlerResponse, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{CompileError, Dispatcher, Registry, ServerDefaults};
use crate::service::{ConfiguredService, PingService, Registration};

/// Routing root collecting services before compilation.
///
/// Lifecycle: `new` → `register`* → `compile` → [`HttpServer::run`].
/// `compile` consumes the server, so the registry is built exactly once.
#[derive(Debug)]
pub struct Server {
    config: AppConfig,
    pending: Vec<Registration>,
}

impl Server {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Server-tier settings may change freely until `compile`.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Queue a service for compilation. Nothing about it is inspected yet.
    pub fn register(&mut self, service: impl Into<Registration>) -> &mut Self {
        self.pending.push(service.into());
        self
    }

    /// Queue every `[[services]]` entry of the configuration.
    pub fn register_configured(&mut self) -> Result<&mut Self, ValidationError> {
        let services = self
            .config
            .services
            .iter()
            .map(ConfiguredService::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        for service in services {
            self.register(Arc::new(service));
        }
        Ok(self)
    }

    /// Number of registrations awaiting compilation.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Compile with stub files searched in the working and executable directories.
    pub fn compile(self) -> Result<HttpServer, CompileError> {
        self.compile_with(StubResolver::from_process())
    }

    /// Compile every registration into the registry.
    ///
    /// Any structural or collision error aborts the whole compile.
    pub fn compile_with(self, stubs: StubResolver) -> Result<HttpServer, CompileError> {
        let Self { config, pending } = self;

        let mut registrations = Vec::with_capacity(pending.len() + 1);
        if config.server.builtin_ping {
            registrations.push(Registration::from(Arc::new(PingService::default())));
        }
        registrations.extend(pending);

        let defaults = ServerDefaults::from(&config.server);
        let registry = Registry::compile(&defaults, &registrations)?;

        tracing::info!(
            services = registrations.len(),
            endpoints = registry.len(),
            version = %defaults.version,
            "Registry compiled"
        );
        metrics::record_registry_size(registry.len());

        Ok(HttpServer {
            dispatcher: Dispatcher::new(Arc::new(registry), Arc::new(stubs)),
            config,
        })
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Dispatcher,
    max_body_bytes: usize,
}

/// A compiled server, ready to serve traffic.
#[derive(Debug, Clone)]
pub struct HttpServer {
    config: AppConfig,
    dispatcher: Dispatcher,
}

impl HttpServer {
    pub fn registry(&self) -> &Registry {
        self.dispatcher.registry()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        let state = AppState {
            dispatcher: self.dispatcher.clone(),
            max_body_bytes: self.config.server.max_body_bytes,
        };

        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        self.config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoints = self.registry().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: exact registry lookup, then handler or stub.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();

    let Some(endpoint) = state.dispatcher.dispatch(&parts.method, parts.uri.path()) else {
        tracing::debug!(
            request_id = parts.headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok()).unwrap_or("unknown"),
            method = %method,
            path = %parts.uri.path(),
            "No endpoint matched"
        );
        metrics::record_request(&method, StatusCode::NOT_FOUND, start_time);
        return HandlerResponse::not_found().into_response();
    };

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(endpoint = %endpoint.key(), error = %e, "Request body rejected");
            metrics::record_request(&method, StatusCode::PAYLOAD_TOO_LARGE, start_time);
            return HandlerResponse::error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
                .into_response();
        }
    };

    let request = HandlerRequest::from_parts(parts, body);
    let response = state.dispatcher.respond(&endpoint, &request).await;
    metrics::record_request(&method, response.status(), start_time);
    response.into_response()
}
