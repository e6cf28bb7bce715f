//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check config-declared services are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Endpoint collisions are not checked here; the registry compile owns that

use axum::http::Method;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("server version `{0}` must not contain '/'")]
    InvalidVersion(String),

    #[error("log level `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("metrics address `{0}` is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("services[{0}] has an empty name")]
    EmptyServiceName(usize),

    #[error("service `{service}` endpoint `{endpoint}` has unknown method `{method}`")]
    InvalidMethod {
        service: String,
        endpoint: String,
        method: String,
    },

    #[error("service `{service}` has an endpoint with an empty name")]
    EmptyEndpointName { service: String },

    #[error("service `{service}` endpoint `{endpoint}` has an empty stub path")]
    EmptyStub { service: String, endpoint: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.socket_addr().is_err() {
        errors.push(ValidationError::InvalidBindAddress(format!(
            "{}:{}",
            config.server.host, config.server.port
        )));
    }
    if config.server.version.contains('/') {
        errors.push(ValidationError::InvalidVersion(config.server.version.clone()));
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (idx, service) in config.services.iter().enumerate() {
        if service.name.trim().is_empty() {
            errors.push(ValidationError::EmptyServiceName(idx));
        }
        for endpoint in &service.endpoints {
            if endpoint.name.trim().is_empty() {
                errors.push(ValidationError::EmptyEndpointName {
                    service: service.name.clone(),
                });
            }
            if parse_method(&endpoint.method).is_none() {
                errors.push(ValidationError::InvalidMethod {
                    service: service.name.clone(),
                    endpoint: endpoint.name.clone(),
                    method: endpoint.method.clone(),
                });
            }
            if endpoint.stub.trim().is_empty() {
                errors.push(ValidationError::EmptyStub {
                    service: service.name.clone(),
                    endpoint: endpoint.name.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse one of the standard HTTP methods, case-insensitively.
pub fn parse_method(raw: &str) -> Option<Method> {
    let method = Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).ok()?;
    STANDARD_METHODS.contains(&method).then_some(method)
}

const STANDARD_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];
