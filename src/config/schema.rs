//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the registry
//! server. All types derive Serde traits for deserialization from config files.

use std::net::{AddrParseError, SocketAddr};

use serde::{Deserialize, Serialize};

/// Root configuration for the endpoint registry server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server-tier defaults and listener settings.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Services declared entirely in configuration, served from stub files.
    pub services: Vec<ServiceConfig>,
}

/// Server-tier configuration.
///
/// `url`, `root` and `version` are the lowest-precedence values used when an
/// endpoint's service supplies none of its own. Empty strings mean unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base url segment placed between root and endpoint segment.
    pub url: String,

    /// Root path prefix.
    pub root: String,

    /// Default API version (rendered as `v<version>`).
    pub version: String,

    /// Interface to bind.
    pub host: String,

    /// Listening port.
    pub port: u16,

    /// Register the built-in `GET /status/ping` endpoint.
    pub builtin_ping: bool,

    /// Largest request body buffered for a handler, in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Socket address assembled from `host` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            root: String::new(),
            version: String::new(),
            host: "0.0.0.0".to_string(),
            port: 8090,
            builtin_ping: true,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full filter).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A service declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name, used in logs and as the default root.
    pub name: String,

    /// Declaration-level root.
    pub root: Option<String>,

    /// Declaration-level version.
    pub version: Option<String>,

    /// Declaration-level base url segment.
    pub url: Option<String>,

    pub endpoints: Vec<StubEndpointConfig>,
}

/// An endpoint of a config-declared service. Always backed by a stub file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StubEndpointConfig {
    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Endpoint name; kebab-cased into the url segment when `url` is unset.
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Stub file path, relative to the working or executable directory.
    pub stub: String,
}

fn default_method() -> String {
    "GET".to_string()
}
