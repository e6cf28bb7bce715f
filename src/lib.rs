//! Declarative HTTP endpoint registry.
//!
//! Services describe their endpoints with [`Describe`]; a [`Server`] collects
//! them and compiles a collision-free `METHOD:path` registry in one pass.
//! The compiled [`HttpServer`] answers each request by exact lookup, calling
//! the bound handler or serving a static stub file.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod service;

pub use config::AppConfig;
pub use http::{HandlerRequest, HandlerResponse, HttpServer, Server, StubResolver};
pub use lifecycle::Shutdown;
pub use routing::{CompileError, Registry, ResolvedEndpoint};
pub use service::{Describe, Registration, Service, ServiceBase};
