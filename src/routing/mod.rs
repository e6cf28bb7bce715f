//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registry Compilation (at startup):
//!     Registration[]
//!     → registry.rs (validate layout, bind handlers by name)
//!     → resolver.rs (field → instance → service tag → server tiers)
//!     → normalize.rs (canonical /v<version>/<root>/<url>)
//!     → Freeze as immutable Registry keyed by METHOD:path
//!
//! Incoming Request (method, path)
//!     → dispatcher.rs (exact lookup)
//!     → handler or stub file, else 404
//! ```
//!
//! # Design Decisions
//! - Endpoints compiled at startup, immutable at runtime
//! - Compilation errors are fatal, never skipped
//! - Deterministic: same input always resolves to the same key

pub mod dispatcher;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod resolver;

pub use dispatcher::Dispatcher;
pub use error::CompileError;
pub use normalize::canonicalize;
pub use registry::{route_key, BoundHandler, EndpointTarget, Registry, ResolvedEndpoint};
pub use resolver::{ResolvedConfig, ServerDefaults};
