//! Service descriptors.
//!
//! # Data Flow
//! ```text
//! user type implementing Service
//!     → Registration (Arc handle or by-value, accepted as-is)
//!     → Server::register (appended to pending list, nothing inspected)
//!     → compile: Service::describe fills a Describe<S>
//!     → routing::registry validates layout, binds handlers, resolves paths
//! ```
//!
//! # Design Decisions
//! - Descriptions are explicit builder calls, not runtime introspection
//! - `describe` runs at compile time only, so instance overrides assigned
//!   after registration are still honoured
//! - Handlers are bound by name; the registry reports missing ones

pub mod base;
pub mod configured;
pub mod describe;
pub mod ping;
pub mod registration;

use heck::{ToKebabCase, ToSnakeCase};

pub use base::{Overrides, ServiceBase, ServiceTag};
pub use configured::ConfiguredService;
pub use describe::{Describe, EndpointField};
pub use ping::PingService;
pub use registration::Registration;

/// A group of related endpoints sharing one set of configuration overrides.
///
/// ```ignore
/// #[derive(Default)]
/// struct UserService {
///     base: ServiceBase,
/// }
///
/// impl UserService {
///     fn get_user(&self, _req: &HandlerRequest) -> String {
///         "alice".into()
///     }
/// }
///
/// impl Service for UserService {
///     fn describe(&self, d: &mut Describe<Self>) {
///         d.embed(|s| &s.base).root("/users").version("0.3");
///         d.get("getUser");
///         d.handler("get_user", Self::get_user);
///     }
/// }
/// ```
pub trait Service: Send + Sync + Sized + 'static {
    /// Describe the service's base, tag, endpoints and handlers.
    fn describe(&self, d: &mut Describe<Self>);
}

/// Short type name of `S` without module path or generics.
pub(crate) fn type_name_of<S>() -> String {
    let full = std::any::type_name::<S>();
    let plain = full.split('<').next().unwrap_or(full);
    plain.rsplit("::").next().unwrap_or(plain).to_string()
}

/// Name of the handler an endpoint field binds to.
pub(crate) fn handler_name(field: &str) -> String {
    field.to_snake_case()
}

/// Url segment used when an endpoint field declares none.
pub(crate) fn default_segment(field: &str) -> String {
    field.to_kebab_case()
}

/// Root used when no tier supplies one: the service name minus `Service`.
pub(crate) fn default_root(service: &str) -> String {
    let trimmed = service.strip_suffix("Service").unwrap_or(service);
    trimmed.to_kebab_case()
}
