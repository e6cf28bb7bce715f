//! Startup errors raised while compiling the registry.

use thiserror::Error;

/// A structural or collision problem found while compiling services.
///
/// Every variant is fatal: the server must not start with a partially
/// compiled registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The service was registered by value rather than as an `Arc` handle.
    #[error("service `{service}` was registered by value; register an Arc handle instead")]
    NotShared { service: String },

    /// The service never called `Describe::embed`.
    #[error("service `{service}` does not embed a ServiceBase")]
    MissingBase { service: String },

    /// The service only holds its base under a named field.
    #[error("service `{service}` holds its ServiceBase in named field `{field}`; it must be embedded")]
    NamedBase { service: String, field: String },

    /// The service embeds more than one base.
    #[error("service `{service}` embeds {count} ServiceBase members; exactly one is allowed")]
    DuplicateBase { service: String, count: usize },

    /// An endpoint field has no handler of the expected name.
    #[error("service `{service}` declares endpoint `{field}` but has no handler `{handler}`")]
    MissingHandler {
        service: String,
        field: String,
        handler: String,
    },

    /// Two endpoints resolved to the same method and path.
    #[error("endpoint {key} is declared by both `{first}` and `{second}`")]
    DuplicateEndpoint {
        key: String,
        first: String,
        second: String,
    },
}
