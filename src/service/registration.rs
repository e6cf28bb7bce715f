//! What `Server::register` accepts.
//!
//! Registration is deliberately cheap: it records the handle and nothing
//! else. Whether the handle is usable is decided when the registry compiles.

use std::fmt;
use std::sync::Arc;

use crate::routing::registry::{compile_service, Registry};
use crate::routing::resolver::ServerDefaults;
use crate::routing::CompileError;
use crate::service::{type_name_of, Service};

/// A service handed to the server, awaiting compilation.
///
/// Built from an `Arc<S>` (the shared handle the registry binds handlers to)
/// or, via [`Registration::owned`], from a bare value. Bare values are
/// accepted here and rejected at compile time with
/// [`CompileError::NotShared`].
pub struct Registration {
    inner: Box<dyn Pending>,
}

impl Registration {
    /// Register `service` by value.
    pub fn owned<S: Service>(service: S) -> Self {
        Self {
            inner: Box::new(Owned(service)),
        }
    }

    /// Type name of the registered service.
    pub fn service_name(&self) -> String {
        self.inner.service_name()
    }

    pub(crate) fn compile(
        &self,
        defaults: &ServerDefaults,
        registry: &mut Registry,
    ) -> Result<usize, CompileError> {
        self.inner.compile(defaults, registry)
    }
}

impl<S: Service> From<Arc<S>> for Registration {
    fn from(service: Arc<S>) -> Self {
        Self {
            inner: Box::new(Shared(service)),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("service", &self.service_name())
            .field("shared", &self.inner.is_shared())
            .finish()
    }
}

trait Pending: Send + Sync {
    fn service_name(&self) -> String;

    fn is_shared(&self) -> bool;

    fn compile(&self, defaults: &ServerDefaults, registry: &mut Registry)
        -> Result<usize, CompileError>;
}

struct Shared<S>(Arc<S>);

struct Owned<S>(S);

impl<S: Service> Pending for Shared<S> {
    fn service_name(&self) -> String {
        type_name_of::<S>()
    }

    fn is_shared(&self) -> bool {
        true
    }

    fn compile(
        &self,
        defaults: &ServerDefaults,
        registry: &mut Registry,
    ) -> Result<usize, CompileError> {
        compile_service(&self.0, defaults, registry)
    }
}

impl<S: Service> Pending for Owned<S> {
    fn service_name(&self) -> String {
        type_name_of::<S>()
    }

    fn is_shared(&self) -> bool {
        false
    }

    fn compile(&self, _: &ServerDefaults, _: &mut Registry) -> Result<usize, CompileError> {
        Err(CompileError::NotShared {
            service: self.service_name(),
        })
    }
}
