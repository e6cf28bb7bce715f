//! Compiled endpoint registry.
//!
//! # Responsibilities
//! - Walk every registered service once and validate its layout
//! - Bind endpoint fields to handlers by name
//! - Resolve each endpoint's canonical path
//! - Reject two endpoints sharing a `METHOD:path` key
//!
//! # Design Decisions
//! - Compilation fails on the first error; a partial registry is never
//!   returned
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact lookup via HashMap keyed by `METHOD:path`

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::Method;

use crate::http::{HandlerRequest, HandlerResponse};
use crate::routing::error::CompileError;
use crate::routing::resolver::{resolve, ServerDefaults};
use crate::service::describe::BaseMember;
use crate::service::{handler_name, type_name_of, Describe, Registration, Service, ServiceBase};

/// A handler bound to the service instance that declared it.
pub type BoundHandler = Arc<dyn Fn(&HandlerRequest) -> HandlerResponse + Send + Sync>;

/// What a matched endpoint produces.
#[derive(Clone)]
pub enum EndpointTarget {
    Handler(BoundHandler),
    /// Relative path of a static response file.
    Stub(PathBuf),
}

impl fmt::Debug for EndpointTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointTarget::Handler(_) => f.write_str("Handler"),
            EndpointTarget::Stub(path) => f.debug_tuple("Stub").field(path).finish(),
        }
    }
}

/// A fully resolved endpoint. Never mutated after compilation.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    method: Method,
    path: String,
    service: String,
    field: String,
    target: EndpointTarget,
}

impl ResolvedEndpoint {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the service that declared this endpoint.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Name of the endpoint field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn target(&self) -> &EndpointTarget {
        &self.target
    }

    pub fn stub(&self) -> Option<&Path> {
        match &self.target {
            EndpointTarget::Stub(path) => Some(path),
            EndpointTarget::Handler(_) => None,
        }
    }

    /// Registry key, `METHOD:path`.
    pub fn key(&self) -> String {
        route_key(&self.method, &self.path)
    }

    fn owner(&self) -> String {
        format!("{}.{}", self.service, self.field)
    }
}

/// Registry key for a method and canonical path.
pub fn route_key(method: &Method, path: &str) -> String {
    format!("{method}:{path}")
}

/// Map from `METHOD:path` to resolved endpoint.
#[derive(Debug, Default)]
pub struct Registry {
    routes: HashMap<String, Arc<ResolvedEndpoint>>,
}

impl Registry {
    /// Compile every registration, in order, into one registry.
    pub fn compile(
        defaults: &ServerDefaults,
        registrations: &[Registration],
    ) -> Result<Self, CompileError> {
        let mut registry = Self::default();
        for registration in registrations {
            let count = registration.compile(defaults, &mut registry)?;
            tracing::debug!(
                service = %registration.service_name(),
                endpoints = count,
                "Service compiled"
            );
        }
        Ok(registry)
    }

    /// Exact lookup. No prefix matching and no method fallback.
    pub fn get(&self, method: &Method, path: &str) -> Option<&Arc<ResolvedEndpoint>> {
        self.routes.get(&route_key(method, path))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All endpoints ordered by path, then method.
    pub fn endpoints(&self) -> Vec<&ResolvedEndpoint> {
        let mut all: Vec<&ResolvedEndpoint> = self.routes.values().map(Arc::as_ref).collect();
        all.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        all
    }

    fn insert(&mut self, endpoint: ResolvedEndpoint) -> Result<(), CompileError> {
        let key = endpoint.key();
        if let Some(existing) = self.routes.get(&key) {
            return Err(CompileError::DuplicateEndpoint {
                key,
                first: existing.owner(),
                second: endpoint.owner(),
            });
        }
        tracing::debug!(key = %key, owner = %endpoint.owner(), "Endpoint registered");
        self.routes.insert(key, Arc::new(endpoint));
        Ok(())
    }
}

/// Compile one shared service into `registry`, returning its endpoint count.
pub(crate) fn compile_service<S: Service>(
    service: &Arc<S>,
    defaults: &ServerDefaults,
    registry: &mut Registry,
) -> Result<usize, CompileError> {
    let mut d = Describe::new(type_name_of::<S>());
    service.describe(&mut d);
    let Describe {
        name,
        bases,
        tag,
        endpoints,
        handlers,
    } = d;

    let base = embedded_base(&name, &bases)?;
    let overrides = base(&**service).overrides();

    for field in &endpoints {
        let target = match &field.stub {
            Some(stub) => EndpointTarget::Stub(stub.clone()),
            None => {
                let wanted = handler_name(&field.name);
                let handler = handlers.get(&wanted).cloned().ok_or_else(|| {
                    CompileError::MissingHandler {
                        service: name.clone(),
                        field: field.name.clone(),
                        handler: wanted.clone(),
                    }
                })?;
                let instance = Arc::clone(service);
                EndpointTarget::Handler(Arc::new(move |request: &HandlerRequest| {
                    handler(&*instance, request)
                }))
            }
        };

        let resolved = resolve(defaults, &name, &tag, &overrides, field);
        registry.insert(ResolvedEndpoint {
            method: field.method.clone(),
            path: resolved.path(),
            service: name.clone(),
            field: field.name.clone(),
            target,
        })?;
    }

    Ok(endpoints.len())
}

fn embedded_base<S>(
    service: &str,
    bases: &[BaseMember<S>],
) -> Result<fn(&S) -> &ServiceBase, CompileError> {
    let embedded: Vec<fn(&S) -> &ServiceBase> = bases
        .iter()
        .filter_map(|member| match member {
            BaseMember::Embedded(get) => Some(*get),
            BaseMember::Named(_) => None,
        })
        .collect();

    match embedded.as_slice() {
        [get] => Ok(*get),
        [] => {
            let named = bases.iter().find_map(|member| match member {
                BaseMember::Named(field) => Some(field.clone()),
                BaseMember::Embedded(_) => None,
            });
            Err(match named {
                Some(field) => CompileError::NamedBase {
                    service: service.to_string(),
                    field,
                },
                None => CompileError::MissingBase {
                    service: service.to_string(),
                },
            })
        }
        many => Err(CompileError::DuplicateBase {
            service: service.to_string(),
            count: many.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct AnyService {
        base: ServiceBase,
    }

    impl AnyService {
        fn honour_get(&self, _req: &HandlerRequest) -> &'static str {
            "get"
        }

        fn honour_post(&self, _req: &HandlerRequest) -> &'static str {
            "post"
        }
    }

    impl Service for AnyService {
        fn describe(&self, d: &mut Describe<Self>) {
            d.embed(|s| &s.base);
            d.get("honourGet").url("a-url");
            d.post("honourPost").url("a-url");
            d.handler("honour_get", Self::honour_get);
            d.handler("honour_post", Self::honour_post);
        }
    }

    #[derive(Default)]
    struct Bare;

    impl Service for Bare {
        fn describe(&self, d: &mut Describe<Self>) {
            d.get("ping").stub("ping.json");
        }
    }

    #[test]
    fn test_route_key_format() {
        assert_eq!(route_key(&Method::GET, "/v1/a"), "GET:/v1/a");
    }

    #[test]
    fn test_compile_binds_handlers() {
        let registrations = vec![Registration::from(Arc::new(AnyService::default()))];
        let registry = Registry::compile(&ServerDefaults::default(), &registrations).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains_key("GET:/any/a-url"));
        assert!(registry.contains_key("POST:/any/a-url"));

        let endpoint = registry.get(&Method::POST, "/any/a-url").unwrap();
        assert_eq!(endpoint.service(), "AnyService");
        assert_eq!(endpoint.field(), "honourPost");
        let EndpointTarget::Handler(handler) = endpoint.target() else {
            panic!("expected handler target");
        };
        let response = handler(&HandlerRequest::new(Method::POST, "/any/a-url"));
        assert_eq!(response.body().as_ref(), b"post");
    }

    #[test]
    fn test_duplicate_across_services() {
        let registrations = vec![
            Registration::from(Arc::new(AnyService::default())),
            Registration::from(Arc::new(AnyService::default())),
        ];
        let err = Registry::compile(&ServerDefaults::default(), &registrations).unwrap_err();
        assert_eq!(
            err,
            CompileError::DuplicateEndpoint {
                key: "GET:/any/a-url".into(),
                first: "AnyService.honourGet".into(),
                second: "AnyService.honourGet".into(),
            }
        );
    }

    #[test]
    fn test_missing_base() {
        let registrations = vec![Registration::from(Arc::new(Bare))];
        let err = Registry::compile(&ServerDefaults::default(), &registrations).unwrap_err();
        assert_eq!(err, CompileError::MissingBase { service: "Bare".into() });
    }

    #[test]
    fn test_endpoints_sorted() {
        let registrations = vec![Registration::from(Arc::new(AnyService::default()))];
        let registry = Registry::compile(&ServerDefaults::default(), &registrations).unwrap();
        let keys: Vec<String> = registry.endpoints().iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["GET:/any/a-url", "POST:/any/a-url"]);
    }
}
