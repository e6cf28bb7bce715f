//! Declarative service description.
//!
//! [`Describe`] is what a [`Service`](crate::service::Service) fills in to
//! tell the registry about itself: where its [`ServiceBase`] lives, its
//! declaration-level tag, the endpoint fields it answers, and the handler
//! table those fields bind to by name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Method;

use crate::http::{HandlerRequest, HandlerResponse};
use crate::service::base::{ServiceBase, ServiceTag};

/// Handler stored in a service's handler table.
pub(crate) type ServiceHandler<S> =
    Arc<dyn Fn(&S, &HandlerRequest) -> HandlerResponse + Send + Sync>;

/// How a service holds its [`ServiceBase`].
pub(crate) enum BaseMember<S> {
    /// Anonymous embedding, the only accepted layout.
    Embedded(fn(&S) -> &ServiceBase),
    /// A base kept under a named field.
    Named(String),
}

/// One declared endpoint of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointField {
    pub(crate) method: Method,
    pub(crate) name: String,
    pub(crate) url: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) stub: Option<PathBuf>,
}

impl EndpointField {
    fn new(method: Method, name: impl Into<String>) -> Self {
        Self {
            method,
            name: name.into(),
            url: None,
            version: None,
            stub: None,
        }
    }

    /// Explicit url segment, replacing the kebab-cased field name.
    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    /// Endpoint-specific version; beats every other tier.
    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    /// Serve this file instead of invoking a handler.
    pub fn stub(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.stub = Some(path.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builder a service fills in from [`Service::describe`](crate::service::Service::describe).
pub struct Describe<S> {
    pub(crate) name: String,
    pub(crate) bases: Vec<BaseMember<S>>,
    pub(crate) tag: ServiceTag,
    pub(crate) endpoints: Vec<EndpointField>,
    pub(crate) handlers: HashMap<String, ServiceHandler<S>>,
}

impl<S: 'static> Describe<S> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            tag: ServiceTag::default(),
            endpoints: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Rename the service. Defaults to the short type name.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Declare the embedded [`ServiceBase`] and return its declaration tag.
    ///
    /// ```ignore
    /// d.embed(|s| &s.base).root("/users").version("0.3");
    /// ```
    pub fn embed(&mut self, base: fn(&S) -> &ServiceBase) -> &mut ServiceTag {
        self.bases.push(BaseMember::Embedded(base));
        &mut self.tag
    }

    /// Declare a [`ServiceBase`] held under the named field `field`.
    ///
    /// A named base is not an embedding: a service whose only base is named
    /// fails to compile.
    pub fn named_base(&mut self, field: impl Into<String>) -> &mut Self {
        self.bases.push(BaseMember::Named(field.into()));
        self
    }

    pub fn get(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::GET, field)
    }

    pub fn post(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::POST, field)
    }

    pub fn put(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::PUT, field)
    }

    pub fn patch(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::PATCH, field)
    }

    pub fn delete(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::DELETE, field)
    }

    pub fn head(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::HEAD, field)
    }

    pub fn options(&mut self, field: impl Into<String>) -> &mut EndpointField {
        self.endpoint(Method::OPTIONS, field)
    }

    /// Declare an endpoint field answering `method`.
    pub fn endpoint(&mut self, method: Method, field: impl Into<String>) -> &mut EndpointField {
        self.endpoints.push(EndpointField::new(method, field));
        let last = self.endpoints.len() - 1;
        &mut self.endpoints[last]
    }

    /// Add `handler` to the handler table under `name`.
    ///
    /// Endpoint fields find their handler by snake-casing the field name, so
    /// a `getUser` field binds to the handler named `get_user`.
    pub fn handler<R>(&mut self, name: impl Into<String>, handler: fn(&S, &HandlerRequest) -> R) -> &mut Self
    where
        R: Into<HandlerResponse> + 'static,
    {
        self.handlers.insert(
            name.into(),
            Arc::new(move |service: &S, request: &HandlerRequest| handler(service, request).into()),
        );
        self
    }
}
