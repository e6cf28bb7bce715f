//! Services declared in the configuration file.
//!
//! Every endpoint of a configured service is a stub: the registry serves the
//! named file and never looks for a handler.

use std::path::PathBuf;

use axum::http::Method;

use crate::config::validation::{parse_method, ValidationError};
use crate::config::ServiceConfig;
use crate::service::{Describe, Service, ServiceBase};

#[derive(Debug, Clone)]
struct StubEndpoint {
    method: Method,
    name: String,
    url: Option<String>,
    version: Option<String>,
    stub: PathBuf,
}

/// A stub-only service built from a `[[services]]` config entry.
#[derive(Debug)]
pub struct ConfiguredService {
    name: String,
    base: ServiceBase,
    root: Option<String>,
    version: Option<String>,
    url: Option<String>,
    endpoints: Vec<StubEndpoint>,
}

impl ConfiguredService {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ValidationError> {
        let endpoints = config
            .endpoints
            .iter()
            .map(|ep| {
                let method = parse_method(&ep.method).ok_or_else(|| ValidationError::InvalidMethod {
                    service: config.name.clone(),
                    endpoint: ep.name.clone(),
                    method: ep.method.clone(),
                })?;
                Ok(StubEndpoint {
                    method,
                    name: ep.name.clone(),
                    url: ep.url.clone(),
                    version: ep.version.clone(),
                    stub: PathBuf::from(&ep.stub),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self {
            name: config.name.clone(),
            base: ServiceBase::new(),
            root: config.root.clone(),
            version: config.version.clone(),
            url: config.url.clone(),
            endpoints,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Service for ConfiguredService {
    fn describe(&self, d: &mut Describe<Self>) {
        d.name(self.name.as_str());
        let tag = d.embed(|s| &s.base);
        if let Some(root) = &self.root {
            tag.root(root.as_str());
        }
        if let Some(version) = &self.version {
            tag.version(version.as_str());
        }
        if let Some(url) = &self.url {
            tag.url(url.as_str());
        }

        for ep in &self.endpoints {
            let field = d.endpoint(ep.method.clone(), ep.name.as_str());
            field.stub(ep.stub.clone());
            if let Some(url) = &ep.url {
                field.url(url.as_str());
            }
            if let Some(version) = &ep.version {
                field.version(version.as_str());
            }
        }
    }
}
