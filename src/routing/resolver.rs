//! Effective endpoint configuration.
//!
//! # Precedence (highest first)
//! ```text
//! version: field tag → instance override → service tag → server default
//! root:    instance override → service tag → server default → service name
//! url:     instance override → service tag → server default, then
//!          / (field url tag | kebab-cased field name)
//! ```
//!
//! Empty strings count as unset at every tier. Roots do not stack: once a
//! tier supplies a root, lower tiers are ignored.

use crate::config::ServerConfig;
use crate::service::{default_root, default_segment, EndpointField, Overrides, ServiceTag};
use crate::routing::normalize::{canonicalize, join_segments};

/// Server-tier values, the lowest precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDefaults {
    pub version: String,
    pub root: String,
    pub url: String,
}

impl From<&ServerConfig> for ServerDefaults {
    fn from(config: &ServerConfig) -> Self {
        Self {
            version: config.version.clone(),
            root: config.root.clone(),
            url: config.url.clone(),
        }
    }
}

/// Resolved `{version, root, url}` for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub version: String,
    pub root: String,
    pub url: String,
}

impl ResolvedConfig {
    /// Canonical path for this configuration.
    pub fn path(&self) -> String {
        canonicalize(&self.version, &self.root, &self.url)
    }
}

/// Resolve one endpoint field of `service`.
pub fn resolve(
    server: &ServerDefaults,
    service: &str,
    tag: &ServiceTag,
    instance: &Overrides,
    field: &EndpointField,
) -> ResolvedConfig {
    let version = first_set([
        field.version.as_deref(),
        instance.version.as_deref(),
        tag.version.as_deref(),
        Some(server.version.as_str()),
    ])
    .unwrap_or_default();

    let root = first_set([
        instance.root.as_deref(),
        tag.root.as_deref(),
        Some(server.root.as_str()),
    ])
    .map(str::to_string)
    .unwrap_or_else(|| default_root(service));

    let base_url = first_set([
        instance.url.as_deref(),
        tag.url.as_deref(),
        Some(server.url.as_str()),
    ])
    .unwrap_or_default();

    let segment = match first_set([field.url.as_deref()]) {
        Some(url) => url.to_string(),
        None => default_segment(&field.name),
    };

    ResolvedConfig {
        version: version.to_string(),
        root,
        url: join_segments(base_url, &segment),
    }
}

fn first_set<const N: usize>(tiers: [Option<&str>; N]) -> Option<&str> {
    tiers
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
