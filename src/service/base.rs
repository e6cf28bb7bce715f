//! Per-service configuration overrides.
//!
//! Two tiers live here:
//! - [`ServiceBase`]: the instance tier. Values assigned at runtime on a
//!   concrete service value, readable until the registry compiles.
//! - [`ServiceTag`]: the declaration tier. Values a service declares about
//!   itself inside [`Service::describe`](crate::service::Service::describe).

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Snapshot of the instance-tier overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub version: Option<String>,
    pub root: Option<String>,
    pub url: Option<String>,
}

/// Instance-tier configuration carried by every service.
///
/// A service embeds exactly one `ServiceBase` and exposes it through
/// [`Describe::embed`](crate::service::Describe::embed). Setters take `&self`
/// so overrides can still be assigned once the service is shared behind an
/// `Arc` and registered, up to the moment the registry compiles.
pub struct ServiceBase {
    overrides: ArcSwap<Overrides>,
}

impl ServiceBase {
    pub fn new() -> Self {
        Self {
            overrides: ArcSwap::from_pointee(Overrides::default()),
        }
    }

    pub fn set_version(&self, version: impl Into<String>) {
        let version = version.into();
        self.update(|o| o.version = Some(version.clone()));
    }

    pub fn set_root(&self, root: impl Into<String>) {
        let root = root.into();
        self.update(|o| o.root = Some(root.clone()));
    }

    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        self.update(|o| o.url = Some(url.clone()));
    }

    /// Current overrides.
    pub fn overrides(&self) -> Arc<Overrides> {
        self.overrides.load_full()
    }

    fn update(&self, apply: impl Fn(&mut Overrides)) {
        self.overrides.rcu(|current| {
            let mut next = Overrides::clone(current);
            apply(&mut next);
            next
        });
    }
}

impl Default for ServiceBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceBase").field(&*self.overrides()).finish()
    }
}

/// Declaration-level metadata of a service (`root`, `version`, `url`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTag {
    pub(crate) root: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) url: Option<String>,
}

impl ServiceTag {
    pub fn root(&mut self, root: impl Into<String>) -> &mut Self {
        self.root = Some(root.into());
        self
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }
}
