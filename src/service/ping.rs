//! Built-in liveness endpoint: `GET /status/ping` → `pong`.
//!
//! The root is always `status`, never a product name. It is versioned like
//! any other endpoint (`/v1/status/ping` under server version `1`). Turn it
//! off with `server.builtin_ping = false` to claim the path yourself.

use crate::http::HandlerRequest;
use crate::service::{Describe, Service, ServiceBase};

#[derive(Debug, Default)]
pub struct PingService {
    base: ServiceBase,
}

impl PingService {
    fn ping(&self, _req: &HandlerRequest) -> &'static str {
        "pong"
    }
}

impl Service for PingService {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.base).root("status");
        d.get("ping");
        d.handler("ping", Self::ping);
    }
}
