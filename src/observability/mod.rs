//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry compile and request dispatch produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the trace layer's spans
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
