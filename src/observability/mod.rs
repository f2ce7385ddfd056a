//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and startup produce:
//!     → logging.rs (structured log events, tracing subscriber)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through log lines
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
